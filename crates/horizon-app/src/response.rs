//! Response envelopes: the success wrapper and the per-variant failure body.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::TaskError;

/// Success envelope wrapping an operation's payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Success<T> {
    /// Always `true`.
    pub success: bool,
    /// Optional human-readable confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The operation payload.
    pub data: T,
}

impl<T> Success<T> {
    /// Wrap a payload without a confirmation message.
    pub const fn new(data: T) -> Self {
        Self { success: true, message: None, data }
    }

    /// Wrap a payload with a confirmation message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: Some(message.into()), data }
    }
}

/// Render a failure as its HTTP status and JSON body.
///
/// Internal failures expose only the correlation id; the underlying cause
/// stays in the logs.
pub fn failure(err: &TaskError) -> (u16, Value) {
    let body = match err {
        TaskError::Validation { field, code, .. } => json!({
            "success": false,
            "message": err.to_string(),
            "field": field,
            "code": code,
        }),
        TaskError::NotFound { resource_type, resource_id } => json!({
            "success": false,
            "message": err.to_string(),
            "resourceType": resource_type,
            "resourceId": resource_id,
        }),
        TaskError::Conflict { code, .. } => json!({
            "success": false,
            "message": err.to_string(),
            "code": code,
        }),
        TaskError::Internal { error_id } => json!({
            "success": false,
            "message": err.to_string(),
            "errorId": error_id,
        }),
    };
    (err.status(), body)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_an_absent_message() {
        let body = serde_json::to_value(Success::new(json!({"count": 2}))).expect("serializes");
        assert_eq!(body, json!({ "success": true, "data": { "count": 2 } }));

        let body = serde_json::to_value(Success::with_message("Task created successfully", json!(1)))
            .expect("serializes");
        assert_eq!(body["message"], json!("Task created successfully"));
    }

    #[test]
    fn validation_failure_carries_field_and_code() {
        let err = TaskError::validation("Title is required", "title", "ERR_TITLE_REQUIRED");
        let (status, body) = failure(&err);
        assert_eq!(status, 400);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["field"], json!("title"));
        assert_eq!(body["code"], json!("ERR_TITLE_REQUIRED"));
    }

    #[test]
    fn not_found_failure_names_the_resource() {
        let err = TaskError::not_found("Task", "abc");
        let (status, body) = failure(&err);
        assert_eq!(status, 404);
        assert_eq!(body["resourceType"], json!("Task"));
        assert_eq!(body["resourceId"], json!("abc"));
        assert_eq!(body["message"], json!("Task with id 'abc' not found"));
    }

    #[test]
    fn internal_failure_exposes_only_the_correlation_id() {
        let err = TaskError::internal();
        let (status, body) = failure(&err);
        assert_eq!(status, 500);
        assert_eq!(body["message"], json!("An unexpected error occurred"));
        let error_id = body["errorId"].as_str().expect("error id present");
        assert!(error_id.starts_with("ERR-"));
        assert!(body.get("cause").is_none());
    }
}
