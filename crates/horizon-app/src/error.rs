//! Failure taxonomy for the task core and its transport-status mapping.

use thiserror::Error;
use time::OffsetDateTime;

/// Machine code attached to title-uniqueness conflicts.
pub const DUPLICATE_FIELD: &str = "DUPLICATE_FIELD";

/// Closed set of failures the core reports to its caller.
///
/// Everything here is expected and recoverable by the caller; unclassified
/// faults are folded into [`TaskError::Internal`] with an opaque id rather
/// than leaking detail.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Malformed, out-of-range, or missing input, attributable to one field.
    #[error("{message}")]
    Validation {
        /// Offending field, in its wire spelling.
        field: &'static str,
        /// Stable machine-readable code (`ERR_*`).
        code: &'static str,
        /// Human-readable description.
        message: String,
    },
    /// An id (or every id in a bulk request) resolved to nothing.
    #[error("{resource_type} with id '{resource_id}' not found")]
    NotFound {
        /// Resource kind, e.g. `"Task"` or `"Tasks"`.
        resource_type: &'static str,
        /// The id, or a comma-joined id list for bulk operations.
        resource_id: String,
    },
    /// Uniqueness violation surfaced by the store.
    #[error("{field} already exists")]
    Conflict {
        /// The field whose unique constraint was violated.
        field: String,
        /// Stable machine-readable code.
        code: &'static str,
    },
    /// Unclassified fault; the id is opaque and safe to show to callers.
    #[error("An unexpected error occurred")]
    Internal {
        /// Opaque correlation id (`ERR-<unix-millis>`).
        error_id: String,
    },
}

impl TaskError {
    /// Build a validation failure.
    pub fn validation(message: impl Into<String>, field: &'static str, code: &'static str) -> Self {
        Self::Validation {
            field,
            code,
            message: message.into(),
        }
    }

    /// Build a not-found failure.
    pub fn not_found(resource_type: &'static str, resource_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            resource_id: resource_id.into(),
        }
    }

    /// Build a uniqueness-conflict failure.
    pub fn conflict(field: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            code: DUPLICATE_FIELD,
        }
    }

    /// Build an internal failure with a fresh opaque id.
    #[must_use]
    pub fn internal() -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self::Internal {
            error_id: format!("ERR-{millis}"),
        }
    }

    /// HTTP status the failure kind maps to. This is the single mapping
    /// table between the core taxonomy and the transport.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Internal { .. } => 500,
        }
    }
}

/// Failures a [`TaskStore`](crate::store::TaskStore) implementation may
/// surface. Anything that is not a recognizable conflict is carried opaquely.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store-enforced unique constraint was violated.
    #[error("{field} already exists")]
    Conflict {
        /// The constrained field.
        field: String,
    },
    /// Any other storage fault (outage, corruption, lock poisoning, ...).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
