//! Raw request-shaped inputs, exactly as loose as the wire allows.
//!
//! Query-string fields that may legally arrive as a scalar or as an array
//! are modeled with [`OneOrMany`]; fields the original API accepted in
//! multiple JSON shapes (flags, pagination numbers, bulk id lists) are kept
//! as raw [`serde_json::Value`]s so the validation layer can reject bad
//! shapes with a field-coded failure instead of a transport parse error.

use serde::Deserialize;
use serde_json::Value;

/// A field that arrives either as one value or as a list of values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Scalar shape.
    One(T),
    /// Array shape.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalize to a list once, at the builder's entry.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    /// Borrowing view of the same normalization.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }
}

/// Raw query-string payload for task listing. Constructed per request,
/// consumed once by the filter builder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    /// Status filter, scalar or array.
    #[serde(default)]
    pub status: Option<OneOrMany<String>>,
    /// Priority filter, scalar or array.
    #[serde(default)]
    pub priority: Option<OneOrMany<String>>,
    /// Archive flag, boolean or `"true"`/`"false"` string.
    #[serde(default)]
    pub is_archived: Option<Value>,
    /// Pin flag, boolean or `"true"`/`"false"` string.
    #[serde(default)]
    pub is_pinned: Option<Value>,
    /// Tag filter, scalar or array.
    #[serde(default)]
    pub tags: Option<OneOrMany<String>>,
    /// Custom-tag filter, scalar or array.
    #[serde(default)]
    pub custom_tags: Option<OneOrMany<String>>,
    /// Free-text search over title and description.
    #[serde(default)]
    pub search: Option<String>,
    /// Inclusive lower bound on `dueDate`.
    #[serde(default)]
    pub due_from: Option<String>,
    /// Inclusive upper bound on `dueDate`.
    #[serde(default)]
    pub due_to: Option<String>,
    /// Inclusive lower bound on `startDate`.
    #[serde(default)]
    pub start_from: Option<String>,
    /// Inclusive upper bound on `startDate`.
    #[serde(default)]
    pub start_to: Option<String>,
    /// Inclusive lower bound on `createdAt`.
    #[serde(default)]
    pub created_from: Option<String>,
    /// Inclusive upper bound on `createdAt`.
    #[serde(default)]
    pub created_to: Option<String>,
    /// Inclusive lower bound on `updatedAt`.
    #[serde(default)]
    pub updated_from: Option<String>,
    /// Inclusive upper bound on `updatedAt`.
    #[serde(default)]
    pub updated_to: Option<String>,
    /// Inclusive lower bound on `finishedAt`.
    #[serde(default)]
    pub finished_from: Option<String>,
    /// Inclusive upper bound on `finishedAt`.
    #[serde(default)]
    pub finished_to: Option<String>,
    /// Structured sort field.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Structured sort direction.
    #[serde(default)]
    pub sort_order: Option<String>,
    /// Raw `"field:direction"` sort string.
    #[serde(default)]
    pub sort: Option<String>,
    /// Single explicit id.
    #[serde(default)]
    pub id: Option<String>,
    /// Explicit id selection, scalar or array.
    #[serde(default)]
    pub ids: Option<OneOrMany<String>>,
    /// 1-based page number; number or numeric string.
    #[serde(default)]
    pub page: Option<Value>,
    /// Page size; number or numeric string.
    #[serde(default)]
    pub limit: Option<Value>,
}

/// Raw body for task creation. Every field optional at the parse level so
/// that a missing title becomes a coded validation failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    /// Required, non-blank, unique.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional non-blank body.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority name; defaults to `low`.
    #[serde(default)]
    pub priority: Option<String>,
    /// Status name; defaults to `pending`.
    #[serde(default)]
    pub status: Option<String>,
    /// ISO-8601 deadline.
    #[serde(default)]
    pub due_date: Option<String>,
    /// ISO-8601 planned start.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Archive flag.
    #[serde(default)]
    pub is_archived: Option<bool>,
    /// Pin flag.
    #[serde(default)]
    pub is_pinned: Option<bool>,
    /// Tags; must be an array of vocabulary names.
    #[serde(default)]
    pub tags: Option<Value>,
    /// Free-form tags; must be an array of strings.
    #[serde(default)]
    pub custom_tags: Option<Value>,
}

/// Raw body for a single-task update. All fields optional; `finishedAt` is
/// deliberately absent — it is derived, never client-settable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement priority name.
    #[serde(default)]
    pub priority: Option<String>,
    /// Replacement status name; drives the transition rule.
    #[serde(default)]
    pub status: Option<String>,
    /// Replacement ISO-8601 deadline.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Replacement ISO-8601 planned start.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Replacement tag array.
    #[serde(default)]
    pub tags: Option<Value>,
    /// Replacement free-form tag array.
    #[serde(default)]
    pub custom_tags: Option<Value>,
}

/// Raw body for bulk deletion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteInput {
    /// Id list; must be a non-empty array of valid id strings.
    #[serde(default)]
    pub ids: Option<Value>,
}

/// Raw body for a bulk flag update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFlagsInput {
    /// Id list; must be a non-empty array of valid id strings.
    #[serde(default)]
    pub ids: Option<Value>,
    /// New archive flag; must be a boolean when present.
    #[serde(default)]
    pub is_archived: Option<Value>,
    /// New pin flag; must be a boolean when present.
    #[serde(default)]
    pub is_pinned: Option<Value>,
}
