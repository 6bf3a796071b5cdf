//! Storage abstraction consumed by the task service.

use std::collections::BTreeSet;
use time::OffsetDateTime;

use horizon_core::{FilterSpec, Tag, Task, TaskId, TaskPriority, TaskStatus};

use crate::error::StoreError;

/// Validated field set for a task insert. The store assigns the id and the
/// managed timestamps.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Non-blank, length-checked title.
    pub title: String,
    /// Initial status (defaults applied during validation).
    pub status: TaskStatus,
    /// Initial priority (defaults applied during validation).
    pub priority: TaskPriority,
    /// Optional non-blank description.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<OffsetDateTime>,
    /// Optional planned start.
    pub start_date: Option<OffsetDateTime>,
    /// Archive flag.
    pub is_archived: bool,
    /// Pin flag.
    pub is_pinned: bool,
    /// Tags from the closed vocabulary.
    pub tags: BTreeSet<Tag>,
    /// Free-form tags.
    pub custom_tags: BTreeSet<String>,
}

/// Validated field set for a single-task update. `None` leaves a field
/// untouched. `finished_at` is only ever populated by the orchestrator's
/// transition rule, never from client input.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement deadline.
    pub due_date: Option<OffsetDateTime>,
    /// Replacement planned start.
    pub start_date: Option<OffsetDateTime>,
    /// Replacement tag set.
    pub tags: Option<BTreeSet<Tag>>,
    /// Replacement free-form tag set.
    pub custom_tags: Option<BTreeSet<String>>,
    /// Completion stamp added by the transition rule.
    pub finished_at: Option<OffsetDateTime>,
}

/// Flag values applied by a bulk flag update. At least one is present by
/// the time this reaches a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagChanges {
    /// New archive flag, if requested.
    pub is_archived: Option<bool>,
    /// New pin flag, if requested.
    pub is_pinned: Option<bool>,
}

/// Result of a bulk flag update.
#[derive(Debug, Clone)]
pub struct BulkFlagsResult {
    /// How many records the id set matched.
    pub matched_count: u64,
    /// How many records were actually modified.
    pub modified_count: u64,
    /// The matched records, post-update.
    pub tasks: Vec<Task>,
}

/// Minimal storage surface required by the task service.
///
/// One method call is one logical storage operation; the service performs at
/// most one write call per request. Title uniqueness is the store's
/// responsibility and is surfaced as [`StoreError::Conflict`].
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<StoreError>;

    /// Insert a task, assigning id and timestamps.
    ///
    /// # Errors
    /// Returns a store-specific error when the insert fails, including the
    /// title-uniqueness conflict.
    fn create(&self, task: NewTask) -> Result<Task, Self::Error>;

    /// Fetch every task matching the filter, sorted and paginated.
    ///
    /// # Errors
    /// Returns a store-specific error when the query fails.
    fn find_many(&self, spec: &FilterSpec) -> Result<Vec<Task>, Self::Error>;

    /// Look up one task.
    ///
    /// # Errors
    /// Returns a store-specific error when the lookup fails.
    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, Self::Error>;

    /// Apply the changes to one task in a single write, optionally clearing
    /// `finishedAt` in the same write. Returns the post-update record, or
    /// `None` when the id matched nothing.
    ///
    /// # Errors
    /// Returns a store-specific error when the write fails.
    fn update_by_id(
        &self,
        id: TaskId,
        changes: TaskChanges,
        unset_finished_at: bool,
    ) -> Result<Option<Task>, Self::Error>;

    /// Delete one task, returning the deleted record when it existed.
    ///
    /// # Errors
    /// Returns a store-specific error when the delete fails.
    fn delete_by_id(&self, id: TaskId) -> Result<Option<Task>, Self::Error>;

    /// Fetch the tasks whose ids are in the given set. Unknown ids are
    /// simply absent from the result.
    ///
    /// # Errors
    /// Returns a store-specific error when the query fails.
    fn find_many_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, Self::Error>;

    /// Delete every task whose id is in the given set, returning the count.
    ///
    /// # Errors
    /// Returns a store-specific error when the delete fails.
    fn delete_many_by_ids(&self, ids: &[TaskId]) -> Result<u64, Self::Error>;

    /// Apply the flag changes to every matched task in one logical
    /// operation.
    ///
    /// # Errors
    /// Returns a store-specific error when the write fails.
    fn update_many_by_ids(
        &self,
        ids: &[TaskId],
        flags: FlagChanges,
    ) -> Result<BulkFlagsResult, Self::Error>;
}
