//! Mutation orchestration over a [`TaskStore`].
//!
//! The service owns request validation, the `finishedAt` transition rule and
//! the bulk not-found policy. Each request performs at most one store write;
//! bulk operations are single logical store calls, never per-id loops.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use horizon_core::{SortSpec, Task, TaskStatus};

use crate::error::{StoreError, TaskError};
use crate::filters::build_filter;
use crate::inputs::{BulkDeleteInput, BulkFlagsInput, CreateTaskInput, TaskQuery, UpdateTaskInput};
use crate::store::TaskStore;
use crate::validate;

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteOutcome {
    /// How many tasks were removed.
    pub deleted_count: u64,
    /// The removed tasks, fetched before deletion.
    pub deleted_tasks: Vec<Task>,
}

/// Outcome of a bulk flag update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFlagsOutcome {
    /// How many tasks actually changed.
    pub modified_count: u64,
    /// The matched tasks, post-update.
    pub updated_tasks: Vec<Task>,
}

/// Task orchestrator: validates input, applies the transition rule, and
/// maps store failures into the closed [`TaskError`] taxonomy.
#[derive(Debug)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate a create body and insert the task.
    ///
    /// # Errors
    /// Validation failures, the title-uniqueness conflict, or an internal
    /// failure for any other store fault.
    pub fn create_task(&self, input: &CreateTaskInput) -> Result<Task, TaskError> {
        let new_task = validate::validate_create(input)?;
        let task = self.store.create(new_task).map_err(map_store_error)?;
        info!(id = %task.id, "task created");
        Ok(task)
    }

    /// List tasks matching the query, newest first unless the query asked
    /// for another order. One store round trip.
    ///
    /// # Errors
    /// An internal failure when the store query fails.
    pub fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, TaskError> {
        let mut spec = build_filter(query);
        if spec.sort.is_none() {
            spec.sort = Some(SortSpec::NEWEST_FIRST);
        }
        let tasks = self.store.find_many(&spec).map_err(map_store_error)?;
        debug!(count = tasks.len(), "tasks fetched");
        Ok(tasks)
    }

    /// Update one task in a single store write.
    ///
    /// The transition rule resolves `finishedAt` before the write: an
    /// incoming `completed` over a non-completed prior status stamps it,
    /// any other incoming status clears it, and the two never co-occur.
    ///
    /// # Errors
    /// Id and field validation failures, not-found for unknown ids, the
    /// title conflict, or an internal failure.
    pub fn update_task(&self, id: &str, input: &UpdateTaskInput) -> Result<Task, TaskError> {
        let id = validate::validate_task_id(id)?;
        let existing = self
            .store
            .find_by_id(id)
            .map_err(map_store_error)?
            .ok_or_else(|| TaskError::not_found("Task", id.to_string()))?;

        let mut changes = validate::validate_update(input)?;
        let mut unset_finished_at = false;
        match changes.status {
            Some(TaskStatus::Completed) => {
                if existing.status != TaskStatus::Completed {
                    changes.finished_at = Some(OffsetDateTime::now_utc());
                }
            }
            Some(_) => unset_finished_at = true,
            None => {}
        }

        let updated = self
            .store
            .update_by_id(id, changes, unset_finished_at)
            .map_err(map_store_error)?
            .ok_or_else(|| TaskError::not_found("Task", id.to_string()))?;
        info!(id = %updated.id, "task updated");
        Ok(updated)
    }

    /// Delete one task, returning the deleted record.
    ///
    /// # Errors
    /// Id validation failures, not-found for unknown ids, or an internal
    /// failure.
    pub fn delete_task(&self, id: &str) -> Result<Task, TaskError> {
        let id = validate::validate_task_id(id)?;
        let deleted = self
            .store
            .delete_by_id(id)
            .map_err(map_store_error)?
            .ok_or_else(|| TaskError::not_found("Task", id.to_string()))?;
        info!(id = %deleted.id, "task deleted");
        Ok(deleted)
    }

    /// Delete a validated, deduplicated id list. Deleting nothing at all is
    /// a not-found, not a silent success.
    ///
    /// # Errors
    /// Id-list validation failures, not-found when zero tasks matched, or
    /// an internal failure.
    pub fn delete_selected_tasks(
        &self,
        input: &BulkDeleteInput,
    ) -> Result<BulkDeleteOutcome, TaskError> {
        let ids = validate::validate_id_list(input.ids.as_ref())?;
        let deleted_tasks = self.store.find_many_by_ids(&ids).map_err(map_store_error)?;
        let deleted_count = self.store.delete_many_by_ids(&ids).map_err(map_store_error)?;
        if deleted_count == 0 {
            return Err(TaskError::not_found("Tasks", join_ids(&ids)));
        }
        info!(count = deleted_count, "tasks deleted");
        Ok(BulkDeleteOutcome { deleted_count, deleted_tasks })
    }

    /// Apply archive/pin flags to a validated id list in one store call.
    ///
    /// # Errors
    /// Id-list and flag validation failures, not-found when zero tasks
    /// matched, or an internal failure.
    pub fn update_task_flags_bulk(
        &self,
        input: &BulkFlagsInput,
    ) -> Result<BulkFlagsOutcome, TaskError> {
        let ids = validate::validate_id_list(input.ids.as_ref())?;
        let flags = validate::validate_flags(input)?;
        let result = self.store.update_many_by_ids(&ids, flags).map_err(map_store_error)?;
        if result.matched_count == 0 {
            return Err(TaskError::not_found("Tasks", join_ids(&ids)));
        }
        info!(
            matched = result.matched_count,
            modified = result.modified_count,
            "task flags updated"
        );
        Ok(BulkFlagsOutcome {
            modified_count: result.modified_count,
            updated_tasks: result.tasks,
        })
    }
}

fn map_store_error<E: Into<StoreError>>(err: E) -> TaskError {
    match err.into() {
        StoreError::Conflict { field } => TaskError::conflict(field),
        StoreError::Other(source) => {
            warn!(error = %source, "storage failure");
            TaskError::internal()
        }
    }
}

fn join_ids(ids: &[horizon_core::TaskId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
