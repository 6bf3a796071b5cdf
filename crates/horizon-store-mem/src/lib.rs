//! In-memory storage implementation for the Horizon task backend.
//!
//! The reference [`TaskStore`] implementation: a lock-guarded map that
//! assigns ids and the managed timestamps, enforces title uniqueness, and
//! evaluates the full filter specification including sorting and
//! pagination. Intended for tests and embedded use.

use std::collections::BTreeMap;
use std::sync::RwLock;

use time::OffsetDateTime;
use tracing::debug;

use horizon_app::{BulkFlagsResult, FlagChanges, NewTask, TaskChanges, TaskStore};
use horizon_core::{FilterSpec, SortSpec, Task, TaskId};

pub mod error;

pub use error::MemStoreError;

/// Map-backed task storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<BTreeMap<TaskId, Task>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<TaskId, Task>>, MemStoreError> {
        self.tasks.read().map_err(|_| MemStoreError::LockPoisoned)
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<TaskId, Task>>, MemStoreError> {
        self.tasks.write().map_err(|_| MemStoreError::LockPoisoned)
    }
}

impl TaskStore for MemoryStore {
    type Error = MemStoreError;

    fn create(&self, task: NewTask) -> Result<Task, Self::Error> {
        let mut tasks = self.write()?;
        if tasks.values().any(|existing| existing.title == task.title) {
            return Err(MemStoreError::DuplicateTitle);
        }
        let now = OffsetDateTime::now_utc();
        let created = Task {
            id: TaskId::new(),
            title: task.title,
            status: task.status,
            priority: task.priority,
            description: task.description,
            created_at: now,
            updated_at: now,
            due_date: task.due_date,
            start_date: task.start_date,
            finished_at: None,
            is_archived: task.is_archived,
            is_pinned: task.is_pinned,
            tags: task.tags,
            custom_tags: task.custom_tags,
        };
        tasks.insert(created.id, created.clone());
        debug!(id = %created.id, "task stored");
        Ok(created)
    }

    fn find_many(&self, spec: &FilterSpec) -> Result<Vec<Task>, Self::Error> {
        let tasks = self.read()?;
        let mut matched: Vec<Task> = tasks.values().filter(|task| spec.matches(task)).cloned().collect();
        drop(tasks);

        let sort = spec.sort.unwrap_or(SortSpec::NEWEST_FIRST);
        matched.sort_by(|a, b| sort.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(spec.pagination.offset())
            .take(spec.pagination.limit as usize)
            .collect())
    }

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, Self::Error> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn update_by_id(
        &self,
        id: TaskId,
        changes: TaskChanges,
        unset_finished_at: bool,
    ) -> Result<Option<Task>, Self::Error> {
        let mut tasks = self.write()?;
        if !tasks.contains_key(&id) {
            return Ok(None);
        }
        if let Some(title) = &changes.title {
            if tasks.values().any(|other| other.id != id && other.title == *title) {
                return Err(MemStoreError::DuplicateTitle);
            }
        }
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(start_date) = changes.start_date {
            task.start_date = Some(start_date);
        }
        if let Some(tags) = changes.tags {
            task.tags = tags;
        }
        if let Some(custom_tags) = changes.custom_tags {
            task.custom_tags = custom_tags;
        }
        if let Some(finished_at) = changes.finished_at {
            task.finished_at = Some(finished_at);
        }
        if unset_finished_at {
            task.finished_at = None;
        }
        task.updated_at = OffsetDateTime::now_utc();

        debug!(id = %task.id, "task updated");
        Ok(Some(task.clone()))
    }

    fn delete_by_id(&self, id: TaskId) -> Result<Option<Task>, Self::Error> {
        Ok(self.write()?.remove(&id))
    }

    fn find_many_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, Self::Error> {
        let tasks = self.read()?;
        Ok(ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }

    fn delete_many_by_ids(&self, ids: &[TaskId]) -> Result<u64, Self::Error> {
        let mut tasks = self.write()?;
        let mut deleted = 0;
        for id in ids {
            if tasks.remove(id).is_some() {
                deleted += 1;
            }
        }
        debug!(count = deleted, "tasks removed");
        Ok(deleted)
    }

    fn update_many_by_ids(
        &self,
        ids: &[TaskId],
        flags: FlagChanges,
    ) -> Result<BulkFlagsResult, Self::Error> {
        let mut tasks = self.write()?;
        let now = OffsetDateTime::now_utc();
        let mut updated = Vec::new();
        let mut modified = 0;
        for id in ids {
            let Some(task) = tasks.get_mut(id) else {
                continue;
            };
            let mut changed = false;
            if let Some(is_archived) = flags.is_archived {
                changed |= task.is_archived != is_archived;
                task.is_archived = is_archived;
            }
            if let Some(is_pinned) = flags.is_pinned {
                changed |= task.is_pinned != is_pinned;
                task.is_pinned = is_pinned;
            }
            if changed {
                task.updated_at = now;
                modified += 1;
            }
            updated.push(task.clone());
        }
        Ok(BulkFlagsResult {
            matched_count: updated.len() as u64,
            modified_count: modified,
            tasks: updated,
        })
    }
}
