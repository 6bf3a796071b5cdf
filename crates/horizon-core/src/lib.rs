//! Domain types for the Horizon task backend: the task entity, its closed
//! vocabularies, and the storage-agnostic filter specification.

/// Filter specification produced by the query builder.
pub mod filter;
/// Identifier types.
pub mod id;
/// Free-text search matching.
pub mod search;
/// Task entity and vocabularies.
pub mod task;

pub use filter::{DateRange, FilterSpec, Pagination, SortKey, SortOrder, SortSpec};
pub use id::TaskId;
pub use search::SearchMatcher;
pub use task::{
    DESCRIPTION_MAX_LEN, Tag, Task, TaskPriority, TaskStatus, TITLE_MAX_LEN, TITLE_MIN_LEN,
    UnknownValueError,
};
