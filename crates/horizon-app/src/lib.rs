//! Application layer for the Horizon task backend.
//!
//! This crate turns loosely-typed requests into validated, storage-agnostic
//! operations: the query-filter builder, the input validators, the failure
//! taxonomy, the response envelopes, and the mutation orchestrator over the
//! [`store::TaskStore`] seam.

pub mod error;
pub mod filters;
pub mod inputs;
pub mod response;
pub mod service;
pub mod store;
pub mod validate;

// Re-exports for convenience
pub use error::{DUPLICATE_FIELD, StoreError, TaskError};
pub use filters::{build_filter, parse_timestamp};
pub use inputs::{
    BulkDeleteInput, BulkFlagsInput, CreateTaskInput, OneOrMany, TaskQuery, UpdateTaskInput,
};
pub use response::{Success, failure};
pub use service::{BulkDeleteOutcome, BulkFlagsOutcome, TaskService};
pub use store::{BulkFlagsResult, FlagChanges, NewTask, TaskChanges, TaskStore};
