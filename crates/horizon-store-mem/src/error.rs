//! Error types for memory store operations.

use thiserror::Error;

use horizon_app::StoreError;

/// Errors that can occur during `MemoryStore` operations.
#[derive(Error, Debug)]
pub enum MemStoreError {
    /// Another task already holds the requested title.
    #[error("title already exists")]
    DuplicateTitle,

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl From<MemStoreError> for StoreError {
    fn from(err: MemStoreError) -> Self {
        match err {
            MemStoreError::DuplicateTitle => Self::Conflict {
                field: "title".into(),
            },
            MemStoreError::LockPoisoned => Self::Other(anyhow::Error::new(err)),
        }
    }
}
