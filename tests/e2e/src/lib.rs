//! Shared fixtures for the end-to-end tests: a service over the memory
//! store, plus helpers for building request inputs from JSON literals.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use horizon_app::{CreateTaskInput, TaskService};
use horizon_core::Task;
use horizon_store_mem::MemoryStore;

/// A service wired to a fresh in-memory store.
#[must_use]
pub fn service() -> TaskService<MemoryStore> {
    TaskService::new(MemoryStore::new())
}

/// Deserialize a request input from a JSON literal.
///
/// # Errors
///
/// Returns an error when the literal does not match the input shape.
pub fn input<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).context("failed to build request input")
}

/// Create a task with the given title and defaults for everything else.
///
/// # Errors
///
/// Returns an error when creation fails.
pub fn seed_task(service: &TaskService<MemoryStore>, title: &str) -> Result<Task> {
    let body: CreateTaskInput = input(json!({ "title": title }))?;
    service
        .create_task(&body)
        .with_context(|| format!("failed to seed task '{title}'"))
}
