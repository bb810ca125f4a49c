// ABOUTME: Persistence boundary for the planner: a pluggable string key-value store
// ABOUTME: Serializes domain objects at the boundary and selects the backend from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Storage
//!
//! The key-value store is the planner's sole durability mechanism. Values are
//! opaque strings; [`get_json`] and [`set_json`] convert domain objects at the
//! boundary, so dates travel as `YYYY-MM-DD` strings and are rebuilt on read.

/// File-backed store, one JSON file per key
pub mod file;
/// In-memory store
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use crate::config::{PlannerConfig, StorageBackend};
use crate::errors::AppResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Persistent key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous blob
    ///
    /// A failed write leaves the previous blob in place.
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the backend cannot be written
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Remove every key in `keys`; missing keys are ignored
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the backend cannot be written
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()>;

    /// Check that the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the backend is unusable
    async fn health_check(&self) -> AppResult<()>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Read and deserialize the value under `key`
///
/// # Errors
///
/// Returns `STORAGE_ERROR` on backend failure or `SERIALIZATION_ERROR` if the
/// stored blob does not decode
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> AppResult<Option<T>> {
    match store.get(key).await? {
        Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
        None => Ok(None),
    }
}

/// Serialize and store `value` under `key`
///
/// # Errors
///
/// Returns `SERIALIZATION_ERROR` if encoding fails or `STORAGE_ERROR` on
/// backend failure
pub async fn set_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let blob = serde_json::to_string(value)?;
    store.set(key, blob).await
}

/// Create the store selected by `config`
///
/// # Errors
///
/// Returns `STORAGE_ERROR` if the file-backed directory cannot be created
pub async fn create_store(config: &PlannerConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.data_dir).await?),
    };
    store.health_check().await?;
    info!(backend = store.backend_name(), "Initialized planner storage");
    Ok(store)
}
