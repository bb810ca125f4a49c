// ABOUTME: File-backed key-value store writing one JSON file per key
// ABOUTME: Writes go to a temporary file that is renamed over the target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const HEALTH_CHECK_FILE: &str = ".health";

/// Key-value store persisted as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the directory cannot be created
    pub async fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create storage directory {}: {e}",
                dir.display()
            ))
            .with_source(e)
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the key files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::invalid_input(format!(
                "Invalid storage key '{key}'"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!("Failed to read {key}: {e}")).with_source(e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {key}: {e}")).with_source(e))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            // Best effort: the previous file is still intact
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::storage(format!("Failed to commit {key}: {e}")).with_source(e));
        }

        debug!(key = %key, bytes = value.len(), "Persisted key");
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            let path = self.path_for(key)?;
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(
                        AppError::storage(format!("Failed to remove {key}: {e}")).with_source(e)
                    );
                }
            }
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        let probe = self.dir.join(HEALTH_CHECK_FILE);
        fs::write(&probe, b"ok").await.map_err(|e| {
            AppError::storage(format!(
                "Storage directory {} is not writable: {e}",
                self.dir.display()
            ))
            .with_source(e)
        })?;
        fs::remove_file(&probe).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
