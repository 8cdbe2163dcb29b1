use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use guardpost_application::SessionStore;
use guardpost_core::{AppError, AppResult};
use tokio::sync::Mutex;
use tracing::warn;

/// Session store persisting a flat JSON object to a single file.
///
/// Every mutation rewrites the whole document through a sibling temporary
/// file followed by a rename, so readers see either the old or the new pair
/// of keys and never a partial write.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> AppResult<BTreeMap<String, String>> {
        let document = match tokio::fs::read_to_string(&self.path).await {
            Ok(document) => document,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read session file '{}': {error}",
                    self.path.display()
                )));
            }
        };

        if document.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&document).map_err(|error| {
            AppError::Internal(format!(
                "session file '{}' is not a JSON object of strings: {error}",
                self.path.display()
            ))
        })
    }

    async fn entries_for_update(&self) -> BTreeMap<String, String> {
        self.read_entries().await.unwrap_or_else(|error| {
            warn!(error = %error, "replacing unreadable session file");
            BTreeMap::new()
        })
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!(
                    "failed to create session directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let document = serde_json::to_vec_pretty(entries).map_err(|error| {
            AppError::Internal(format!("failed to encode session file: {error}"))
        })?;

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, document).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write session file '{}': {error}",
                staging.display()
            ))
        })?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to replace session file '{}': {error}",
                    self.path.display()
                ))
            })
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, entries: &[(&str, String)]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut stored = self.entries_for_update().await;
        for (key, value) in entries {
            stored.insert((*key).to_owned(), value.clone());
        }

        self.write_entries(&stored).await
    }

    async fn clear(&self, keys: &[&str]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut stored = self.entries_for_update().await;
        for key in keys {
            stored.remove(*key);
        }

        self.write_entries(&stored).await
    }
}
