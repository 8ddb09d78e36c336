//! Chat log persistence
//!
//! The log is a JSON array of broadcast lines. [`JsonFileHistory`] keeps
//! the array in memory and rewrites the whole file on every append:
//!
//! 1. Write the array to a `.tmp` sibling
//! 2. `sync_all()` the temp file
//! 3. Rename it over the log (atomic on most filesystems)
//!
//! so the file on disk is always either the previous or the new log.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::ChatResult;

/// Append-only log of broadcast lines
#[async_trait]
pub trait ChatHistoryStore: Send + Sync {
    async fn append(&self, entry: String) -> ChatResult<()>;
    async fn load_all(&self) -> ChatResult<Vec<String>>;
}

/// Log kept only in memory
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: parking_lot::Mutex<Vec<String>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatHistoryStore for MemoryHistory {
    async fn append(&self, entry: String) -> ChatResult<()> {
        self.entries.lock().push(entry);
        Ok(())
    }

    async fn load_all(&self) -> ChatResult<Vec<String>> {
        Ok(self.entries.lock().clone())
    }
}

/// Log persisted as a JSON array file
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    entries: Mutex<Vec<String>>,
}

impl JsonFileHistory {
    /// Open the log at `path`, loading any existing entries.
    ///
    /// A missing or empty file is an empty log; unparseable content is an
    /// error so a corrupt log is never silently overwritten.
    pub fn open<P: AsRef<Path>>(path: P) -> ChatResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &[String]) -> ChatResult<()> {
        let content = serde_json::to_vec_pretty(entries)?;
        let temp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatHistoryStore for JsonFileHistory {
    async fn append(&self, entry: String) -> ChatResult<()> {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        if let Err(e) = self.persist(&entries).await {
            // keep memory and disk in step
            entries.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn load_all(&self) -> ChatResult<Vec<String>> {
        Ok(self.entries.lock().await.clone())
    }
}
