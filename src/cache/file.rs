//! File Store Module
//!
//! Local fallback tier: one JSON file per repository under a root directory.
//! Entries never expire; they stay until cleared.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::cache::{RepoKey, Store};
use crate::error::Result;

// == File Store ==
/// Filesystem-backed store rooted at `root`.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    /// Disambiguates temp files of concurrent writers
    write_seq: AtomicU64,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_seq: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the entry for `key` lives.
    pub fn path_for(&self, key: &RepoKey) -> PathBuf {
        key.file_path(&self.root)
    }

    fn temp_path(&self, path: &Path) -> PathBuf {
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        PathBuf::from(name)
    }
}

#[async_trait]
impl Store for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &RepoKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes through a temp file and rename, so readers see old or new, never half.
    async fn set(&self, key: &RepoKey, value: &str, _ttl: Option<Duration>) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path(&path);
        if let Err(err) = fs::write(&temp, value).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err.into());
        }

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn delete(&self, key: &RepoKey) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, key: &RepoKey) -> Result<bool> {
        Ok(fs::try_exists(self.path_for(key)).await?)
    }
}
