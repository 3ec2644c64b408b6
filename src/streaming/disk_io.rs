//! On-disk chunk store: one `{key}.json` file per cached chunk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::Result;
use super::cache::ChunkStore;

/// Directory-backed store. The directory is created on first write.
#[derive(Clone, Debug)]
pub struct DiskChunkStore {
    base_dir: PathBuf,
}

impl DiskChunkStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the file path for a cache key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl ChunkStore for DiskChunkStore {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, payload: &str) -> Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        fs::write(self.entry_path(key), payload)?;
        Ok(())
    }

    /// Delete the `*.json` files of the directory; other files are left alone.
    fn clear(&mut self) -> Result<usize> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut count = 0;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
                count += 1;
            }
        }
        log::debug!("Cleared {} cached chunks from {}", count, self.base_dir.display());
        Ok(count)
    }
}
