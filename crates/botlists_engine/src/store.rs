//! Durable key-value store backing the membership cache.
//!
//! Every entry lives in its own JSON file under the store directory. Writes
//! go through a temp file and a rename, so a crash never leaves a torn entry
//! behind. Distinct keys map to distinct files and need no locking.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use botlists_logging::{bot_debug, bot_info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store directory missing or not writable: {0}")]
    StoreDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store at {0:?} is closed")]
    Closed(PathBuf),
}

/// Ensure the store directory exists; create if missing.
pub fn ensure_store_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StoreError::StoreDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StoreError::StoreDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StoreError::StoreDir(e.to_string()))?;
    }
    // Writability check: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| StoreError::StoreDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, StoreError> {
        ensure_store_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(target)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    key: String,
    value: String,
}

#[derive(Debug)]
pub struct DiskStore {
    dir: PathBuf,
    writer: AtomicFileWriter,
    closed: AtomicBool,
}

impl DiskStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        ensure_store_dir(&dir)?;
        bot_info!("Opened cache store at {:?}", dir);
        Ok(Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
            closed: AtomicBool::new(false),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.ensure_open()?;
        let path = self.dir.join(entry_filename(key));
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let entry: StoredEntry = serde_json::from_str(&content)?;
        // Filenames carry a short hash; the stored key settles collisions.
        if entry.key != key {
            bot_debug!("Cache file {:?} holds key {:?}, not {:?}", path, entry.key, key);
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_open()?;
        let entry = StoredEntry {
            key: key.to_string(),
            value: value.to_string(),
        };
        let content = serde_json::to_string(&entry)?;
        let path = self.writer.write(&entry_filename(key), &content)?;
        bot_debug!("Stored {:?} at {:?}", key, path);
        Ok(())
    }

    /// Flushes the store directory and refuses further reads and writes.
    ///
    /// Closing an already closed store is a no-op.
    pub fn close(&self) -> Result<(), StoreError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        #[cfg(unix)]
        {
            fs::File::open(&self.dir)?.sync_all()?;
        }
        bot_info!("Closed cache store at {:?}", self.dir);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed(self.dir.clone()));
        }
        Ok(())
    }
}

/// Deterministic, filesystem-safe name: `{sanitized_key}--{short_hash(key)}.json`
fn entry_filename(key: &str) -> String {
    let mut sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    sanitized.truncate(80);
    format!("{sanitized}--{}.json", short_hash(key))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
