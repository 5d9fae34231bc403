//! Persistence collaborators
//!
//! Whole-document save/load goes through a [`KeyValueStore`] under one
//! well-known key; export goes through a [`FileExchange`]. Reading a picked
//! file is asynchronous in the host and is handled by the session's load
//! tickets, not here.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::{FontError, Result};

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserDownload, BrowserStore};

/// Byte-valued key/value store
pub trait KeyValueStore {
    /// `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Offers bytes to the user as a downloadable file
pub trait FileExchange {
    fn offer_download(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// In-process store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(FontError::Storage(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, value)?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Keeps offered downloads in memory
#[derive(Clone, Debug, Default)]
pub struct DownloadLog {
    pub files: Vec<(String, Vec<u8>)>,
}

impl FileExchange for DownloadLog {
    fn offer_download(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.files.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }
}
