//! JSON file implementation of KeyValueStore
//!
//! All keys live in one JSON object on disk. A batch is written to a
//! sibling temp file and renamed over the document, so readers see either
//! the old document or the new one.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::{KeyValueStore, StorageError};

type Document = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "library.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_document(&self) -> Result<Document, StorageError> {
        // Undecodable bytes are corruption, not an I/O failure
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&raw)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp)?;
        file.write_all(body.as_bytes())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_document()?.remove(key))
    }

    fn put_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        // A corrupt document is replaced rather than blocking every save
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(StorageError::Corrupt(msg)) => {
                tracing::warn!("Overwriting corrupt store: {}", msg);
                Document::new()
            }
            Err(e) => return Err(e),
        };

        for (key, value) in entries {
            document.insert((*key).to_string(), value.clone());
        }

        self.write_document(&document)
    }
}
