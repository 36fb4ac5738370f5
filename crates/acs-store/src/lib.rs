//! Storage layer for locally edited configuration.
//!
//! Two independent collections, schedules and employees, are each kept as
//! one JSON document (`schedules.json`, `employees.json`) under a data
//! directory. Documents are read and replaced whole; their shape belongs to
//! the frontend and is not validated here.
//!
//! # Durability
//!
//! Writes go to a temporary file in the same directory which is then
//! renamed over the target, so readers see either the old or the new
//! document and never a partial one. Concurrent writers are last-one-wins.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or creating a path failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A stored document is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A stored document collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Schedules,
    Employees,
}

impl Collection {
    pub const ALL: [Self; 2] = [Self::Schedules, Self::Employees];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Employees => "employees",
        }
    }

    /// File name of the collection's document.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Schedules => "schedules.json",
            Self::Employees => "employees.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whole-document JSON store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Opens a store at `root`, creating the directory if necessary.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a collection's document.
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    /// Reads a collection's document. A document that was never written
    /// reads as an empty array.
    pub fn read(&self, collection: Collection) -> Result<Value, StoreError> {
        let path = self.path(collection);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%collection, "no stored document, using empty list");
                return Ok(Value::Array(Vec::new()));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }

    /// Replaces a collection's document.
    pub fn write(&self, collection: Collection, document: &Value) -> Result<(), StoreError> {
        let path = self.path(collection);
        let json = serde_json::to_string_pretty(document)?;
        atomic_write(&self.root, &path, json.as_bytes())?;
        tracing::info!(%collection, bytes = json.len(), "document saved");
        Ok(())
    }
}

fn atomic_write(dir: &Path, path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    temp.write_all(data).map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}
