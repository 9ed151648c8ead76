use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::repository::{FileTaskRepository, InMemoryTaskRepository, SharedRepository};

const MEMORY_SCHEME: &str = "memory:";
const FILE_SCHEME: &str = "file://";

/// Where the task store lives, parsed from a connection string.
///
/// Accepted forms: `memory:`, `file:///abs/path.json`, or a bare path.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
    /// `~/.tasklist/tasks.json`
    DefaultFile,
}

impl StoreLocation {
    pub fn parse(connection: &str) -> Result<Self> {
        let connection = connection.trim();
        if connection.is_empty() {
            return Err(anyhow!("Empty store connection string"));
        }
        if connection.eq_ignore_ascii_case(MEMORY_SCHEME) {
            return Ok(StoreLocation::Memory);
        }
        if let Some(path) = connection.strip_prefix(FILE_SCHEME) {
            if path.is_empty() {
                return Err(anyhow!("Missing path in store connection string"));
            }
            return Ok(StoreLocation::File(PathBuf::from(path)));
        }
        if connection.contains("://") {
            return Err(anyhow!("Unsupported store connection string: {}", connection));
        }
        Ok(StoreLocation::File(PathBuf::from(connection)))
    }

    pub fn open(&self) -> Result<SharedRepository> {
        let repo: SharedRepository = match self {
            StoreLocation::Memory => Arc::new(InMemoryTaskRepository::new()),
            StoreLocation::File(path) => Arc::new(FileTaskRepository::open(Some(path.clone()))?),
            StoreLocation::DefaultFile => Arc::new(FileTaskRepository::open(None)?),
        };
        Ok(repo)
    }
}

impl Default for StoreLocation {
    fn default() -> Self {
        StoreLocation::DefaultFile
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::Memory => write!(f, "{}", MEMORY_SCHEME),
            StoreLocation::File(path) => write!(f, "{}{}", FILE_SCHEME, path.display()),
            StoreLocation::DefaultFile => write!(f, "~/.tasklist/tasks.json"),
        }
    }
}
