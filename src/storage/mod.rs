//! Local storage module
//!
//! The group store persists its whole collection as one serialized document
//! under a single key. This module defines that key-value contract and the
//! backends that fulfil it:
//! - `memory` - volatile in-process map (tests, previews)
//! - `file` - one JSON file per key in a data directory
//! - `sqlite` - a single `kv` table in a SQLite database

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{
    config::{BackendKind, Settings},
    Result,
};
use std::future::Future;

/// Asynchronous key-value blob store
///
/// Values are opaque strings. A missing key reads as `None`; `set` replaces
/// the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Persistent store chosen at runtime from [`Settings`]
#[derive(Debug)]
pub enum Backend {
    /// In-memory backend
    Memory(MemoryStore),
    /// File-per-key backend
    File(FileStore),
    /// SQLite backend
    Sqlite(SqliteStore),
}

impl Backend {
    /// Open the backend selected by `settings.backend`
    pub fn open(settings: &Settings) -> Result<Self> {
        let backend = match settings.backend {
            BackendKind::Memory => Self::Memory(MemoryStore::new()),
            BackendKind::File => Self::File(FileStore::new(&settings.data_dir)),
            BackendKind::Sqlite => {
                std::fs::create_dir_all(&settings.data_dir)?;
                Self::Sqlite(SqliteStore::open(settings.database_path())?)
            }
        };
        tracing::debug!("Opened {:?} storage backend", settings.backend);
        Ok(backend)
    }
}

impl KeyValueStore for Backend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Memory(store) => store.get(key).await,
            Self::File(store) => store.get(key).await,
            Self::Sqlite(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Memory(store) => store.set(key, value).await,
            Self::File(store) => store.set(key, value).await,
            Self::Sqlite(store) => store.set(key, value).await,
        }
    }
}
