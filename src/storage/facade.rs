//! Area Facades
//!
//! The caller-facing API for one area. Every call is forwarded to the
//! engine; the only logic added here is the capacity ceiling on `set_item`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::area::AreaKind;
use crate::config::Config;
use crate::engine::StorageEngine;
use crate::error::Result;

use super::MemStorage;

/// Local or session storage for one application
#[derive(Debug, Clone)]
pub struct AreaStorage {
    engine: Arc<StorageEngine>,
    kind: AreaKind,
    capacity: u64,
    path: PathBuf,
}

impl AreaStorage {
    pub(crate) fn new(engine: Arc<StorageEngine>, kind: AreaKind, capacity: u64) -> Self {
        let path = engine.area_path(kind);
        Self {
            engine,
            kind,
            capacity,
            path,
        }
    }

    /// Store a new item
    ///
    /// Fails with `CapacityExceeded` if the area is already at or over its
    /// ceiling, and with `KeyAlreadyExists` if `key` is present.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.engine.write_bounded(key, value, self.kind, self.capacity)
    }

    /// Fails with `KeyNotFound` if `key` is absent
    pub fn get_item(&self, key: &str) -> Result<String> {
        self.engine.read(key, self.kind)
    }

    /// Fails with `KeyNotFound` if `key` is absent
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.engine.delete(key, self.kind)
    }

    /// Remove every item of this application in this area
    pub fn clear(&self) -> Result<()> {
        self.engine.delete_all(self.kind)
    }

    /// Number of stored items
    pub fn count(&self) -> Result<usize> {
        self.engine.count(self.kind)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.engine.is_empty(self.kind)
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        self.engine.contains(key, self.kind)
    }

    /// Sorted keys of the stored items
    pub fn keys(&self) -> Result<Vec<String>> {
        self.engine.keys(self.kind)
    }

    /// Bytes currently counted against the ceiling
    pub fn size_bytes(&self) -> Result<u64> {
        self.engine.total_size(self.kind)
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn kind(&self) -> AreaKind {
        self.kind
    }

    /// Directory holding this area's entry files
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Shortcut constructors for the durable area
pub struct LocalStorage;

impl LocalStorage {
    /// Initialize `app_name` and return its local area
    pub fn init(app_name: &str) -> Result<AreaStorage> {
        Ok(MemStorage::init(app_name)?.local())
    }

    pub fn open(config: Config) -> Result<AreaStorage> {
        Ok(MemStorage::open(config)?.local())
    }
}

/// Shortcut constructors for the temporary area
pub struct SessionStorage;

impl SessionStorage {
    /// Initialize `app_name` and return its session area
    pub fn init(app_name: &str) -> Result<AreaStorage> {
        Ok(MemStorage::init(app_name)?.session())
    }

    pub fn open(config: Config) -> Result<AreaStorage> {
        Ok(MemStorage::open(config)?.session())
    }
}
