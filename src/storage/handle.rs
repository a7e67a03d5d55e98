//! Application Handle
//!
//! Owns the engine for one application namespace and hands out area facades.

use std::sync::Arc;

use crate::area::AreaKind;
use crate::config::Config;
use crate::engine::StorageEngine;
use crate::error::Result;

use super::AreaStorage;

/// Storage for one application
///
/// Replaces a process-wide "current application" with an explicit value:
/// every facade obtained from a handle is scoped to that handle's
/// namespace. Clones share one engine; separately opened handles for the
/// same root and application share on-disk state and the engine's
/// process-wide area locks.
#[derive(Debug, Clone)]
pub struct MemStorage {
    engine: Arc<StorageEngine>,
    config: Config,
}

impl MemStorage {
    /// Initialize storage for `app_name` under the system temp directory
    pub fn init(app_name: &str) -> Result<Self> {
        Self::open(Config::for_app(app_name))
    }

    /// Initialize storage with an explicit config
    ///
    /// Creates both area roots if either is missing.
    pub fn open(config: Config) -> Result<Self> {
        let engine = StorageEngine::new(&config.root_dir, &config.app_name)?;
        engine.create_root()?;

        Ok(Self {
            engine: Arc::new(engine),
            config,
        })
    }

    /// The durable area
    pub fn local(&self) -> AreaStorage {
        self.area(AreaKind::Local)
    }

    /// The temporary area
    pub fn session(&self) -> AreaStorage {
        self.area(AreaKind::Session)
    }

    pub fn area(&self, kind: AreaKind) -> AreaStorage {
        AreaStorage::new(Arc::clone(&self.engine), kind, self.config.capacity(kind))
    }

    /// Direct engine access, e.g. for append-style updates
    pub fn engine(&self) -> &StorageEngine {
        &self.engine
    }

    pub fn app_name(&self) -> &str {
        self.engine.app_name()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
