//! Configuration for MemStorage
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::area::AreaKind;

/// Name of the directory created under the system temp root
pub const ROOT_DIR_NAME: &str = "MemStorage";

/// Main configuration for a MemStorage handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Layout Configuration
    // -------------------------------------------------------------------------
    /// Root directory shared by every application
    /// Internal structure:
    ///   {root_dir}/
    ///     ├── LocalStorage/{app_name}/{key}.mst
    ///     └── SessionStorage/{app_name}/{key}.mst
    pub root_dir: PathBuf,

    /// Application namespace scoping every entry
    pub app_name: String,

    // -------------------------------------------------------------------------
    // Quota Configuration
    // -------------------------------------------------------------------------
    /// Ceiling for the local area (in bytes)
    pub local_capacity: u64,

    /// Ceiling for the session area (in bytes)
    pub session_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: std::env::temp_dir().join(ROOT_DIR_NAME),
            app_name: String::new(),
            local_capacity: AreaKind::Local.default_capacity(),
            session_capacity: AreaKind::Session.default_capacity(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config for an application
    pub fn for_app(app_name: impl Into<String>) -> Self {
        Self::builder().app_name(app_name).build()
    }

    /// Capacity ceiling of the given area
    pub fn capacity(&self, area: AreaKind) -> u64 {
        match area {
            AreaKind::Local => self.local_capacity,
            AreaKind::Session => self.session_capacity,
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory (parent of LocalStorage/ and SessionStorage/)
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the application namespace
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.config.app_name = name.into();
        self
    }

    /// Set the local area ceiling (in bytes)
    pub fn local_capacity(mut self, bytes: u64) -> Self {
        self.config.local_capacity = bytes;
        self
    }

    /// Set the session area ceiling (in bytes)
    pub fn session_capacity(mut self, bytes: u64) -> Self {
        self.config.session_capacity = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
