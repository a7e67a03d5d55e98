//! # MemStorage
//!
//! Per-application key-value storage with two areas:
//! - Local storage: durable, 50 MiB ceiling
//! - Session storage: temporary, 10 MiB ceiling
//!
//! Each entry is one file whose content is the value, verbatim.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        MemStorage                            │
//! │                  (one application namespace)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Local    │          │   Session   │
//!   │   (quota)   │          │   (quota)   │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬────────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │ StorageEngine │
//!               │ (lock / area) │
//!               └───────┬───────┘
//!                       ▼
//!             <root>/<Area>/<app>/<key>.mst
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use memstorage::MemStorage;
//!
//! # fn main() -> memstorage::Result<()> {
//! let storage = MemStorage::init("demo")?;
//! let local = storage.local();
//!
//! local.set_item("theme", "dark")?;
//! assert_eq!(local.get_item("theme")?, "dark");
//! assert!(local.set_item("theme", "light").unwrap_err().is_already_exists());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod area;
pub mod engine;
pub mod storage;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StorageError, Result};
pub use config::Config;
pub use area::AreaKind;
pub use engine::StorageEngine;
pub use storage::{AreaStorage, LocalStorage, MemStorage, SessionStorage};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of MemStorage
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
