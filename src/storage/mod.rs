//! Storage Module
//!
//! Caller-facing storage areas built on top of the engine.
//!
//! ## Responsibilities
//! - Hold the application namespace (`MemStorage`)
//! - Expose get/set/remove/clear per area (`AreaStorage`)
//! - Enforce each area's capacity ceiling before a write
//!
//! ## On-disk Layout
//! ```text
//! <root>/
//! ├── LocalStorage/
//! │   └── <app>/
//! │       ├── theme.mst        (content is the raw value)
//! │       └── ...
//! └── SessionStorage/
//!     └── <app>/
//!         └── ...
//! ```

mod facade;
mod handle;

pub use facade::{AreaStorage, LocalStorage, SessionStorage};
pub use handle::MemStorage;
