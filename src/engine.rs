//! Engine Module
//!
//! The storage engine that owns all on-disk state.
//!
//! ## Responsibilities
//! - Derive area roots and entry paths from (application, area, key)
//! - Existence-gated CRUD over entry files
//! - Enumerate, count and size the files of an area
//! - Serialize access per area

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::area::AreaKind;
use crate::error::{Result, StorageError};

/// The per-application storage engine
///
/// ## Per-key state machine
///
/// Every key is either ABSENT or PRESENT, and existence is the only
/// precondition checked:
///
/// - `write`: ABSENT → PRESENT, fails with `KeyAlreadyExists` when PRESENT
/// - `overwrite`: PRESENT → PRESENT (appends), fails with `KeyNotFound` when ABSENT
/// - `read`: requires PRESENT
/// - `delete`: PRESENT → ABSENT, fails with `KeyNotFound` when ABSENT
///
/// ## Concurrency Model
///
/// Each area root has one mutex for the whole process, looked up in a
/// registry keyed by the area path. Every engine opened for the same root
/// and application therefore takes the same lock. An operation takes it
/// before its existence check and holds it until the filesystem call
/// returns, so the check-then-act sequence is atomic within the process.
/// Nothing is locked across processes: two processes writing the same
/// namespace are only protected by `create_new` on the create path.
#[derive(Debug)]
pub struct StorageEngine {
    /// Parent of the LocalStorage/ and SessionStorage/ directories
    root_dir: PathBuf,

    /// Application namespace
    app_name: String,

    /// Process-wide lock per area, indexed by `AreaKind::index`
    area_locks: [Arc<Mutex<()>>; 2],
}

impl StorageEngine {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const EXTENSION: &'static str = ".mst";

    /// Create an engine for `app_name` rooted at `root_dir`
    ///
    /// No I/O happens here; call `create_root` before storing anything.
    pub fn new(root_dir: impl Into<PathBuf>, app_name: impl Into<String>) -> Result<Self> {
        let app_name = app_name.into();
        if !is_valid_component(&app_name) {
            return Err(StorageError::InvalidAppName(app_name));
        }

        let root_dir = root_dir.into();
        let area_locks = AreaKind::ALL.map(|area| {
            area_lock(&root_dir.join(area.dir_name()).join(&app_name))
        });

        Ok(Self {
            root_dir,
            app_name,
            area_locks,
        })
    }

    /// Ensure both area roots exist
    ///
    /// If either root is missing both are (re)created; `create_dir_all` leaves
    /// an existing one untouched.
    pub fn create_root(&self) -> Result<()> {
        if AreaKind::ALL.iter().all(|&area| self.directory_exists(area)) {
            debug!(app = %self.app_name, "storage roots already exist");
            return Ok(());
        }

        for area in AreaKind::ALL {
            let path = self.area_path(area);
            fs::create_dir_all(&path)
                .map_err(|source| StorageError::Initialization { path: path.clone(), source })?;
        }

        info!(
            app = %self.app_name,
            root = %self.root_dir.display(),
            "created storage roots"
        );
        Ok(())
    }

    // =========================================================================
    // Path Derivation
    // =========================================================================

    /// `<root>/<AreaDir>/<app_name>`
    pub fn area_path(&self, area: AreaKind) -> PathBuf {
        self.root_dir.join(area.dir_name()).join(&self.app_name)
    }

    /// `<area root>/<key>.mst`, after checking the key is a plain file name
    pub fn entry_path(&self, key: &str, area: AreaKind) -> Result<PathBuf> {
        if !is_valid_component(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.area_path(area).join(format!("{}{}", key, Self::EXTENSION)))
    }

    pub fn directory_exists(&self, area: AreaKind) -> bool {
        self.area_path(area).is_dir()
    }

    pub fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Whether `key` is currently PRESENT in `area`
    pub fn contains(&self, key: &str, area: AreaKind) -> Result<bool> {
        let path = self.entry_path(key, area)?;
        let _guard = self.lock(area);
        Ok(self.file_exists(&path))
    }

    // =========================================================================
    // Entry Operations
    // =========================================================================

    /// Create an entry; the key must be absent
    pub fn write(&self, key: &str, value: &str, area: AreaKind) -> Result<()> {
        let path = self.entry_path(key, area)?;
        let _guard = self.lock(area);
        self.create_entry(&path, key, value, area)
    }

    /// Create an entry only if the area's current total is below `ceiling`
    ///
    /// The check uses the size before this write, so one large value can take
    /// the area past its ceiling; the next call is then rejected.
    pub fn write_bounded(&self, key: &str, value: &str, area: AreaKind, ceiling: u64) -> Result<()> {
        let path = self.entry_path(key, area)?;
        let _guard = self.lock(area);

        let used = self.total_size_locked(area)?;
        if used >= ceiling {
            warn!(app = %self.app_name, %area, used, ceiling, key, "write rejected, area is full");
            return Err(StorageError::CapacityExceeded { area, used, ceiling });
        }

        self.create_entry(&path, key, value, area)
    }

    /// Append `value` to an existing entry
    ///
    /// Despite the name this never truncates: stored content becomes
    /// `old + value`.
    pub fn overwrite(&self, key: &str, value: &str, area: AreaKind) -> Result<()> {
        let path = self.entry_path(key, area)?;
        let _guard = self.lock(area);

        if !self.file_exists(&path) {
            return Err(StorageError::not_found(key));
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| map_not_found(e, key))?;
        file.write_all(value.as_bytes())?;

        debug!(app = %self.app_name, %area, key, bytes = value.len(), "entry appended");
        Ok(())
    }

    /// Read the full content of an entry
    pub fn read(&self, key: &str, area: AreaKind) -> Result<String> {
        let path = self.entry_path(key, area)?;
        let _guard = self.lock(area);

        if !self.file_exists(&path) {
            return Err(StorageError::not_found(key));
        }

        let value = fs::read_to_string(&path).map_err(|e| map_not_found(e, key))?;
        debug!(app = %self.app_name, %area, key, bytes = value.len(), "entry read");
        Ok(value)
    }

    /// Delete an entry; the key must be present
    pub fn delete(&self, key: &str, area: AreaKind) -> Result<()> {
        let path = self.entry_path(key, area)?;
        let _guard = self.lock(area);

        if !self.file_exists(&path) {
            return Err(StorageError::not_found(key));
        }

        fs::remove_file(&path).map_err(|e| map_not_found(e, key))?;
        debug!(app = %self.app_name, %area, key, "entry deleted");
        Ok(())
    }

    /// Delete every file in the area root
    ///
    /// Stops at the first file that disappeared between listing and delete;
    /// files already removed stay removed.
    pub fn delete_all(&self, area: AreaKind) -> Result<()> {
        let _guard = self.lock(area);

        let files = self.list_files(area)?;
        let total = files.len();

        for file in files {
            let name = file_name(&file);
            if !self.file_exists(&file) {
                warn!(app = %self.app_name, %area, file = %name, "file vanished during clear");
                return Err(StorageError::KeyNotFound { key: name });
            }
            fs::remove_file(&file).map_err(|e| map_not_found(e, &name))?;
        }

        info!(app = %self.app_name, %area, removed = total, "area cleared");
        Ok(())
    }

    // =========================================================================
    // Area Accounting
    // =========================================================================

    /// Number of files under the area root
    pub fn count(&self, area: AreaKind) -> Result<usize> {
        let _guard = self.lock(area);
        Ok(self.list_files(area)?.len())
    }

    pub fn is_empty(&self, area: AreaKind) -> Result<bool> {
        Ok(self.count(area)? == 0)
    }

    /// Sum of the lengths of every file under the area root
    pub fn total_size(&self, area: AreaKind) -> Result<u64> {
        let _guard = self.lock(area);
        self.total_size_locked(area)
    }

    /// Keys of the `.mst` entries in the area, sorted
    pub fn keys(&self, area: AreaKind) -> Result<Vec<String>> {
        let _guard = self.lock(area);

        let mut keys: Vec<String> = self
            .list_files(area)?
            .iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?;
                name.strip_suffix(Self::EXTENSION).map(str::to_string)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn lock(&self, area: AreaKind) -> MutexGuard<'_, ()> {
        self.area_locks[area.index()].lock()
    }

    /// Create-only write (caller holds the area lock)
    fn create_entry(&self, path: &Path, key: &str, value: &str, area: AreaKind) -> Result<()> {
        if self.file_exists(path) {
            return Err(StorageError::already_exists(key));
        }

        // create_new also catches another process creating the file after our check
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::already_exists(key),
                _ => StorageError::Io(e),
            })?;

        if let Err(e) = file.write_all(value.as_bytes()) {
            drop(file);
            // Don't leave a half-written entry behind as PRESENT
            let _ = fs::remove_file(path);
            return Err(e.into());
        }

        debug!(app = %self.app_name, %area, key, bytes = value.len(), "entry written");
        Ok(())
    }

    /// Total size (caller holds the area lock)
    fn total_size_locked(&self, area: AreaKind) -> Result<u64> {
        let mut total = 0u64;
        for file in self.list_files(area)? {
            match fs::metadata(&file) {
                Ok(meta) => total += meta.len(),
                // Removed out from under us; it no longer counts
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(total)
    }

    /// Regular files directly under the area root
    fn list_files(&self, area: AreaKind) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(self.area_path(area))? {
            let entry = entry?;
            // Follows symlinks, so a linked entry file still counts
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Shared lock for an area root, created on first use
fn area_lock(area_path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    // "./data" and "/cwd/data" must map to the same lock
    let key = if area_path.is_absolute() {
        area_path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(area_path))
            .unwrap_or_else(|_| area_path.to_path_buf())
    };

    let mut locks = LOCKS.get_or_init(|| Mutex::new(HashMap::new())).lock();
    Arc::clone(locks.entry(key).or_default())
}

/// A key or app name must be usable as a single path component
fn is_valid_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| matches!(c, '/' | '\\' | '\0'))
}

fn map_not_found(err: std::io::Error, key: &str) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::not_found(key),
        _ => StorageError::Io(err),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
