//! Storage Areas
//!
//! The two independent namespaces every application gets.

use std::fmt;

/// 50 MiB
pub const LOCAL_CAPACITY: u64 = 52_428_800;

/// 10 MiB
pub const SESSION_CAPACITY: u64 = 10_485_760;

/// One of the two storage areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// Durable, larger quota
    Local,

    /// Semantically temporary, smaller quota
    Session,
}

impl AreaKind {
    /// Both areas, in the order their roots are created
    pub const ALL: [AreaKind; 2] = [AreaKind::Local, AreaKind::Session];

    /// Directory name under the MemStorage root
    pub fn dir_name(self) -> &'static str {
        match self {
            AreaKind::Local => "LocalStorage",
            AreaKind::Session => "SessionStorage",
        }
    }

    /// Capacity ceiling used when the config doesn't override it
    pub fn default_capacity(self) -> u64 {
        match self {
            AreaKind::Local => LOCAL_CAPACITY,
            AreaKind::Session => SESSION_CAPACITY,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            AreaKind::Local => 0,
            AreaKind::Session => 1,
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaKind::Local => f.write_str("local storage"),
            AreaKind::Session => f.write_str("session storage"),
        }
    }
}
