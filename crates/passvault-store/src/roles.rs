//! Account roles and their capabilities.
//!
//! The role is not persisted in the account table; it is an in-memory
//! classification collaborators attach to a session. Capabilities are a
//! flat lookup per role rather than a type hierarchy.

use serde::{Deserialize, Serialize};

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrative access, including account management.
    Admin,
    /// A registered account with a personal vault.
    Normal,
    /// Browse-only access; no vault of its own.
    Guest,
}

impl Role {
    /// String representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Normal => "normal",
            Self::Guest => "guest",
        }
    }

    /// Parse from a string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "normal" => Some(Self::Normal),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }

    /// What this role may do with vault entries.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Admin => Capabilities {
                can_edit: true,
                can_delete: true,
                max_entries: None,
            },
            Self::Normal => Capabilities {
                can_edit: true,
                can_delete: true,
                max_entries: Some(100),
            },
            Self::Guest => Capabilities {
                can_edit: false,
                can_delete: false,
                max_entries: Some(0),
            },
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-role vault permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether entries may be added or modified.
    pub can_edit: bool,
    /// Whether entries may be removed.
    pub can_delete: bool,
    /// Upper bound on stored entries; `None` means unlimited.
    pub max_entries: Option<usize>,
}

impl Capabilities {
    /// Whether another entry may be stored given `current` entries exist.
    pub fn allows_more(&self, current: usize) -> bool {
        self.can_edit && self.max_entries.is_none_or(|max| current < max)
    }
}
