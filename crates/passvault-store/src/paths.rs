//! Data directory layout.
//!
//! All record files live under a single root directory with fixed
//! relative paths:
//!
//! ```text
//! <root>/users/user-data.csv            account directory
//! <root>/passwords/passwords_<user>.csv per-account vault
//! <root>/admin/admin-data.csv           administrator record
//! ```
//!
//! Nothing in this subsystem takes file locations from the environment;
//! collaborators choose the root once and hand it to the stores.

use std::path::{Path, PathBuf};

use crate::error::StoreResult;

/// File name of the account directory table.
const USER_DATA_FILE: &str = "user-data.csv";

/// File name of the administrator record.
const ADMIN_DATA_FILE: &str = "admin-data.csv";

/// Root of the record store's directory tree.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Create a handle rooted at `root`. No filesystem access happens
    /// until [`ensure_layout`](DataDir::ensure_layout) or a store
    /// operation touches a file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the directory tree if any part of it is missing.
    pub fn ensure_layout(&self) -> StoreResult<()> {
        for dir in [self.users_dir(), self.passwords_dir(), self.admin_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
                tracing::debug!(path = %dir.display(), "created data directory");
            }
        }
        Ok(())
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    fn passwords_dir(&self) -> PathBuf {
        self.root.join("passwords")
    }

    fn admin_dir(&self) -> PathBuf {
        self.root.join("admin")
    }

    /// Path of the account directory table.
    pub fn user_data_file(&self) -> PathBuf {
        self.users_dir().join(USER_DATA_FILE)
    }

    /// Path of one account's vault file.
    pub fn vault_file(&self, username: &str) -> PathBuf {
        self.passwords_dir().join(format!("passwords_{username}.csv"))
    }

    /// Path of the administrator record.
    pub fn admin_file(&self) -> PathBuf {
        self.admin_dir().join(ADMIN_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths_are_fixed() {
        let dir = DataDir::new("/data");
        assert_eq!(dir.user_data_file(), Path::new("/data/users/user-data.csv"));
        assert_eq!(
            dir.vault_file("alice"),
            Path::new("/data/passwords/passwords_alice.csv")
        );
        assert_eq!(dir.admin_file(), Path::new("/data/admin/admin-data.csv"));
    }

    #[test]
    fn ensure_layout_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path().join("store"));
        dir.ensure_layout().unwrap();

        assert!(tmp.path().join("store/users").is_dir());
        assert!(tmp.path().join("store/passwords").is_dir());
        assert!(tmp.path().join("store/admin").is_dir());

        // Re-running is a no-op.
        dir.ensure_layout().unwrap();
    }
}
