//! Flat-file record store for passvault.
//!
//! Persists the three record kinds of the system — the account
//! directory, per-account secret vaults, and the singleton administrator
//! record — as plain comma-delimited text files under one data
//! directory. Login credentials are stored as one-way hashes; vault and
//! admin secrets as encrypted tokens from [`passvault_crypto`].
//!
//! All operations are synchronous and blocking. Files are rewritten
//! whole on every mutation; there is no locking between processes, and
//! the last writer wins. No public operation returns an error: failures
//! are logged via `tracing` and folded into the return value.
//!
//! # Modules
//!
//! - [`paths`] — fixed data directory layout.
//! - [`account_store`] — registration, authentication, lookup, deletion.
//! - [`session`] — explicit authenticated-session values.
//! - [`roles`] — role enumeration and capability lookup.
//! - [`vault_store`] — per-account encrypted secret vaults.
//! - [`admin_store`] — the singleton administrator record.
//! - [`migration`] — one-time plaintext-to-encrypted admin upgrade.
//! - [`error`] — unified error types.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use passvault_crypto::master_cipher;
//! use passvault_store::{AccountStore, AdminStore, DataDir, VaultStore, migrate_admin_credential};
//!
//! # fn example() -> passvault_store::StoreResult<()> {
//! let dir = DataDir::new("data");
//! let cipher = master_cipher().clone();
//!
//! // Startup: upgrade a legacy plaintext admin credential, if any.
//! let admin = AdminStore::new(dir.clone(), cipher.clone());
//! migrate_admin_credential(&admin);
//!
//! // Accounts and vaults.
//! let accounts = AccountStore::new(dir.clone())?;
//! accounts.register("alice", "alice@x.com", "secret1");
//!
//! if let Some(session) = accounts.authenticate("alice", "secret1") {
//!     let vaults = VaultStore::new(dir, cipher);
//!     let entries = vaults.load(session.username());
//!     println!("{} entries", entries.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod account_store;
pub mod admin_store;
mod csv;
pub mod error;
pub mod migration;
pub mod paths;
pub mod roles;
pub mod session;
pub mod vault_store;

// Re-export the most commonly used types at the crate root.
pub use account_store::{AccountRecord, AccountStore};
pub use admin_store::AdminStore;
pub use error::{StoreError, StoreResult};
pub use migration::migrate_admin_credential;
pub use paths::DataDir;
pub use roles::{Capabilities, Role};
pub use session::Session;
pub use vault_store::{VaultEntry, VaultStore};
