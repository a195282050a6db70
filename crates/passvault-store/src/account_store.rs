//! Account directory: registration, authentication, lookup, deletion.
//!
//! Accounts live in one flat table (`users/user-data.csv`) with the
//! header `Username,Email,PasswordHash`. Lookups are linear scans with
//! case-insensitive matching on username or email; both fields are
//! unique case-insensitively across the directory. Login passwords are
//! stored only as salted one-way hashes.
//!
//! Public operations never return errors: validation failures and I/O
//! problems are logged and folded into `false` / `None` / empty returns.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use passvault_crypto::hash;

use crate::csv;
use crate::error::StoreResult;
use crate::paths::DataDir;
use crate::roles::Role;
use crate::session::Session;
use crate::vault_store::VAULT_FILE_HEADER;

/// Header line of the account directory table.
pub(crate) const ACCOUNT_FILE_HEADER: &str = "Username,Email,PasswordHash";

/// Minimum accepted password length at registration.
const MIN_PASSWORD_LEN: usize = 6;

/// One row of the account directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique login name (case-insensitive uniqueness).
    pub username: String,
    /// Unique contact address (case-insensitive uniqueness).
    pub email: String,
    /// Stored credential hash, `base64(salt):base64(digest)`.
    pub password_hash: String,
}

/// Load, search, and mutate the account directory.
#[derive(Debug, Clone)]
pub struct AccountStore {
    dir: DataDir,
}

impl AccountStore {
    /// Create a store over `dir`, creating the directory layout if needed.
    pub fn new(dir: DataDir) -> StoreResult<Self> {
        dir.ensure_layout()?;
        info!(root = %dir.root().display(), "account store ready");
        Ok(Self { dir })
    }

    /// Register a new account.
    ///
    /// Rejects empty fields, a malformed email, a password shorter than
    /// six characters, and any case-insensitive collision on username or
    /// email. Creates the account's empty vault file on success.
    pub fn register(&self, username: &str, email: &str, password: &str) -> bool {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() || email.is_empty() || password.is_empty() {
            debug!("registration rejected: empty field");
            return false;
        }
        if !email.contains('@') {
            debug!("registration rejected: malformed email");
            return false;
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            debug!("registration rejected: password below minimum length");
            return false;
        }
        if self.find_by_username(username).is_some() || self.find_by_email(email).is_some() {
            debug!(username, "registration rejected: username or email already taken");
            return false;
        }

        let password_hash = match hash::create_hash(password) {
            Ok(h) => h,
            Err(e) => {
                warn!(error = %e, "registration failed: could not hash password");
                return false;
            }
        };

        let record = AccountRecord {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };

        match self.append_record(record) {
            Ok(()) => {
                info!(username, "account registered");
                true
            }
            Err(e) => {
                warn!(error = %e, "registration failed: could not persist account");
                false
            }
        }
    }

    /// Authenticate by username or email.
    ///
    /// Returns an owned [`Session`] on success; the caller threads it
    /// explicitly wherever an authenticated account is required.
    pub fn authenticate(&self, username_or_email: &str, password: &str) -> Option<Session> {
        let account = self
            .find_by_username(username_or_email)
            .or_else(|| self.find_by_email(username_or_email))?;

        if hash::verify(password, &account.password_hash) {
            info!(username = %account.username, "authentication succeeded");
            Some(Session::new(account, Role::Normal))
        } else {
            debug!(username = %account.username, "authentication failed: bad password");
            None
        }
    }

    /// Find an account by username (case-insensitive, first match).
    pub fn find_by_username(&self, username: &str) -> Option<AccountRecord> {
        self.load_or_empty()
            .into_iter()
            .find(|a| a.username.eq_ignore_ascii_case(username))
    }

    /// Find an account by email (case-insensitive, first match).
    pub fn find_by_email(&self, email: &str) -> Option<AccountRecord> {
        self.load_or_empty()
            .into_iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    /// All registered accounts, in file order.
    pub fn list(&self) -> Vec<AccountRecord> {
        self.load_or_empty()
    }

    /// Delete the account matching `email` (case-insensitive) along with
    /// its vault file. Returns `false` if no such account exists or the
    /// rewrite fails.
    pub fn delete(&self, email: &str) -> bool {
        let mut accounts = self.load_or_empty();
        let Some(position) = accounts.iter().position(|a| a.email.eq_ignore_ascii_case(email))
        else {
            debug!(email, "delete rejected: no such account");
            return false;
        };

        let removed = accounts.remove(position);

        if let Err(e) = self.save_all(&accounts) {
            warn!(error = %e, "delete failed: could not rewrite account table");
            return false;
        }

        // Remove the now-orphaned vault file. A failure here is logged
        // but does not undo the account deletion.
        let vault_file = self.dir.vault_file(&removed.username);
        if vault_file.exists() {
            match std::fs::remove_file(&vault_file) {
                Ok(()) => debug!(path = %vault_file.display(), "removed orphaned vault file"),
                Err(e) => warn!(error = %e, path = %vault_file.display(), "could not remove vault file"),
            }
        }

        info!(username = %removed.username, "account deleted");
        true
    }

    fn load_or_empty(&self) -> Vec<AccountRecord> {
        match self.load_all() {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "could not load account table; treating as empty");
                Vec::new()
            }
        }
    }

    fn load_all(&self) -> StoreResult<Vec<AccountRecord>> {
        let rows = csv::load_rows(&self.dir.user_data_file(), ACCOUNT_FILE_HEADER, 3)?;
        let accounts = rows
            .into_iter()
            .map(|fields| {
                let mut fields = fields.into_iter();
                AccountRecord {
                    username: fields.next().unwrap_or_default(),
                    email: fields.next().unwrap_or_default(),
                    password_hash: fields.next().unwrap_or_default(),
                }
            })
            .collect::<Vec<AccountRecord>>();

        debug!(count = accounts.len(), "loaded account table");
        Ok(accounts)
    }

    fn append_record(&self, record: AccountRecord) -> StoreResult<()> {
        let mut accounts = self.load_all()?;
        let username = record.username.clone();
        accounts.push(record);
        self.save_all(&accounts)?;

        // Every account owns a vault file; create it header-only now so
        // the first load after registration is not a lazy-create path.
        let vault_file = self.dir.vault_file(&username);
        if !vault_file.exists() {
            csv::create_header_only(&vault_file, VAULT_FILE_HEADER)?;
        }
        Ok(())
    }

    fn save_all(&self, accounts: &[AccountRecord]) -> StoreResult<()> {
        let rows: Vec<Vec<String>> = accounts
            .iter()
            .map(|a| vec![a.username.clone(), a.email.clone(), a.password_hash.clone()])
            .collect();
        csv::save_rows(&self.dir.user_data_file(), ACCOUNT_FILE_HEADER, &rows)?;
        debug!(count = accounts.len(), "rewrote account table");
        Ok(())
    }
}
