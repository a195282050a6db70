//! Per-account secret vaults.
//!
//! Each account owns one vault file (`passwords/passwords_<user>.csv`)
//! holding `website,username,secret` rows, where the secret field is an
//! encrypted token — unlike login credentials, the owner must be able
//! to read these values back.
//!
//! Every save rewrites the whole file and re-protects every secret
//! through the cipher: each stored token gets a fresh IV, and a legacy
//! plaintext secret (anything the cipher cannot decrypt) is encrypted
//! on its way to disk. There is no partial or in-place update.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use passvault_crypto::SecretCipher;

use crate::csv;
use crate::error::StoreResult;
use crate::paths::DataDir;

/// Header line of a per-account vault file.
pub(crate) const VAULT_FILE_HEADER: &str = "Website/App Name,Username/Email,Password";

/// One secret entry owned by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    /// The site or application this secret belongs to.
    pub website: String,
    /// Login name used at that site.
    pub username: String,
    /// The protected value: an encrypted token in storage. May hold
    /// legacy plaintext in memory until the next save re-protects it.
    pub secret: String,
}

impl VaultEntry {
    /// Create an entry by encrypting `plaintext` immediately.
    pub fn protect(
        website: impl Into<String>,
        username: impl Into<String>,
        plaintext: &str,
        cipher: &SecretCipher,
    ) -> StoreResult<Self> {
        Ok(Self {
            website: website.into(),
            username: username.into(),
            secret: cipher.encrypt_str(plaintext)?,
        })
    }

    /// Decrypt the secret for display.
    ///
    /// Falls back to the stored value unchanged when it does not
    /// decrypt, so a corrupted or misclassified secret surfaces as-is
    /// rather than failing the whole view.
    pub fn reveal(&self, cipher: &SecretCipher) -> String {
        cipher.decrypt_or_original(&self.secret)
    }
}

/// Load and rewrite per-account vault files.
#[derive(Debug, Clone)]
pub struct VaultStore {
    dir: DataDir,
    cipher: SecretCipher,
}

impl VaultStore {
    /// Create a store over `dir` using `cipher` for secret protection.
    pub fn new(dir: DataDir, cipher: SecretCipher) -> Self {
        Self { dir, cipher }
    }

    /// Load all entries owned by `owner`.
    ///
    /// A missing vault file is not an error: it is created header-only
    /// and an empty list is returned. Secrets are returned as stored
    /// (encrypted tokens); use [`VaultEntry::reveal`] to read them.
    pub fn load(&self, owner: &str) -> Vec<VaultEntry> {
        let path = self.dir.vault_file(owner);
        let rows = match csv::load_rows(&path, VAULT_FILE_HEADER, 3) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, owner, "could not load vault file; treating as empty");
                return Vec::new();
            }
        };

        let entries: Vec<VaultEntry> = rows
            .into_iter()
            .filter(|fields| !fields[0].is_empty())
            .map(|fields| {
                let mut fields = fields.into_iter();
                VaultEntry {
                    website: fields.next().unwrap_or_default(),
                    username: fields.next().unwrap_or_default(),
                    secret: fields.next().unwrap_or_default(),
                }
            })
            .collect();

        debug!(owner, count = entries.len(), "loaded vault entries");
        entries
    }

    /// Rewrite `owner`'s entire vault file with `entries`.
    ///
    /// Every secret passes through the cipher again: decrypt (falling
    /// back to the original value for legacy plaintext) and re-encrypt
    /// with a fresh IV. Failures are logged; the operation itself
    /// reports nothing back to the caller.
    pub fn save(&self, owner: &str, entries: &[VaultEntry]) {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| {
                vec![
                    entry.website.clone(),
                    entry.username.clone(),
                    self.reprotect(&entry.secret),
                ]
            })
            .collect();

        let path = self.dir.vault_file(owner);
        match csv::save_rows(&path, VAULT_FILE_HEADER, &rows) {
            Ok(()) => debug!(owner, count = entries.len(), "rewrote vault file"),
            Err(e) => warn!(error = %e, owner, "could not rewrite vault file"),
        }
    }

    /// Decrypt-then-encrypt one secret for storage.
    ///
    /// Keeps the stored value unchanged only if re-encryption itself
    /// fails, which mirrors the encrypt-or-passthrough policy of the
    /// rest of the system.
    fn reprotect(&self, secret: &str) -> String {
        let plaintext = self.cipher.decrypt_or_original(secret);
        match self.cipher.encrypt_str(&plaintext) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not re-encrypt secret; storing value unchanged");
                secret.to_string()
            }
        }
    }
}
