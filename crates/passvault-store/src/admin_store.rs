//! The singleton administrator record.
//!
//! The admin file (`admin/admin-data.csv`) is a single data line
//! `email,secret` with no header. The secret field is an encrypted
//! token after migration, but may still hold legacy plaintext on
//! installations that predate encryption; reads go through the
//! classifier to handle both.
//!
//! The record is created lazily: the first authentication attempt
//! against a missing file writes the default credentials (`admin` /
//! `admin`, secret encrypted) and compares against those.

use tracing::{debug, info, warn};

use passvault_crypto::{SecretCipher, looks_encrypted};

use crate::error::StoreResult;
use crate::paths::DataDir;

/// Default administrator email, used until the credential is changed.
const DEFAULT_EMAIL: &str = "admin";

/// Default administrator password.
const DEFAULT_PASSWORD: &str = "admin";

/// Minimum accepted length for a new admin password.
const MIN_PASSWORD_LEN: usize = 3;

/// Read and mutate the administrator record.
#[derive(Debug, Clone)]
pub struct AdminStore {
    dir: DataDir,
    cipher: SecretCipher,
}

impl AdminStore {
    /// Create a store over `dir` using `cipher` for the secret field.
    pub fn new(dir: DataDir, cipher: SecretCipher) -> Self {
        Self { dir, cipher }
    }

    /// Authenticate the administrator.
    ///
    /// Email comparison is exact (case-sensitive). If no admin file
    /// exists yet, one is created with the default credentials first.
    pub fn authenticate(&self, email: &str, password: &str) -> bool {
        let (stored_email, stored_password) = match self.read_credentials() {
            Ok(Some(pair)) => pair,
            Ok(None) => {
                // Lazy creation with the known defaults.
                if let Err(e) = self.write_credentials(DEFAULT_EMAIL, DEFAULT_PASSWORD) {
                    warn!(error = %e, "could not create default admin record");
                    return false;
                }
                info!("created default admin record");
                (DEFAULT_EMAIL.to_string(), DEFAULT_PASSWORD.to_string())
            }
            Err(e) => {
                warn!(error = %e, "could not read admin record");
                return false;
            }
        };

        email == stored_email && password == stored_password
    }

    /// The stored admin email, or the default if the record is absent.
    pub fn email(&self) -> String {
        match self.read_credentials() {
            Ok(Some((email, _))) => email,
            Ok(None) => DEFAULT_EMAIL.to_string(),
            Err(e) => {
                warn!(error = %e, "could not read admin record; using default email");
                DEFAULT_EMAIL.to_string()
            }
        }
    }

    /// The stored admin password (decrypted), or the default if the
    /// record is absent.
    pub fn password(&self) -> String {
        match self.read_credentials() {
            Ok(Some((_, password))) => password,
            Ok(None) => DEFAULT_PASSWORD.to_string(),
            Err(e) => {
                warn!(error = %e, "could not read admin record; using default password");
                DEFAULT_PASSWORD.to_string()
            }
        }
    }

    /// Replace the admin credentials after verifying the current password.
    ///
    /// Rejects an empty new email, an empty or too-short new password,
    /// and a wrong current password.
    pub fn change_credentials(&self, current_password: &str, new_email: &str, new_password: &str) -> bool {
        let new_email = new_email.trim();

        if new_email.is_empty() {
            debug!("credential change rejected: empty email");
            return false;
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            debug!("credential change rejected: password below minimum length");
            return false;
        }
        if current_password != self.password() {
            debug!("credential change rejected: current password mismatch");
            return false;
        }

        match self.write_credentials(new_email, new_password) {
            Ok(()) => {
                info!("admin credentials changed");
                true
            }
            Err(e) => {
                warn!(error = %e, "could not rewrite admin record");
                false
            }
        }
    }

    /// Read the raw `email,secret` pair without decrypting the secret.
    ///
    /// Returns `Ok(None)` if the file is absent, empty, or the line has
    /// fewer than two fields.
    pub(crate) fn read_raw(&self) -> StoreResult<Option<(String, String)>> {
        let path = self.dir.admin_file();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let Some(line) = content.lines().next().filter(|l| !l.trim().is_empty()) else {
            return Ok(None);
        };

        let mut parts = line.splitn(2, ',');
        match (parts.next(), parts.next()) {
            (Some(email), Some(secret)) => Ok(Some((email.to_string(), secret.to_string()))),
            _ => Ok(None),
        }
    }

    /// Write `email,encrypt(password)` as the single admin data line.
    pub(crate) fn write_credentials(&self, email: &str, password: &str) -> StoreResult<()> {
        self.dir.ensure_layout()?;
        let token = self.cipher.encrypt_str(password)?;
        std::fs::write(self.dir.admin_file(), format!("{email},{token}\n"))?;
        debug!("rewrote admin record");
        Ok(())
    }

    /// Read and decode the stored credential pair, decrypting the secret
    /// when it is in encrypted form.
    fn read_credentials(&self) -> StoreResult<Option<(String, String)>> {
        let Some((email, secret)) = self.read_raw()? else {
            return Ok(None);
        };

        let password = if looks_encrypted(&secret) {
            self.cipher.decrypt_or_original(&secret)
        } else {
            secret
        };

        Ok(Some((email, password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passvault_crypto::{EmbeddedKeyProvider, MasterKeyProvider};

    fn test_store() -> (tempfile::TempDir, AdminStore) {
        let tmp = tempfile::tempdir().unwrap();
        let cipher = SecretCipher::new(EmbeddedKeyProvider.master_key().unwrap());
        let store = AdminStore::new(DataDir::new(tmp.path()), cipher);
        (tmp, store)
    }

    #[test]
    fn first_authentication_creates_default_record() {
        let (tmp, store) = test_store();
        assert!(store.authenticate("admin", "admin"));

        let content = std::fs::read_to_string(tmp.path().join("admin/admin-data.csv")).unwrap();
        let secret = content.trim_end().strip_prefix("admin,").unwrap();
        assert!(looks_encrypted(secret));
    }

    #[test]
    fn wrong_credentials_rejected() {
        let (_tmp, store) = test_store();
        assert!(store.authenticate("admin", "admin"));

        assert!(!store.authenticate("admin", "wrong"));
        assert!(!store.authenticate("ADMIN", "admin")); // email is case-sensitive
    }

    #[test]
    fn legacy_plaintext_record_still_authenticates() {
        let (tmp, store) = test_store();
        store.dir.ensure_layout().unwrap();
        std::fs::write(tmp.path().join("admin/admin-data.csv"), "boss@x.com,oldpw\n").unwrap();

        assert!(store.authenticate("boss@x.com", "oldpw"));
        assert_eq!(store.email(), "boss@x.com");
        assert_eq!(store.password(), "oldpw");
    }

    #[test]
    fn change_credentials_verifies_current_password() {
        let (_tmp, store) = test_store();
        assert!(store.authenticate("admin", "admin"));

        assert!(!store.change_credentials("wrong", "new@x.com", "newpass"));
        assert!(!store.change_credentials("admin", "", "newpass"));
        assert!(!store.change_credentials("admin", "new@x.com", "ab")); // 2 chars

        assert!(store.change_credentials("admin", "new@x.com", "newpass"));
        assert!(store.authenticate("new@x.com", "newpass"));
        assert!(!store.authenticate("admin", "admin"));
    }

    #[test]
    fn accessors_fall_back_to_defaults_when_absent() {
        let (_tmp, store) = test_store();
        assert_eq!(store.email(), "admin");
        assert_eq!(store.password(), "admin");
    }
}
