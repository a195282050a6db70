//! One-time upgrade of a legacy plaintext admin credential.
//!
//! Installations that predate secret encryption stored the admin
//! password in the clear. This routine runs at process start, before
//! any admin authentication, and rewrites the record through the cipher
//! exactly once. Re-running it any number of times afterwards leaves
//! the file byte-identical; idempotence is a hard invariant here, not
//! an optimization.

use tracing::{debug, info, warn};

use passvault_crypto::looks_encrypted;

use crate::admin_store::AdminStore;

/// Encrypt the admin secret in place if it is still legacy plaintext.
///
/// - No admin file: nothing to migrate (the record is created lazily
///   with encrypted defaults on first authentication).
/// - Secret already classifies as encrypted: no-op, file untouched.
/// - Otherwise: rewrite `email,encrypt(secret)` with the same email.
///
/// A plaintext secret that happens to look like a valid encrypted token
/// is left untouched; that ambiguity is inherent to the classifier.
pub fn migrate_admin_credential(admin: &AdminStore) {
    let (email, secret) = match admin.read_raw() {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            debug!("no admin record on disk; nothing to migrate");
            return;
        }
        Err(e) => {
            warn!(error = %e, "could not read admin record during migration");
            return;
        }
    };

    if looks_encrypted(&secret) {
        debug!("admin secret already encrypted; migration is a no-op");
        return;
    }

    match admin.write_credentials(&email, &secret) {
        Ok(()) => info!("admin credential migrated to encrypted format"),
        Err(e) => warn!(error = %e, "admin credential migration failed"),
    }
}
