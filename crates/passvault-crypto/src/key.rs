//! Master key derivation via PBKDF2-HMAC-SHA256.
//!
//! The master key is a pure function of two constants embedded in the
//! binary: a passphrase and a fixed salt. Every process therefore derives
//! the identical 256-bit key, which is what makes previously written
//! secret tokens readable across restarts. The key is never persisted.
//!
//! # Security Notes
//!
//! - An embedded passphrase means anyone with the binary can derive the
//!   key. This is a deliberate, demo-grade trade-off inherited from the
//!   application's threat model. The [`MasterKeyProvider`] trait is the
//!   single seam through which a secret-store-backed provider can be
//!   swapped in later without touching the cipher.
//! - Derivation runs at most once per process; the resulting cipher is
//!   cached in a `OnceLock` for the remainder of the process lifetime.
//!   There is no rotation or invalidation path.

use std::sync::OnceLock;

use ring::pbkdf2;

use crate::cipher::SecretCipher;
use crate::error::{CryptoError, CryptoResult};

/// Length of the derived master key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count used for master key stretching.
const PBKDF2_ITERATIONS: u32 = 65_536;

/// PBKDF2 algorithm: HMAC-SHA256.
static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Embedded master passphrase. Changing this orphans every stored secret.
const MASTER_PASSPHRASE: &str = "S3cur3P@ssw0rdM@n@ger";

/// Fixed salt mixed into master key derivation.
const MASTER_SALT: &[u8] = b"PasswordManagerSalt123!";

/// A derived 256-bit symmetric master key.
///
/// Owned exclusively by [`SecretCipher`]; never serialized or logged.
#[derive(Clone)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    /// Wrap raw key bytes. Intended for providers and tests.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key material.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("MasterKey(..)")
    }
}

/// Source of the master key used by [`SecretCipher`].
///
/// The default implementation derives from embedded constants; a future
/// implementation may fetch from an OS keychain or secret store without
/// changing the cipher's contract.
pub trait MasterKeyProvider: Send + Sync {
    /// Produce the master key. Must be deterministic per provider.
    fn master_key(&self) -> CryptoResult<MasterKey>;
}

/// Derives the master key from the constants embedded in the binary.
#[derive(Debug, Default)]
pub struct EmbeddedKeyProvider;

impl MasterKeyProvider for EmbeddedKeyProvider {
    fn master_key(&self) -> CryptoResult<MasterKey> {
        let iterations = std::num::NonZeroU32::new(PBKDF2_ITERATIONS).ok_or_else(|| {
            CryptoError::KeyDerivationFailed {
                reason: "PBKDF2 iteration count must be non-zero".into(),
            }
        })?;

        let mut key = [0u8; KEY_LEN];
        pbkdf2::derive(
            PBKDF2_ALG,
            iterations,
            MASTER_SALT,
            MASTER_PASSPHRASE.as_bytes(),
            &mut key,
        );

        tracing::debug!("derived master key from embedded constants");
        Ok(MasterKey(key))
    }
}

/// The process-wide cipher, derived lazily on first use.
static MASTER_CIPHER: OnceLock<SecretCipher> = OnceLock::new();

/// Return the process-wide [`SecretCipher`], deriving the master key on
/// first call.
///
/// # Panics
///
/// Panics if key derivation fails. An unusable master key would make
/// every stored secret unrecoverable, so startup must not proceed.
pub fn master_cipher() -> &'static SecretCipher {
    MASTER_CIPHER.get_or_init(|| {
        let key = EmbeddedKeyProvider
            .master_key()
            .expect("master key derivation failed; stored secrets would be unrecoverable");
        SecretCipher::new(key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let k1 = EmbeddedKeyProvider.master_key().unwrap();
        let k2 = EmbeddedKeyProvider.master_key().unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn debug_never_prints_key_material() {
        let key = EmbeddedKeyProvider.master_key().unwrap();
        assert_eq!(format!("{key:?}"), "MasterKey(..)");
    }

    #[test]
    fn master_cipher_is_cached() {
        let a = master_cipher() as *const SecretCipher;
        let b = master_cipher() as *const SecretCipher;
        assert_eq!(a, b);
    }
}
