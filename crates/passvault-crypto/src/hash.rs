//! One-way login credential hashing.
//!
//! Login passwords are never stored reversibly. Each hash draws a fresh
//! 16-byte random salt and computes SHA-256 over salt ‖ password, stored
//! as `base64(salt):base64(digest)`. Verification recomputes the digest
//! with the stored salt and compares for exact equality.
//!
//! The digest comparison is a plain string `==`, not constant-time. This
//! is a known timing-channel gap carried over from the source design;
//! see the security notes in DESIGN.md.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ring::digest;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{CryptoError, CryptoResult};

/// Length of the per-credential random salt in bytes.
pub const SALT_LEN: usize = 16;

/// Separator between the encoded salt and the encoded digest.
const SEPARATOR: char = ':';

/// Hash `password` with a fresh random salt.
///
/// Returns a storable string of the form `base64(salt):base64(digest)`.
///
/// # Errors
///
/// Returns [`CryptoError::RandomFailed`] if the system CSPRNG fails.
pub fn create_hash(password: &str) -> CryptoResult<String> {
    let rng = SystemRandom::new();

    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| CryptoError::RandomFailed {
        reason: "failed to generate random salt".into(),
    })?;

    let encoded_digest = digest_with_salt(&salt, password);
    Ok(format!("{}{SEPARATOR}{}", BASE64.encode(salt), encoded_digest))
}

/// Verify `password` against a stored `salt:digest` pair.
///
/// Returns `false` (never an error) if the stored value does not split
/// into exactly two parts, if the salt fails to decode, or if the
/// recomputed digest differs.
pub fn verify(password: &str, stored: &str) -> bool {
    let mut parts = stored.split(SEPARATOR);
    let (Some(salt_part), Some(digest_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let Ok(salt) = BASE64.decode(salt_part) else {
        return false;
    };

    // Direct string compare; not constant-time.
    digest_with_salt(&salt, password) == digest_part
}

/// SHA-256 over salt ‖ password, base64-encoded.
fn digest_with_salt(salt: &[u8], password: &str) -> String {
    let mut ctx = digest::Context::new(&digest::SHA256);
    ctx.update(salt);
    ctx.update(password.as_bytes());
    BASE64.encode(ctx.finish().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let stored = create_hash("secret1").unwrap();
        assert!(verify("secret1", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = create_hash("secret1").unwrap();
        assert!(!verify("secret2", &stored));
        assert!(!verify("", &stored));
    }

    #[test]
    fn salts_are_unique() {
        let a = create_hash("same").unwrap();
        let b = create_hash("same").unwrap();
        assert_ne!(a, b);
        assert!(verify("same", &a));
        assert!(verify("same", &b));
    }

    #[test]
    fn stored_format_is_salt_colon_digest() {
        let stored = create_hash("pw").unwrap();
        let parts: Vec<&str> = stored.split(':').collect();
        assert_eq!(parts.len(), 2);

        assert_eq!(BASE64.decode(parts[0]).unwrap().len(), SALT_LEN);
        assert_eq!(BASE64.decode(parts[1]).unwrap().len(), 32); // SHA-256
    }

    #[test]
    fn malformed_stored_value_returns_false() {
        assert!(!verify("pw", ""));
        assert!(!verify("pw", "nocolon"));
        assert!(!verify("pw", "a:b:c"));
        assert!(!verify("pw", "not base64:AAAA"));
    }

    #[test]
    fn empty_password_roundtrips() {
        let stored = create_hash("").unwrap();
        assert!(verify("", &stored));
        assert!(!verify("x", &stored));
    }
}
