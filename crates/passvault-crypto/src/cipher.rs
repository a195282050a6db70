//! Reversible secret encryption and the encrypted-form classifier.
//!
//! Secrets that their owner must later read back (vault passwords, the
//! admin credential) are sealed with AES-256-GCM under the master key and
//! stored as a single transportable text token:
//!
//! ```text
//! token = base64( IV (12 bytes) ‖ ciphertext ‖ tag (16 bytes) )
//! ```
//!
//! A fresh random IV is generated for every call, so encrypting the same
//! plaintext twice yields different tokens that both decrypt back to the
//! same value.
//!
//! [`looks_encrypted`] is the best-effort heuristic that distinguishes
//! tokens in this format from legacy plaintext. A plaintext value that
//! happens to be valid base64 of sufficient length is misclassified as
//! already encrypted; this ambiguity is inherent to the format and is
//! deliberately not resolved with version tagging, which would break
//! compatibility with existing files.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ring::aead::{self, Aad, BoundKey, Nonce, NonceSequence, SealingKey, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{CryptoError, CryptoResult};
use crate::key::MasterKey;

/// Length of the per-call random IV in bytes (96 bits).
pub const IV_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Minimum plausible decoded length of a secret token: IV plus tag.
/// Anything shorter cannot have been produced by [`SecretCipher::encrypt`].
pub const MIN_TOKEN_BYTES: usize = IV_LEN + TAG_LEN;

/// AES-256-GCM algorithm from `ring`.
static AEAD_ALG: &aead::Algorithm = &aead::AES_256_GCM;

/// A nonce sequence that yields exactly one nonce and then errors.
///
/// `ring` binds keys to a [`NonceSequence`]; since every seal/open uses a
/// fresh key binding with its own random IV, this wrapper guarantees each
/// binding is used at most once.
struct SingleNonce(Option<[u8; IV_LEN]>);

impl SingleNonce {
    fn new(bytes: [u8; IV_LEN]) -> Self {
        Self(Some(bytes))
    }
}

impl NonceSequence for SingleNonce {
    fn advance(&mut self) -> std::result::Result<Nonce, ring::error::Unspecified> {
        self.0
            .take()
            .map(Nonce::assume_unique_for_key)
            .ok_or(ring::error::Unspecified)
    }
}

/// Symmetric cipher codec bound to the master key.
///
/// Cheap to clone; the stores each hold their own copy.
#[derive(Clone)]
pub struct SecretCipher {
    key: MasterKey,
}

impl SecretCipher {
    /// Create a cipher from a derived master key.
    pub fn new(key: MasterKey) -> Self {
        Self { key }
    }

    /// Encrypt `plaintext` and return the encoded secret token.
    ///
    /// Every call draws a fresh random IV, so identical plaintexts yield
    /// different tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailed`] if the RNG or the AEAD
    /// seal fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<String> {
        let rng = SystemRandom::new();

        let mut iv = [0u8; IV_LEN];
        rng.fill(&mut iv).map_err(|_| CryptoError::EncryptionFailed {
            reason: "failed to generate random IV".into(),
        })?;

        let unbound = UnboundKey::new(AEAD_ALG, self.key.as_bytes()).map_err(|_| {
            CryptoError::EncryptionFailed {
                reason: "failed to create AES-256-GCM key".into(),
            }
        })?;
        let mut sealing_key = SealingKey::new(unbound, SingleNonce::new(iv));

        // Seal in place; ring appends the authentication tag.
        let mut in_out = plaintext.to_vec();
        sealing_key
            .seal_in_place_append_tag(Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::EncryptionFailed {
                reason: "seal_in_place failed".into(),
            })?;

        // One transportable token: IV first, then ciphertext and tag.
        let mut combined = Vec::with_capacity(IV_LEN + in_out.len());
        combined.extend_from_slice(&iv);
        combined.extend_from_slice(&in_out);

        tracing::trace!(
            plaintext_len = plaintext.len(),
            token_bytes = combined.len(),
            "encrypted secret"
        );

        Ok(BASE64.encode(combined))
    }

    /// Encrypt a UTF-8 string. Convenience wrapper around [`encrypt`].
    ///
    /// [`encrypt`]: SecretCipher::encrypt
    pub fn encrypt_str(&self, plaintext: &str) -> CryptoResult<String> {
        self.encrypt(plaintext.as_bytes())
    }

    /// Decode and decrypt a secret token back into plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedToken`] if the token is not valid
    /// base64 or decodes to fewer than [`MIN_TOKEN_BYTES`] bytes, and
    /// [`CryptoError::DecryptionFailed`] if authentication fails (wrong
    /// key or tampered ciphertext).
    pub fn decrypt(&self, token: &str) -> CryptoResult<Vec<u8>> {
        let combined = BASE64
            .decode(token)
            .map_err(|e| CryptoError::MalformedToken {
                reason: format!("invalid base64: {e}"),
            })?;

        if combined.len() < MIN_TOKEN_BYTES {
            return Err(CryptoError::MalformedToken {
                reason: format!(
                    "token decodes to {} bytes, need at least {MIN_TOKEN_BYTES}",
                    combined.len()
                ),
            });
        }

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&combined[..IV_LEN]);

        let unbound = UnboundKey::new(AEAD_ALG, self.key.as_bytes()).map_err(|_| {
            CryptoError::DecryptionFailed {
                reason: "failed to create AES-256-GCM key".into(),
            }
        })?;
        let mut opening_key = aead::OpeningKey::new(unbound, SingleNonce::new(iv));

        let mut in_out = combined[IV_LEN..].to_vec();
        let plaintext = opening_key
            .open_in_place(Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::DecryptionFailed {
                reason: "authentication failed — wrong key or corrupted token".into(),
            })?;

        Ok(plaintext.to_vec())
    }

    /// Decrypt a token into a UTF-8 string.
    ///
    /// # Errors
    ///
    /// As [`decrypt`], plus [`CryptoError::DecryptionFailed`] if the
    /// plaintext is not valid UTF-8.
    ///
    /// [`decrypt`]: SecretCipher::decrypt
    pub fn decrypt_str(&self, token: &str) -> CryptoResult<String> {
        let bytes = self.decrypt(token)?;
        String::from_utf8(bytes).map_err(|_| CryptoError::DecryptionFailed {
            reason: "plaintext is not valid UTF-8".into(),
        })
    }

    /// Decrypt a token, falling back to the original value on failure.
    ///
    /// This is the documented recovery policy for stored secrets: a value
    /// that cannot be decrypted (legacy plaintext, corruption, or a
    /// misclassified token) is returned unchanged, so the caller may see
    /// ciphertext-looking garbage rather than an error.
    pub fn decrypt_or_original(&self, token: &str) -> String {
        match self.decrypt_str(token) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::warn!(error = %e, "secret token did not decrypt; returning original value");
                token.to_string()
            }
        }
    }
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretCipher(..)")
    }
}

/// Guess whether `value` is already in the encrypted token format.
///
/// Returns `true` only if `value` is non-empty, decodes as base64, and
/// the decoded length clears [`MIN_TOKEN_BYTES`]. This is a heuristic:
/// plaintext that happens to satisfy all three tests is misclassified
/// and will be left untouched by migration.
pub fn looks_encrypted(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    match BASE64.decode(value) {
        Ok(decoded) => decoded.len() >= MIN_TOKEN_BYTES,
        Err(_) => false,
    }
}
