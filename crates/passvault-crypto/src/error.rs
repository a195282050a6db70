//! Error types for the passvault-crypto crate.
//!
//! Every fallible operation in this crate returns [`CryptoError`] via
//! [`CryptoResult`]. No function here panics on malformed input; a bad
//! token or a cipher rejection is always surfaced as a value so callers
//! can apply their own fallback policy.

use thiserror::Error;

/// Alias for `Result<T, CryptoError>`.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in the cryptographic core.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Master key derivation failed (e.g. malformed KDF parameters).
    #[error("key derivation failed: {reason}")]
    KeyDerivationFailed { reason: String },

    /// Encryption failed (e.g. invalid key length, RNG failure).
    #[error("encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// Decryption failed (wrong key, corrupted ciphertext, bad IV).
    #[error("decryption failed: {reason}")]
    DecryptionFailed { reason: String },

    /// The token is not a valid encoded secret (bad base64, too short).
    #[error("malformed secret token: {reason}")]
    MalformedToken { reason: String },

    /// Random byte generation failed.
    #[error("random generation failed: {reason}")]
    RandomFailed { reason: String },
}
