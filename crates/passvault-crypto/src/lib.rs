//! Cryptographic core for passvault.
//!
//! This crate owns every cryptographic decision in the system: master
//! key derivation, reversible secret encryption, one-way credential
//! hashing, and the heuristic that tells encrypted tokens apart from
//! legacy plaintext.
//!
//! # Modules
//!
//! - [`key`] — PBKDF2 master key derivation behind a provider trait.
//! - [`cipher`] — AES-256-GCM secret tokens and the encrypted-form
//!   classifier.
//! - [`hash`] — salted SHA-256 login credential hashing.
//! - [`error`] — unified error types.
//!
//! # Quick Start
//!
//! ```rust
//! use passvault_crypto::{hash, looks_encrypted, master_cipher};
//!
//! // Reversible secrets: one base64 token per value, fresh IV per call.
//! let cipher = master_cipher();
//! let token = cipher.encrypt_str("vault password")?;
//! assert!(looks_encrypted(&token));
//! assert_eq!(cipher.decrypt_str(&token)?, "vault password");
//!
//! // Irreversible login credentials: salt:digest pairs.
//! let stored = hash::create_hash("login password")?;
//! assert!(hash::verify("login password", &stored));
//! # Ok::<(), passvault_crypto::CryptoError>(())
//! ```

pub mod cipher;
pub mod error;
pub mod hash;
pub mod key;

// Re-export the most commonly used items at the crate root.
pub use cipher::{IV_LEN, MIN_TOKEN_BYTES, SecretCipher, TAG_LEN, looks_encrypted};
pub use error::{CryptoError, CryptoResult};
pub use key::{EmbeddedKeyProvider, KEY_LEN, MasterKey, MasterKeyProvider, master_cipher};
