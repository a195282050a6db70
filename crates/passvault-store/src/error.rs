//! Error types for the passvault-store crate.
//!
//! Internal helpers return [`StoreError`] via [`StoreResult`]. No error
//! crosses the public operation boundary: every exposed operation catches,
//! logs, and folds failures into its return value (`bool`, `Option`, or
//! an empty collection).

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur inside the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be read, written, or deleted.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] passvault_crypto::CryptoError),

    /// An invalid argument was provided to a store operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
