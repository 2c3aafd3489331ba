//! Error type for key and block validation.

use thiserror::Error;

/// Errors raised by the cipher engine.
///
/// Once a context exists every transform is total, so the only failures are
/// malformed inputs at the byte-slice entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Key material was not 16, 24, or 32 bytes long.
    #[error("invalid AES key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength {
        /// Length that was supplied.
        len: usize,
    },

    /// A block buffer was not exactly 16 bytes long.
    #[error("invalid AES block length: {len} bytes (expected 16)")]
    InvalidBlockLength {
        /// Length that was supplied.
        len: usize,
    },
}

/// Result alias for cipher operations.
pub type Result<T> = core::result::Result<T, Error>;
