//! Store errors.

use thiserror::Error;

use crate::handle::Handle;

/// Errors returned by [`ContextStore`](crate::ContextStore) operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Key or block validation failed in the cipher engine.
    #[error(transparent)]
    Cipher(#[from] aes_core::Error),

    /// The handle was never issued by this store or its context was released.
    #[error("invalid or released context handle {0}")]
    InvalidContext(Handle),

    /// The configured live-context limit is reached.
    #[error("context store is full ({limit} live contexts)")]
    CapacityExhausted {
        /// Limit that was hit.
        limit: usize,
    },
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
