//! Lifecycle management for AES cipher contexts.
//!
//! Callers that cannot own native memory get an opaque [`Handle`] instead of
//! an address. The [`ContextStore`] owns every context, validates handles on
//! each call, and wipes a context's schedule when it is destroyed.
//!
//! ```
//! use aes_ctx::ContextStore;
//!
//! let store = ContextStore::new();
//! let handle = store.create(&[0u8; 16])?;
//! let ct = store.encrypt(handle, &[0u8; 16])?;
//! assert_eq!(store.decrypt(handle, &ct)?, [0u8; 16]);
//! store.destroy(handle)?;
//! # Ok::<(), aes_ctx::StoreError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
mod handle;
mod store;

pub use crate::config::StoreConfig;
pub use crate::error::{Result, StoreError};
pub use crate::handle::Handle;
pub use crate::store::{ContextStore, ScopedContext};
