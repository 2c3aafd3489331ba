//! C ABI for AES contexts.
//!
//! Contexts live in one process-wide [`ContextStore`]; the foreign side only
//! ever holds a `u64` handle, never an address. A handle of `0` is never
//! issued and always reports [`RijndaelStatus::InvalidContext`].
//!
//! Blocks are exactly 16 bytes. `input` and `output` may point at the same
//! buffer.

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

use std::slice;

use aes_core::{Block, BLOCK_SIZE};
use aes_ctx::{ContextStore, Handle, StoreError};
use log::warn;
use once_cell::sync::Lazy;

static STORE: Lazy<ContextStore> = Lazy::new(ContextStore::new);

/// Status code returned by every bridge function.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RijndaelStatus {
    /// Success.
    Ok = 0,
    /// Key length was not 16, 24, or 32 bytes.
    InvalidKeyLength = 1,
    /// Handle is zero, stale, or unknown.
    InvalidContext = 2,
    /// A required pointer was null.
    NullPointer = 3,
    /// The store refused to allocate another context.
    CapacityExhausted = 4,
}

impl From<StoreError> for RijndaelStatus {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cipher(aes_core::Error::InvalidKeyLength { .. }) => Self::InvalidKeyLength,
            // Block lengths are fixed by the ABI; nothing else can fail here.
            StoreError::Cipher(aes_core::Error::InvalidBlockLength { .. })
            | StoreError::InvalidContext(_) => Self::InvalidContext,
            StoreError::CapacityExhausted { .. } => Self::CapacityExhausted,
        }
    }
}

fn status(result: Result<(), StoreError>) -> RijndaelStatus {
    match result {
        Ok(()) => RijndaelStatus::Ok,
        Err(err) => err.into(),
    }
}

/// Creates a context from `key_len` bytes at `key` and stores its handle in
/// `*out_handle`.
///
/// `*out_handle` is written only on success.
///
/// # Safety
///
/// `key` must be valid for reads of `key_len` bytes (it may be null only when
/// `key_len` is zero) and `out_handle` must be valid for a `u64` write.
#[no_mangle]
pub unsafe extern "C" fn rijndael_ctx_create(
    key: *const u8,
    key_len: usize,
    out_handle: *mut u64,
) -> RijndaelStatus {
    if out_handle.is_null() || (key.is_null() && key_len != 0) {
        return RijndaelStatus::NullPointer;
    }
    let key = if key_len == 0 {
        &[][..]
    } else {
        // SAFETY: non-null and readable for `key_len` bytes per the contract.
        unsafe { slice::from_raw_parts(key, key_len) }
    };
    match STORE.create(key) {
        Ok(handle) => {
            // SAFETY: checked non-null above; caller guarantees writability.
            unsafe { out_handle.write(handle.to_raw()) };
            RijndaelStatus::Ok
        }
        Err(err) => err.into(),
    }
}

/// Encrypts the 16-byte block at `input` into `output`.
///
/// # Safety
///
/// `input` must be valid for reads and `output` for writes of 16 bytes.
#[no_mangle]
pub unsafe extern "C" fn rijndael_ctx_encrypt(
    handle: u64,
    input: *const u8,
    output: *mut u8,
) -> RijndaelStatus {
    // SAFETY: forwarded contract.
    unsafe { transform(handle, input, output, ContextStore::encrypt) }
}

/// Decrypts the 16-byte block at `input` into `output`.
///
/// # Safety
///
/// `input` must be valid for reads and `output` for writes of 16 bytes.
#[no_mangle]
pub unsafe extern "C" fn rijndael_ctx_decrypt(
    handle: u64,
    input: *const u8,
    output: *mut u8,
) -> RijndaelStatus {
    // SAFETY: forwarded contract.
    unsafe { transform(handle, input, output, ContextStore::decrypt) }
}

/// Releases the context behind `handle`. The handle is invalid afterwards.
#[no_mangle]
pub extern "C" fn rijndael_ctx_destroy(handle: u64) -> RijndaelStatus {
    match Handle::from_raw(handle) {
        Some(handle) => status(STORE.destroy(handle)),
        None => reject(handle),
    }
}

/// Number of live contexts in the process-wide store.
#[no_mangle]
pub extern "C" fn rijndael_ctx_count() -> usize {
    STORE.len()
}

unsafe fn transform(
    raw: u64,
    input: *const u8,
    output: *mut u8,
    op: fn(&ContextStore, Handle, &Block) -> Result<Block, StoreError>,
) -> RijndaelStatus {
    if input.is_null() || output.is_null() {
        return RijndaelStatus::NullPointer;
    }
    let Some(handle) = Handle::from_raw(raw) else {
        return reject(raw);
    };
    let mut block = [0u8; BLOCK_SIZE];
    // SAFETY: `input` is non-null and readable for 16 bytes; copying first
    // keeps aliased input/output sound.
    unsafe { block.as_mut_ptr().copy_from(input, BLOCK_SIZE) };
    match op(&*STORE, handle, &block) {
        Ok(out) => {
            // SAFETY: `output` is non-null and writable for 16 bytes.
            unsafe { output.copy_from(out.as_ptr(), BLOCK_SIZE) };
            RijndaelStatus::Ok
        }
        Err(err) => err.into(),
    }
}

fn reject(raw: u64) -> RijndaelStatus {
    warn!("rejected malformed context handle {raw:#x}");
    RijndaelStatus::InvalidContext
}
