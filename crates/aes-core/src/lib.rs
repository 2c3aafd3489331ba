//! AES (Rijndael) block cipher engine.
//!
//! This crate follows FIPS-197 and provides:
//! - Key schedule for 128-, 192-, and 256-bit keys.
//! - Single-block encryption and decryption.
//! - The [`Aes`] context that bundles a schedule with its round count.
//!
//! The S-box, inverse S-box, and round constants are computed at compile
//! time. Lookups are table based and not constant time; this crate should not
//! be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod aes;
mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod round;
mod sbox;

pub use crate::aes::{Aes, BlockCipher};
pub use crate::block::{block_from_slice, xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::error::{Error, Result};
pub use crate::key::{AesKey, KeySize, RoundKeys, MAX_ROUNDS};
pub use crate::sbox::{inv_sbox, sbox};
