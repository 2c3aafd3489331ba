//! The cipher context: an expanded schedule ready for block transforms.

use core::fmt;

use crate::block::{block_from_slice, Block, BLOCK_SIZE};
use crate::cipher::{decrypt_in_place, encrypt_in_place, expand_key};
use crate::error::{Error, Result};
use crate::key::{AesKey, KeySize, RoundKeys};

/// Block-level primitive consumed by mode-of-operation layers.
pub trait BlockCipher {
    /// Block width in bytes.
    const BLOCK_SIZE: usize = BLOCK_SIZE;

    /// Encrypts one block in place.
    fn encrypt_in_place(&self, block: &mut Block);

    /// Decrypts one block in place.
    fn decrypt_in_place(&self, block: &mut Block);
}

/// AES cipher context.
///
/// Holds the round-key schedule for one key. The same schedule drives both
/// directions, and nothing in it changes after [`Aes::new`] returns, so a
/// shared `&Aes` can be used from any number of threads at once. The schedule
/// is wiped when the context is dropped.
#[derive(Clone)]
pub struct Aes {
    round_keys: RoundKeys,
    size: KeySize,
}

impl Aes {
    /// Validates `key` and expands it into a ready context.
    ///
    /// Fails with [`Error::InvalidKeyLength`] unless `key` is 16, 24, or 32
    /// bytes long.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = AesKey::new(key)?;
        Ok(Self::with_key(&key))
    }

    /// Expands an already validated key.
    pub fn with_key(key: &AesKey) -> Self {
        Self {
            round_keys: expand_key(key),
            size: key.size(),
        }
    }

    /// Key size the context was built from.
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Number of rounds applied per block.
    pub fn rounds(&self) -> usize {
        self.round_keys.rounds()
    }

    /// Encrypts one block, returning the ciphertext.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        let mut state = *block;
        encrypt_in_place(&mut state, &self.round_keys);
        state
    }

    /// Decrypts one block, returning the plaintext.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        let mut state = *block;
        decrypt_in_place(&mut state, &self.round_keys);
        state
    }

    /// Encrypts `input` into `output`; both must be exactly one block.
    pub fn encrypt_slice(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let block = block_from_slice(input)?;
        write_block(output, &self.encrypt_block(&block))
    }

    /// Decrypts `input` into `output`; both must be exactly one block.
    pub fn decrypt_slice(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let block = block_from_slice(input)?;
        write_block(output, &self.decrypt_block(&block))
    }
}

fn write_block(output: &mut [u8], block: &Block) -> Result<()> {
    if output.len() != BLOCK_SIZE {
        return Err(Error::InvalidBlockLength { len: output.len() });
    }
    output.copy_from_slice(block);
    Ok(())
}

impl BlockCipher for Aes {
    fn encrypt_in_place(&self, block: &mut Block) {
        encrypt_in_place(block, &self.round_keys);
    }

    fn decrypt_in_place(&self, block: &mut Block) {
        decrypt_in_place(block, &self.round_keys);
    }
}

impl fmt::Debug for Aes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes").field("size", &self.size).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn context_is_shareable() {
        assert_send_sync::<Aes>();
    }

    #[test]
    fn zero_key_zero_block_aes128() {
        let aes = Aes::new(&[0u8; 16]).unwrap();
        assert_eq!(aes.rounds(), 10);
        let ct = aes.encrypt_block(&[0u8; 16]);
        assert_eq!(
            ct,
            [
                0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa, 0x59, 0xca, 0x34,
                0x2b, 0x2e
            ]
        );
    }

    #[test]
    fn slice_entry_points_check_lengths() {
        let aes = Aes::new(&[1u8; 24]).unwrap();
        let mut out = [0u8; 16];
        assert_eq!(
            aes.encrypt_slice(&[0u8; 15], &mut out),
            Err(Error::InvalidBlockLength { len: 15 })
        );
        let mut short = [0u8; 8];
        assert_eq!(
            aes.decrypt_slice(&[0u8; 16], &mut short),
            Err(Error::InvalidBlockLength { len: 8 })
        );

        aes.encrypt_slice(&[3u8; 16], &mut out).unwrap();
        let mut back = [0u8; 16];
        aes.decrypt_slice(&out, &mut back).unwrap();
        assert_eq!(back, [3u8; 16]);
    }

    #[test]
    fn in_place_matches_returning_api() {
        let aes = Aes::new(&[0x42u8; 32]).unwrap();
        let mut block = [0x10u8; 16];
        let expected = aes.encrypt_block(&block);
        BlockCipher::encrypt_in_place(&aes, &mut block);
        assert_eq!(block, expected);
        BlockCipher::decrypt_in_place(&aes, &mut block);
        assert_eq!(block, [0x10u8; 16]);
    }
}
