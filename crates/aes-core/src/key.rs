//! Key types and the expanded round-key schedule.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;
use crate::error::{Error, Result};

/// Largest round count (AES-256).
pub const MAX_ROUNDS: usize = 14;

/// Supported key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key, 10 rounds.
    Aes128,
    /// 24-byte key, 12 rounds.
    Aes192,
    /// 32-byte key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes to its variant.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            _ => Err(Error::InvalidKeyLength { len }),
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        self.nk() * 4
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn nk(self) -> usize {
        match self {
            Self::Aes128 => 4,
            Self::Aes192 => 6,
            Self::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        self.nk() + 6
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.key_bytes() * 8
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// AES key of 128, 192, or 256 bits. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AesKey {
    bytes: [u8; 32],
    #[zeroize(skip)]
    size: KeySize,
}

impl AesKey {
    /// Copies `bytes` into a new key, rejecting unsupported lengths.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let size = KeySize::from_len(bytes.len())?;
        let mut buf = [0u8; 32];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self { bytes: buf, size })
    }

    /// Key size of this key.
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size.key_bytes()]
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesKey")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&[u8]> for AesKey {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::new(value)
    }
}

macro_rules! key_from_array {
    ($($n:literal => $size:ident),*) => {$(
        impl From<[u8; $n]> for AesKey {
            fn from(value: [u8; $n]) -> Self {
                let mut bytes = [0u8; 32];
                bytes[..$n].copy_from_slice(&value);
                Self { bytes, size: KeySize::$size }
            }
        }
    )*};
}

key_from_array!(16 => Aes128, 24 => Aes192, 32 => Aes256);

/// Expanded round keys: `Nr + 1` blocks, only the first `rounds + 1` used.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUNDS + 1],
    #[zeroize(skip)]
    rounds: usize,
}

impl RoundKeys {
    pub(crate) fn from_words(words: &[u32], rounds: usize) -> Self {
        debug_assert_eq!(words.len(), 4 * (rounds + 1));
        let mut keys = [[0u8; 16]; MAX_ROUNDS + 1];
        for (i, word) in words.iter().enumerate() {
            let offset = (i % 4) * 4;
            keys[i / 4][offset..offset + 4].copy_from_slice(&word.to_be_bytes());
        }
        Self { keys, rounds }
    }

    /// Number of rounds this schedule drives.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns the round key at the requested index (`0..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        debug_assert!(round <= self.rounds);
        &self.keys[round]
    }

    /// Schedule word `w[i]` in FIPS-197 numbering.
    pub fn word(&self, i: usize) -> u32 {
        let key = self.get(i / 4);
        let offset = (i % 4) * 4;
        u32::from_be_bytes([key[offset], key[offset + 1], key[offset + 2], key[offset + 3]])
    }

    /// Number of schedule words, `4 * (rounds + 1)`.
    pub fn word_count(&self) -> usize {
        4 * (self.rounds + 1)
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}
