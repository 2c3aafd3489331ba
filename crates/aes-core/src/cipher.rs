//! AES key schedule and single-block encryption/decryption.

use zeroize::Zeroize;

use crate::block::Block;
use crate::key::{AesKey, RoundKeys, MAX_ROUNDS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::{sbox, RCON};

const MAX_WORDS: usize = 4 * (MAX_ROUNDS + 1);

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a 128-, 192-, or 256-bit key into `Nr + 1` round keys.
pub fn expand_key(key: &AesKey) -> RoundKeys {
    let nk = key.size().nk();
    let rounds = key.size().rounds();
    let total = 4 * (rounds + 1);

    let mut w = [0u32; MAX_WORDS];
    for (slot, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        *slot = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let round_keys = RoundKeys::from_words(&w[..total], rounds);
    w.zeroize();
    round_keys
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    encrypt_in_place(&mut state, round_keys);
    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    decrypt_in_place(&mut state, round_keys);
    state
}

pub(crate) fn encrypt_in_place(state: &mut Block, round_keys: &RoundKeys) {
    let rounds = round_keys.rounds();

    add_round_key(state, round_keys.get(0));
    for round in 1..rounds {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_keys.get(round));
    }

    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, round_keys.get(rounds));
}

pub(crate) fn decrypt_in_place(state: &mut Block, round_keys: &RoundKeys) {
    let rounds = round_keys.rounds();

    add_round_key(state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, round_keys.get(round));
        inv_mix_columns(state);
    }

    inv_shift_rows(state);
    inv_sub_bytes(state);
    add_round_key(state, round_keys.get(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const FIPS_PLAIN: Block = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    fn counting_key(len: usize) -> AesKey {
        let bytes: Vec<u8> = (0..len as u8).collect();
        AesKey::new(&bytes).unwrap()
    }

    #[test]
    fn schedule_sizes() {
        for (len, words) in [(16, 44), (24, 52), (32, 60)] {
            let rks = expand_key(&counting_key(len));
            assert_eq!(rks.word_count(), words);
        }
    }

    #[test]
    fn schedule_begins_with_key() {
        let key = counting_key(32);
        let rks = expand_key(&key);
        assert_eq!(rks.get(0), &key.as_bytes()[..16]);
        assert_eq!(rks.get(1), &key.as_bytes()[16..]);
    }

    #[test]
    fn expand_key_128_appendix_a() {
        let key = AesKey::from([
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ]);
        let rks = expand_key(&key);
        assert_eq!(rks.word(4), 0xa0fafe17);
        assert_eq!(
            [rks.word(40), rks.word(41), rks.word(42), rks.word(43)],
            [0xd014f9a8, 0xc9ee2589, 0xe13f0cc8, 0xb6630ca6]
        );
    }

    #[test]
    fn expand_key_192_appendix_a() {
        let key = AesKey::from([
            0x8e, 0x73, 0xb0, 0xf7, 0xda, 0x0e, 0x64, 0x52, 0xc8, 0x10, 0xf3, 0x2b, 0x80, 0x90,
            0x79, 0xe5, 0x62, 0xf8, 0xea, 0xd2, 0x52, 0x2c, 0x6b, 0x7b,
        ]);
        let rks = expand_key(&key);
        assert_eq!(rks.word(6), 0xfe0c91f7);
        assert_eq!(
            [rks.word(48), rks.word(49), rks.word(50), rks.word(51)],
            [0xe98ba06f, 0x448c773c, 0x8ecc7204, 0x01002202]
        );
    }

    #[test]
    fn expand_key_256_appendix_a() {
        let key = AesKey::from([
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ]);
        let rks = expand_key(&key);
        assert_eq!(rks.word(8), 0x9ba35411);
        assert_eq!(rks.word(12), 0xa8b09c1a);
        assert_eq!(
            [rks.word(56), rks.word(57), rks.word(58), rks.word(59)],
            [0xfe4890d1, 0xe6188d0b, 0x046df344, 0x706c631e]
        );
    }

    #[test]
    fn encrypt_matches_fips_vectors() {
        let cases: [(usize, Block); 3] = [
            (
                16,
                [
                    0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70,
                    0xb4, 0xc5, 0x5a,
                ],
            ),
            (
                24,
                [
                    0xdd, 0xa9, 0x7c, 0xa4, 0x86, 0x4c, 0xdf, 0xe0, 0x6e, 0xaf, 0x70, 0xa0, 0xec,
                    0x0d, 0x71, 0x91,
                ],
            ),
            (
                32,
                [
                    0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b,
                    0x49, 0x60, 0x89,
                ],
            ),
        ];
        for (len, expected) in cases {
            let rks = expand_key(&counting_key(len));
            let ct = encrypt_block(&FIPS_PLAIN, &rks);
            assert_eq!(ct, expected, "{len}-byte key");
            assert_eq!(decrypt_block(&ct, &rks), FIPS_PLAIN, "{len}-byte key");
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for len in [16usize, 24, 32] {
            for _ in 0..50 {
                let mut key_bytes = vec![0u8; len];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key_bytes);
                rng.fill_bytes(&mut block);
                let rks = expand_key(&AesKey::new(&key_bytes).unwrap());
                let ct = encrypt_block(&block, &rks);
                assert_ne!(ct, block);
                assert_eq!(decrypt_block(&ct, &rks), block);
            }
        }
    }
}
