//! Substitution tables and round constants.
//!
//! The tables are built by `const fn` during compilation and live in
//! read-only statics, so concurrent lookups need no synchronization.

use crate::gf;

/// Affine map applied after inversion: `b ^ rotl(b,1..=4) ^ 0x63`.
const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = affine(gf::inv(i as u8));
        i += 1;
    }
    table
}

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inverse = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inverse[table[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

const fn build_rcon() -> [u8; 10] {
    let mut table = [0u8; 10];
    let mut rc = 1u8;
    let mut i = 0;
    while i < table.len() {
        table[i] = rc;
        rc = gf::xtime(rc);
        i += 1;
    }
    table
}

const SBOX_TABLE: [u8; 256] = build_sbox();

static SBOX: [u8; 256] = SBOX_TABLE;
static INV_SBOX: [u8; 256] = invert(&SBOX_TABLE);

/// Round constants `x^(i-1)` for `i = 1..=10`; AES-128 consumes all ten.
pub(crate) const RCON: [u8; 10] = build_rcon();

/// Forward S-box lookup.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Inverse S-box lookup.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}
