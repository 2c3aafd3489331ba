//! Arithmetic in GF(2^8) modulo the AES polynomial `x^8 + x^4 + x^3 + x + 1`.
//!
//! Every helper is a `const fn` so the substitution tables and round
//! constants can be evaluated at compile time.

/// Low byte of the reduction polynomial (`0x11b`).
const REDUCTION: u8 = 0x1b;

/// Multiplies by `x` (i.e. `{02}`).
#[inline]
pub const fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ (((byte >> 7) & 1) * REDUCTION)
}

/// Full field multiplication (shift-and-add).
#[inline]
pub const fn mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Multiplicative inverse, computed as `a^254`. Maps `0` to `0`.
pub const fn inv(a: u8) -> u8 {
    let mut result = 1u8;
    let mut base = a;
    let mut exp = 254u8;
    while exp != 0 {
        if exp & 1 != 0 {
            result = mul(result, base);
        }
        base = mul(base, base);
        exp >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xtime_reduces_on_overflow() {
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x80), 0x1b);
    }

    #[test]
    fn mul_matches_fips_example() {
        // FIPS-197 section 4.2: {57} * {13} = {fe}
        assert_eq!(mul(0x57, 0x13), 0xfe);
        assert_eq!(mul(0x57, 0x83), 0xc1);
        assert_eq!(mul(0x01, 0xd4), 0xd4);
        assert_eq!(mul(0x00, 0xd4), 0x00);
    }

    #[test]
    fn inverse_is_two_sided() {
        assert_eq!(inv(0), 0);
        for a in 1u8..=255 {
            assert_eq!(mul(a, inv(a)), 1, "inverse of {a:#04x}");
        }
    }
}
