//! Helpers for variable-length big-endian encoding and window extraction of
//! [`Uint`] values.
//!
//! These work on the little-endian limb representation directly so that the
//! same routines serve field elements, scalars and double-width blinded
//! scalars stored as plain word slices.

use bigint::{Uint, Word};

/// Size of a [`Word`] in bytes.
pub const WORD_BYTES: usize = size_of::<Word>();

/// Size of a [`Word`] in bits.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Extract `width` bits of `words` starting at bit `pos`.
///
/// Bits past the end of the slice read as zero. The position is public; the
/// returned digit is computed without branching on the secret words.
pub fn digit(words: &[Word], pos: usize, width: usize) -> usize {
    debug_assert!(width > 0 && width < WORD_BITS);

    let mask: Word = (1 << width) - 1;
    let (index, shift) = (pos / WORD_BITS, pos % WORD_BITS);

    let lo = words.get(index).copied().unwrap_or(0) >> shift;
    let hi = match words.get(index + 1) {
        Some(&w) if shift + width > WORD_BITS => w << (WORD_BITS - shift),
        _ => 0,
    };

    ((lo | hi) & mask) as usize
}

/// Decode a big-endian byte string into a [`Uint`].
///
/// Returns `None` if `bytes` is longer than the integer can hold. Shorter
/// inputs are zero-extended.
pub fn from_be_slice<const LIMBS: usize>(bytes: &[u8]) -> Option<Uint<LIMBS>> {
    if bytes.len() > LIMBS * WORD_BYTES {
        return None;
    }

    let mut words: [Word; LIMBS] = [0; LIMBS];

    for (i, &byte) in bytes.iter().rev().enumerate() {
        words[i / WORD_BYTES] |= Word::from(byte) << (8 * (i % WORD_BYTES));
    }

    Some(Uint::from_words(words))
}

/// Encode `x` big-endian into `out`, zero-padding or truncating the most
/// significant end to fit `out.len()`.
pub fn write_be_bytes<const LIMBS: usize>(x: &Uint<LIMBS>, out: &mut [u8]) {
    let words = x.as_words();

    for (i, byte) in out.iter_mut().rev().enumerate() {
        let word = words.get(i / WORD_BYTES).copied().unwrap_or(0);
        *byte = (word >> (8 * (i % WORD_BYTES))) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigint::U256;
    use hex_literal::hex;

    const P256_B: U256 =
        U256::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");

    #[test]
    fn digits() {
        let x = U256::from_u64(0xfedc_ba98_7654_3210);
        let words = x.as_words();
        for i in 0..16 {
            assert_eq!(digit(words, 4 * i, 4), i);
        }
        assert_eq!(digit(words, 0, 2), 0);
        assert_eq!(digit(words, 4, 2), 1);
        assert_eq!(digit(words, 256, 4), 0);
        assert_eq!(digit(words, 1000, 4), 0);
    }

    #[test]
    fn digit_straddles_words() {
        let x = U256::ONE.shl_vartime(WORD_BITS) | U256::ONE.shl_vartime(WORD_BITS - 1);
        assert_eq!(digit(x.as_words(), WORD_BITS - 1, 2), 0b11);
        assert_eq!(digit(x.as_words(), WORD_BITS - 2, 3), 0b110);
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
        let x = from_be_slice::<{ U256::LIMBS }>(&bytes).unwrap();
        assert_eq!(x, P256_B);

        let mut out = [0u8; 32];
        write_be_bytes(&x, &mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn short_and_long_inputs() {
        assert_eq!(
            from_be_slice::<{ U256::LIMBS }>(&[0x01, 0x00]),
            Some(U256::from_u64(256))
        );
        assert_eq!(from_be_slice::<{ U256::LIMBS }>(&[]), Some(U256::ZERO));
        assert_eq!(from_be_slice::<{ U256::LIMBS }>(&[0u8; 33]), None);

        let mut out = [0xffu8; 3];
        write_be_bytes(&U256::from_u64(97), &mut out);
        assert_eq!(out, [0, 0, 97]);
    }
}
