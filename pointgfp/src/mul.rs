//! Side-channel resistant scalar multiplication.

use crate::{
    Point, Workspace,
    lookup_table::{LookupTable, WINDOW_BITS},
};
use alloc::vec::Vec;
use bigint::{Limb, Uint, Word};
use curvegfp::uint::{self, WORD_BITS};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Fixed-window scalar multiplication of a single point.
///
/// The table of multiples `[0p, p, ..., 15p]` is computed once by
/// [`ScalarMultiplier::new`] and shared by every subsequent multiplication.
/// Every window costs [`WINDOW_BITS`] doublings and one addition, and table
/// entries are selected by scanning the whole table, so neither the sequence of
/// operations nor the memory access pattern depends on the scalar.
#[derive(Clone, Copy, Debug)]
pub struct ScalarMultiplier<'c, const LIMBS: usize> {
    table: LookupTable<'c, LIMBS>,
}

impl<'c, const LIMBS: usize> ScalarMultiplier<'c, LIMBS> {
    /// Precompute the table of small multiples of `point`.
    pub fn new(point: &Point<'c, LIMBS>) -> Self {
        Self::with_workspace(point, &mut Workspace::new(point.curve()))
    }

    /// Same as [`ScalarMultiplier::new`], using the caller's workspace.
    pub fn with_workspace(point: &Point<'c, LIMBS>, ws: &mut Workspace<LIMBS>) -> Self {
        Self {
            table: LookupTable::new(point, ws),
        }
    }

    /// Compute `scalar * point`.
    ///
    /// Processes every bit of `scalar`, so the running time depends only on
    /// `LIMBS`.
    pub fn multiply(
        point: &Point<'c, LIMBS>,
        scalar: &Uint<LIMBS>,
        ws: &mut Workspace<LIMBS>,
    ) -> Point<'c, LIMBS> {
        Self::with_workspace(point, ws).mul(scalar, ws)
    }

    /// Compute `scalar * point` with scalar blinding.
    ///
    /// The scalar is replaced by `scalar + k * order` for a random `k` of
    /// `⌈bits(order) / 2⌉` bits, and the precomputed table is rerandomized,
    /// before the multiplication runs. `order` must be the order of `point`
    /// (or a multiple of it) for the result to be correct.
    pub fn blinded_multiply(
        point: &Point<'c, LIMBS>,
        scalar: &Uint<LIMBS>,
        order: &Uint<LIMBS>,
        rng: &mut impl CryptoRngCore,
    ) -> Point<'c, LIMBS> {
        Self::new(point).mul_blinded(scalar, order, rng)
    }

    /// Compute `scalar * p` for the precomputed point `p`.
    pub fn mul(&self, scalar: &Uint<LIMBS>, ws: &mut Workspace<LIMBS>) -> Point<'c, LIMBS> {
        mul_windowed(&self.table, scalar.as_words(), LIMBS * WORD_BITS, ws)
    }

    /// Compute `scalar * p` for the precomputed point `p` with scalar blinding.
    /// See [`ScalarMultiplier::blinded_multiply`].
    pub fn mul_blinded(
        &self,
        scalar: &Uint<LIMBS>,
        order: &Uint<LIMBS>,
        rng: &mut impl CryptoRngCore,
    ) -> Point<'c, LIMBS> {
        let order_bits = order.bits_vartime();
        let mask_bits = order_bits.div_ceil(2);

        let mut mask = random_bits::<LIMBS>(rng, mask_bits);
        let (lo, hi) = mask.mul_wide(order);
        let (lo, carry) = lo.adc(scalar, Limb::ZERO);
        let (hi, _) = hi.adc(&Uint::ZERO, carry);
        mask.zeroize();

        let mut blinded: Vec<Word> = Vec::with_capacity(2 * LIMBS);
        blinded.extend_from_slice(lo.as_words());
        blinded.extend_from_slice(hi.as_words());

        // `scalar + k * order < 2^max(LIMBS * WORD_BITS, order_bits + mask_bits + 1)`
        let bits = (LIMBS * WORD_BITS).max(order_bits + mask_bits) + 1;

        let mut table = self.table;
        table.randomize(rng);

        let mut ws = Workspace::new(table.curve());
        let ret = mul_windowed(&table, &blinded, bits, &mut ws);
        blinded.zeroize();
        ret
    }
}

/// Left-to-right fixed-window multiplication by the first `bits` bits of the
/// little-endian `words`.
fn mul_windowed<'c, const LIMBS: usize>(
    table: &LookupTable<'c, LIMBS>,
    words: &[Word],
    bits: usize,
    ws: &mut Workspace<LIMBS>,
) -> Point<'c, LIMBS> {
    let mut q = table.select(0);

    for window in (0..bits.div_ceil(WINDOW_BITS)).rev() {
        for _ in 0..WINDOW_BITS {
            q.mult2(ws);
        }

        let digit = uint::digit(words, window * WINDOW_BITS, WINDOW_BITS);
        q.add(&table.select(digit), ws);
    }

    q
}

/// Uniformly random integer below `2^bits`.
fn random_bits<const LIMBS: usize>(rng: &mut impl CryptoRngCore, bits: usize) -> Uint<LIMBS> {
    let mut words: [Word; LIMBS] = [0; LIMBS];

    for (i, word) in words.iter_mut().enumerate() {
        let low = i * WORD_BITS;

        if low >= bits {
            break;
        }

        let w = rng.next_u64() as Word;
        let keep = bits - low;
        *word = if keep >= WORD_BITS { w } else { w & ((1 << keep) - 1) };
    }

    Uint::from_words(words)
}

#[cfg(test)]
mod tests {
    use super::{ScalarMultiplier, random_bits};
    use crate::{Point, Workspace};
    use bigint::{U64, U256};
    use curvegfp::dev::toy97;
    use rand_core::OsRng;

    #[test]
    fn toy_multiples() {
        let toy = toy97();
        let (gx, gy) = toy.generator;
        let g = Point::from_affine(&toy.curve, &gx, &gy).unwrap();
        let mut ws = Workspace::new(&toy.curve);

        let mut expected = Point::zero(&toy.curve);
        for k in 0..40u64 {
            let q = ScalarMultiplier::multiply(&g, &U64::from_u64(k), &mut ws);
            assert_eq!(q, expected, "{k} * G");
            expected = expected.plus(&g, &mut ws);
        }
    }

    #[test]
    fn toy_blinded_multiples() {
        let toy = toy97();
        let (gx, gy) = toy.generator;
        let g = Point::from_affine(&toy.curve, &gx, &gy).unwrap();
        let mut ws = Workspace::new(&toy.curve);
        let multiplier = ScalarMultiplier::new(&g);

        for k in 0..20u64 {
            let k = U64::from_u64(k);
            let expected = multiplier.mul(&k, &mut ws);
            for _ in 0..4 {
                assert_eq!(multiplier.mul_blinded(&k, &toy.order, &mut OsRng), expected);
            }
        }
    }

    #[test]
    fn zero_point() {
        let toy = toy97();
        let zero = Point::zero(&toy.curve);
        let mut ws = Workspace::new(&toy.curve);

        assert!(ScalarMultiplier::multiply(&zero, &U64::from_u64(7), &mut ws).is_zero());
        assert!(
            ScalarMultiplier::blinded_multiply(&zero, &U64::from_u64(7), &toy.order, &mut OsRng)
                .is_zero()
        );
    }

    #[test]
    fn mask_width() {
        for bits in [0, 1, 3, 63, 64, 65, 128, 255] {
            for _ in 0..8 {
                let mask = random_bits::<{ U256::LIMBS }>(&mut OsRng, bits);
                assert!(mask.bits_vartime() <= bits);
            }
        }
    }
}
