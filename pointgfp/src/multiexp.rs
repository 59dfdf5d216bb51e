//! Simultaneous multiplication `z1 * p1 + z2 * p2` using Shamir's trick.
//!
//! **Variable time**: intended for verification, where the scalars are public.

use crate::{Point, Workspace};
use bigint::Uint;
use curvegfp::uint;

/// Scalar bits consumed per step by [`MultiExponentiator`].
const WINDOW_BITS: usize = 2;

/// Number of table entries: every combination `i * p1 + j * p2` for
/// `0 <= i, j < 4`.
const TABLE_SIZE: usize = 1 << (2 * WINDOW_BITS);

/// Precomputed table of the sixteen combinations `i * p1 + j * p2`, stored at
/// index `i + 4 * j`.
///
/// The table is built once by [`MultiExponentiator::new`] and can be reused for
/// many pairs of scalars, as when verifying signatures against a fixed public
/// key.
#[derive(Clone, Copy, Debug)]
pub struct MultiExponentiator<'c, const LIMBS: usize> {
    table: [Point<'c, LIMBS>; TABLE_SIZE],

    /// Every nonzero entry is stored with `Z = 1`.
    affine: bool,
}

impl<'c, const LIMBS: usize> MultiExponentiator<'c, LIMBS> {
    /// Precompute the combinations of `p1` and `p2`.
    ///
    /// The table is normalized to affine form with a single batch inversion
    /// when none of its nonzero-index entries is the point at infinity, so that
    /// the main loop can use mixed addition.
    pub fn new(p1: &Point<'c, LIMBS>, p2: &Point<'c, LIMBS>) -> Self {
        debug_assert!(p1.curve() == p2.curve());

        let mut ws = Workspace::new(p1.curve());
        let mut table = [Point::zero(p1.curve()); TABLE_SIZE];

        table[1] = *p1;
        table[2] = p1.double(&mut ws);
        table[3] = table[2].plus(p1, &mut ws);
        table[4] = *p2;
        table[8] = p2.double(&mut ws);
        table[12] = table[8].plus(p2, &mut ws);

        for j in (4..TABLE_SIZE).step_by(4) {
            for i in 1..4 {
                table[i + j] = table[i].plus(&table[j], &mut ws);
            }
        }

        let affine = Point::force_all_affine(&mut table[1..]).is_ok();

        Self { table, affine }
    }

    /// Compute `z1 * p1 + z2 * p2`.
    pub fn multiply_and_add(&self, z1: &Uint<LIMBS>, z2: &Uint<LIMBS>) -> Point<'c, LIMBS> {
        let mut ws = Workspace::new(self.table[0].curve());
        let bits = z1.bits_vartime().max(z2.bits_vartime());
        let mut ret = self.table[0];

        for window in (0..bits.div_ceil(WINDOW_BITS)).rev() {
            ret.mult2(&mut ws);
            ret.mult2(&mut ws);

            let pos = window * WINDOW_BITS;
            let i = uint::digit(z1.as_words(), pos, WINDOW_BITS);
            let j = uint::digit(z2.as_words(), pos, WINDOW_BITS);
            let entry = &self.table[i + (j << WINDOW_BITS)];

            match (i | j, self.affine) {
                (0, _) => (),
                (_, true) => ret.add_affine(entry, &mut ws),
                (_, false) => ret.add(entry, &mut ws),
            }
        }

        ret
    }
}

/// Compute `z1 * p1 + z2 * p2`. See [`MultiExponentiator`].
pub fn multi_exponentiate<'c, const LIMBS: usize>(
    p1: &Point<'c, LIMBS>,
    z1: &Uint<LIMBS>,
    p2: &Point<'c, LIMBS>,
    z2: &Uint<LIMBS>,
) -> Point<'c, LIMBS> {
    MultiExponentiator::new(p1, p2).multiply_and_add(z1, z2)
}
