use crate::{Point, Workspace};
use curvegfp::CurveGFp;
use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// Number of scalar bits consumed per window of fixed-window scalar
/// multiplication.
pub const WINDOW_BITS: usize = 4;

/// Internal constant for the number of entries in a [`LookupTable`].
const LUT_SIZE: usize = 1 << WINDOW_BITS;

/// Lookup table containing precomputed values `[0p, p, 2p, ..., 15p]`
#[derive(Clone, Copy, Debug)]
pub(crate) struct LookupTable<'c, const LIMBS: usize> {
    points: [Point<'c, LIMBS>; LUT_SIZE],
}

impl<'c, const LIMBS: usize> LookupTable<'c, LIMBS> {
    /// Compute a new lookup table from the given point.
    pub(crate) fn new(p: &Point<'c, LIMBS>, ws: &mut Workspace<LIMBS>) -> Self {
        let mut points = [Point::zero(p.curve()); LUT_SIZE];
        points[1] = *p;

        for i in 2..LUT_SIZE {
            points[i] = if i % 2 == 0 {
                points[i / 2].double(ws)
            } else {
                points[i - 1].plus(p, ws)
            };
        }

        Self { points }
    }

    pub(crate) fn curve(&self) -> &'c CurveGFp<LIMBS> {
        self.points[0].curve()
    }

    /// Given `0 <= x < 16`, returns `x * p`, scanning every entry.
    pub(crate) fn select(&self, x: usize) -> Point<'c, LIMBS> {
        debug_assert!(x < LUT_SIZE);

        let mut t = self.points[0];

        for (i, point) in self.points.iter().enumerate().skip(1) {
            t.conditional_assign(point, (x as u8).ct_eq(&(i as u8)));
        }

        t
    }

    /// Rerandomize the representation of every entry.
    pub(crate) fn randomize(&mut self, rng: &mut impl CryptoRngCore) {
        for point in &mut self.points {
            point.randomize_repr(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LookupTable;
    use crate::{Point, Workspace};
    use curvegfp::dev::toy97;
    use rand_core::OsRng;

    #[test]
    fn select_matches_repeated_addition() {
        let toy = toy97();
        let (gx, gy) = toy.generator;
        let g = Point::from_affine(&toy.curve, &gx, &gy).unwrap();
        let mut ws = Workspace::new(&toy.curve);

        let mut table = LookupTable::new(&g, &mut ws);
        table.randomize(&mut OsRng);

        let mut expected = Point::zero(&toy.curve);
        for x in 0..16 {
            assert_eq!(table.select(x), expected, "{x} * G");
            expected = expected.plus(&g, &mut ws);
        }
    }
}
