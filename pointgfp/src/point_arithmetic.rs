//! Jacobian point addition and doubling.
//!
//! Formulas are taken from the [Explicit-Formulas Database] and evaluated in
//! the caller's [`Workspace`] registers. The comments after each line give the
//! value being computed.
//!
//! [Explicit-Formulas Database]: https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian.html

use crate::{Point, Workspace};
use curvegfp::{EquationA, FieldElement};
use subtle::{Choice, ConditionallySelectable};

impl<const LIMBS: usize> Point<'_, LIMBS> {
    /// Add `other` to this point in place.
    ///
    /// Implements the add-1998-cmo-2 formula. Operands equal to the point at
    /// infinity are handled with constant-time selection. Equal or opposite
    /// operands (`U1 = U2`) take a separate, variable-time path: equal points
    /// are doubled and opposite points sum to the point at infinity.
    pub fn add(&mut self, other: &Self, ws: &mut Workspace<LIMBS>) {
        debug_assert!(self.curve == other.curve);

        let [u1, s1, u2, s2, _, _, t] = ws.registers();
        *t = other.z.square(); // Z2^2
        *u1 = self.x * *t; // U1 = X1*Z2^2
        *s1 = self.y * other.z * *t; // S1 = Y1*Z2^3
        *t = self.z.square(); // Z1^2
        *u2 = other.x * *t; // U2 = X2*Z1^2
        *s2 = other.y * self.z * *t; // S2 = Y2*Z1^3

        let z1z2 = self.z * other.z;
        self.add_finish(other, z1z2, ws);
    }

    /// Add `other`, which must be stored with `Z = 1` or be the point at
    /// infinity, to this point in place.
    ///
    /// Same formula as [`Point::add`] with `Z2 = 1`, which saves the `Z2`
    /// powers. Edge cases are handled as in [`Point::add`].
    pub fn add_affine(&mut self, other: &Self, ws: &mut Workspace<LIMBS>) {
        debug_assert!(self.curve == other.curve);
        debug_assert!(other.is_zero() || other.is_affine());

        let [u1, s1, u2, s2, _, _, t] = ws.registers();
        *u1 = self.x; // U1 = X1
        *s1 = self.y; // S1 = Y1
        *t = self.z.square(); // Z1^2
        *u2 = other.x * *t; // U2 = X2*Z1^2
        *s2 = other.y * self.z * *t; // S2 = Y2*Z1^3

        let z1 = self.z;
        self.add_finish(other, z1, ws);
    }

    /// Shared tail of [`Point::add`] and [`Point::add_affine`], starting from
    /// `U1, S1, U2, S2` in the first four registers.
    fn add_finish(&mut self, other: &Self, z1z2: FieldElement<LIMBS>, ws: &mut Workspace<LIMBS>) {
        let self_zero = self.is_zero_ct();
        let other_zero = other.is_zero_ct();

        let [u1, s1, u2, s2, h, r, t] = ws.registers();
        *h = *u2 - *u1; // H = U2-U1
        *r = *s2 - *s1; // r = S2-S1

        if bool::from(!self_zero & !other_zero & h.is_zero()) {
            if bool::from(r.is_zero()) {
                self.mult2(ws);
            } else {
                *self = Self::zero(self.curve);
            }

            return;
        }

        *t = h.square(); // HH = H^2
        *u2 = *h * *t; // HHH = H*HH
        *u1 *= *t; // V = U1*HH
        *s2 = r.square() - *u2 - u1.double(); // X3 = r^2-HHH-2*V
        *s1 = *r * (*u1 - *s2) - *s1 * *u2; // Y3 = r*(V-X3)-S1*HHH
        *t = z1z2 * *h; // Z3 = Z1*Z2*H

        let sum = Self {
            curve: self.curve,
            x: *s2,
            y: *s1,
            z: *t,
        };

        let mut ret = Self::conditional_select(&sum, other, self_zero);
        ret.conditional_assign(self, other_zero);
        *self = ret;
    }

    /// Double this point in place.
    ///
    /// Implements the dbl-1986-cc formula, with the `M` term specialized for
    /// `a = 0` and `a = -3`. Points with `Y = 0` (of order two) and the point
    /// at infinity double to the canonical point at infinity.
    pub fn mult2(&mut self, ws: &mut Workspace<LIMBS>) {
        let [s, m, y2, y4, t, az4, _] = ws.registers();
        *y2 = self.y.square(); // Y^2
        *s = (self.x * *y2).double().double(); // S = 4*X*Y^2
        *y4 = y2.square().double().double().double(); // 8*Y^4

        match self.curve.equation_a() {
            EquationA::Zero => {
                *t = self.x.square(); // X^2
                *m = t.double() + *t; // M = 3*X^2
            }
            EquationA::MinusThree => {
                *t = self.z.square(); // Z^2
                *t = (self.x - *t) * (self.x + *t); // (X-Z^2)*(X+Z^2)
                *m = t.double() + *t; // M = 3*(X-Z^2)*(X+Z^2)
            }
            EquationA::Generic => {
                *t = self.x.square(); // X^2
                *az4 = self.z.square().square() * self.curve.a_element(); // a*Z^4
                *m = t.double() + *t + *az4; // M = 3*X^2+a*Z^4
            }
        }

        *t = m.square() - s.double(); // X3 = M^2-2*S
        *y4 = *m * (*s - *t) - *y4; // Y3 = M*(S-X3)-8*Y^4
        *s = (self.y * self.z).double(); // Z3 = 2*Y*Z

        let doubled = Self {
            curve: self.curve,
            x: *t,
            y: *y4,
            z: *s,
        };

        let degenerate: Choice = self.is_zero_ct() | self.y.is_zero();
        *self = Self::conditional_select(&doubled, &Self::zero(self.curve), degenerate);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Point, Workspace};
    use curvegfp::dev::{p256, secp256k1, toy97};
    use rand_core::OsRng;

    /// Doubling must agree with adding a differently represented copy, which
    /// goes through the `H = 0` branch of the addition formula.
    #[test]
    fn add_equal_points_doubles() {
        for test in [p256(), secp256k1()] {
            let (gx, gy) = test.generator;
            let g = Point::from_affine(&test.curve, &gx, &gy).unwrap();
            let mut ws = Workspace::new(&test.curve);

            let mut copy = g;
            copy.randomize_repr(&mut OsRng);

            let mut sum = g;
            sum.add(&copy, &mut ws);
            assert_eq!(sum, g.double(&mut ws));
            assert!(sum.on_the_curve());
        }
    }

    #[test]
    fn generic_a_doubling() {
        let toy = toy97();
        let (gx, gy) = toy.generator;
        let g = Point::from_affine(&toy.curve, &gx, &gy).unwrap();
        let mut ws = Workspace::new(&toy.curve);

        let mut p = g;
        p.randomize_repr(&mut OsRng);
        p.mult2(&mut ws);
        assert!(p.on_the_curve());
        assert_eq!(p.affine_x().unwrap(), bigint::U64::from_u64(80));
        assert_eq!(p.affine_y().unwrap(), bigint::U64::from_u64(10));
    }

    #[test]
    fn workspace_reuse_across_curves() {
        let nist = p256();
        let k256 = secp256k1();
        let mut ws = Workspace::new(&nist.curve);

        let (gx, gy) = k256.generator;
        let g = Point::from_affine(&k256.curve, &gx, &gy).unwrap();
        let g2 = g.double(&mut ws);

        let mut fresh = Workspace::new(&k256.curve);
        assert_eq!(g2, g.double(&mut fresh));
        assert_eq!(g.plus(&g2, &mut ws), g.plus(&g2, &mut fresh));
    }
}
