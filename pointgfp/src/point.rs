//! Curve points in Jacobian coordinates.

use crate::{Error, PointFormat, Result, Workspace, codec};
use alloc::vec::Vec;
use bigint::Uint;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use curvegfp::{CurveGFp, FieldElement};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Point on a short Weierstrass curve over GF(p) in Jacobian coordinates.
///
/// The Jacobian triple `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)`.
/// Many triples represent the same affine point; operations which change only
/// the representation ([`Point::force_affine`], [`Point::randomize_repr`])
/// leave the value unchanged.
///
/// The point at infinity is always stored canonically as `X = 0, Z = 0`.
#[derive(Clone, Copy, Debug)]
pub struct Point<'c, const LIMBS: usize> {
    pub(crate) curve: &'c CurveGFp<LIMBS>,
    pub(crate) x: FieldElement<LIMBS>,
    pub(crate) y: FieldElement<LIMBS>,
    pub(crate) z: FieldElement<LIMBS>,
}

impl<'c, const LIMBS: usize> Point<'c, LIMBS> {
    /// The point at infinity on `curve`.
    pub fn zero(curve: &'c CurveGFp<LIMBS>) -> Self {
        let field = curve.field();

        Self {
            curve,
            x: field.zero(),
            y: field.one(),
            z: field.zero(),
        }
    }

    /// Create a point from affine coordinates.
    ///
    /// Fails with [`Error::InvalidPoint`] if either coordinate is `≥ p`. Whether
    /// the point satisfies the curve equation is not checked here; see
    /// [`Point::on_the_curve`].
    pub fn from_affine(
        curve: &'c CurveGFp<LIMBS>,
        x: &Uint<LIMBS>,
        y: &Uint<LIMBS>,
    ) -> Result<Self> {
        let field = curve.field();
        let x: Option<FieldElement<LIMBS>> = field.element(x).into();
        let y: Option<FieldElement<LIMBS>> = field.element(y).into();

        match (x, y) {
            (Some(x), Some(y)) => Ok(Self::from_affine_elements(curve, x, y)),
            _ => Err(Error::InvalidPoint),
        }
    }

    pub(crate) fn from_affine_elements(
        curve: &'c CurveGFp<LIMBS>,
        x: FieldElement<LIMBS>,
        y: FieldElement<LIMBS>,
    ) -> Self {
        Self {
            curve,
            x,
            y,
            z: curve.field().one(),
        }
    }

    /// Decode a SEC1 encoded point. See [`decode`][crate::decode].
    pub fn from_sec1(curve: &'c CurveGFp<LIMBS>, bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes, curve)
    }

    /// SEC1 encoding of this point. See [`encode`][crate::encode].
    pub fn to_sec1(&self, format: PointFormat) -> Vec<u8> {
        codec::encode(self, format)
    }

    /// The curve this point lies on.
    pub fn curve(&self) -> &'c CurveGFp<LIMBS> {
        self.curve
    }

    /// Is this the point at infinity?
    pub fn is_zero(&self) -> bool {
        self.is_zero_ct().into()
    }

    /// Constant-time variant of [`Point::is_zero`].
    pub fn is_zero_ct(&self) -> Choice {
        self.x.is_zero() & self.z.is_zero()
    }

    /// Is this point stored with `Z = 1`?
    pub fn is_affine(&self) -> bool {
        self.z == self.curve.field().one()
    }

    /// The raw Jacobian coordinates `(X, Y, Z)`.
    pub fn jacobian_coordinates(&self) -> (Uint<LIMBS>, Uint<LIMBS>, Uint<LIMBS>) {
        (self.x.to_uint(), self.y.to_uint(), self.z.to_uint())
    }

    /// Negate this point in place. The point at infinity is left unchanged.
    pub fn negate(&mut self) -> &mut Self {
        self.y = FieldElement::conditional_select(&-self.y, &self.y, self.is_zero_ct());
        self
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        let mut ret = *self;
        ret.negate();
        ret
    }

    /// Returns `self + other`.
    pub fn plus(&self, other: &Self, ws: &mut Workspace<LIMBS>) -> Self {
        let mut ret = *self;
        Point::add(&mut ret, other, ws);
        ret
    }

    /// Returns `self - other`.
    pub fn minus(&self, other: &Self, ws: &mut Workspace<LIMBS>) -> Self {
        let mut ret = *self;
        Point::add(&mut ret, &other.neg(), ws);
        ret
    }

    /// Returns `2 * self`.
    pub fn double(&self, ws: &mut Workspace<LIMBS>) -> Self {
        let mut ret = *self;
        ret.mult2(ws);
        ret
    }

    /// Rewrite this point with `Z = 1`.
    ///
    /// Fails with [`Error::IllegalTransformation`] for the point at infinity.
    pub fn force_affine(&mut self) -> Result<()> {
        let z_inv = self.z_inverse()?;
        self.apply_z_inverse(&z_inv);
        Ok(())
    }

    /// Rewrite every point in `points` with `Z = 1` using a single field
    /// inversion.
    ///
    /// Fails with [`Error::IllegalTransformation`], leaving every point
    /// untouched, if any of them is the point at infinity.
    pub fn force_all_affine(points: &mut [Self]) -> Result<()> {
        if points.iter().any(Self::is_zero) {
            return Err(Error::IllegalTransformation);
        }

        let Some(curve) = points.first().map(Point::curve) else {
            return Ok(());
        };
        let field = curve.field();
        debug_assert!(points.iter().all(|p| p.curve.field() == field));

        let mut zs: Vec<FieldElement<LIMBS>> = points.iter().map(|p| p.z).collect();

        if !bool::from(field.batch_invert(&mut zs)) {
            return Err(Error::IllegalTransformation);
        }

        for (point, z_inv) in points.iter_mut().zip(&zs) {
            point.apply_z_inverse(z_inv);
        }

        Ok(())
    }

    fn apply_z_inverse(&mut self, z_inv: &FieldElement<LIMBS>) {
        let z_inv2 = z_inv.square();
        self.x *= z_inv2;
        self.y *= z_inv2 * z_inv;
        self.z = self.curve.field().one();
    }

    /// Affine `x` coordinate.
    ///
    /// Fails with [`Error::IllegalTransformation`] for the point at infinity.
    pub fn affine_x(&self) -> Result<Uint<LIMBS>> {
        let z_inv = self.z_inverse()?;
        Ok((self.x * z_inv.square()).to_uint())
    }

    /// Affine `y` coordinate.
    ///
    /// Fails with [`Error::IllegalTransformation`] for the point at infinity.
    pub fn affine_y(&self) -> Result<Uint<LIMBS>> {
        let z_inv = self.z_inverse()?;
        Ok((self.y * z_inv.square() * z_inv).to_uint())
    }

    /// Affine `(x, y)` coordinates, computed with a single inversion.
    ///
    /// Fails with [`Error::IllegalTransformation`] for the point at infinity.
    pub fn affine_coordinates(&self) -> Result<(Uint<LIMBS>, Uint<LIMBS>)> {
        let (x, y) = self.affine_elements()?;
        Ok((x.to_uint(), y.to_uint()))
    }

    pub(crate) fn affine_elements(&self) -> Result<(FieldElement<LIMBS>, FieldElement<LIMBS>)> {
        let z_inv = self.z_inverse()?;
        let z_inv2 = z_inv.square();
        Ok((self.x * z_inv2, self.y * z_inv2 * z_inv))
    }

    fn z_inverse(&self) -> Result<FieldElement<LIMBS>> {
        if self.is_zero() {
            return Err(Error::IllegalTransformation);
        }

        Option::from(self.curve.field().invert(&self.z)).ok_or(Error::IllegalTransformation)
    }

    /// Does this point satisfy the curve equation?
    ///
    /// Checked on the Jacobian triple as `Y² = X³ + aXZ⁴ + bZ⁶`, without
    /// converting to affine form. The point at infinity is on every curve.
    pub fn on_the_curve(&self) -> bool {
        if self.is_zero() {
            return true;
        }

        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = z4 * z2;

        let lhs = self.y.square();
        let rhs = (self.x.square() + *self.curve.a_element() * z4) * self.x
            + *self.curve.b_element() * z6;

        lhs == rhs
    }

    /// Replace the representation `(X, Y, Z)` with `(λ²X, λ³Y, λZ)` for a
    /// random nonzero `λ`.
    ///
    /// The point's value is unchanged. Randomizing intermediate representations
    /// breaks correlations an attacker could exploit in side-channel traces.
    pub fn randomize_repr(&mut self, rng: &mut impl CryptoRngCore) {
        let lambda = self.curve.field().random_nonzero(rng);
        let lambda2 = lambda.square();

        self.x *= lambda2;
        self.y *= lambda2 * lambda;
        self.z *= lambda;
    }
}

impl<const LIMBS: usize> ConditionallySelectable for Point<'_, LIMBS> {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            curve: a.curve,
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<const LIMBS: usize> ConstantTimeEq for Point<'_, LIMBS> {
    /// Compares the affine values by cross-multiplying with the other point's
    /// `Z` powers. Both points are assumed to lie on the same curve.
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();

        let x_eq = (self.x * z2z2).ct_eq(&(other.x * z1z1));
        let y_eq = (self.y * z2z2 * other.z).ct_eq(&(other.y * z1z1 * self.z));

        let self_zero = self.is_zero_ct();
        let other_zero = other.is_zero_ct();

        (self_zero & other_zero) | (!self_zero & !other_zero & x_eq & y_eq)
    }
}

impl<const LIMBS: usize> PartialEq for Point<'_, LIMBS> {
    /// Points on different curves are never equal.
    fn eq(&self, other: &Self) -> bool {
        (core::ptr::eq(self.curve, other.curve) || self.curve == other.curve)
            && self.ct_eq(other).into()
    }
}

impl<const LIMBS: usize> Eq for Point<'_, LIMBS> {}

//
// `core::ops` impls
//

impl<'c, const LIMBS: usize> Add for Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn add(self, other: Point<'c, LIMBS>) -> Point<'c, LIMBS> {
        self.plus(&other, &mut Workspace::new(self.curve))
    }
}

impl<'c, const LIMBS: usize> Add<&Point<'c, LIMBS>> for Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn add(self, other: &Point<'c, LIMBS>) -> Point<'c, LIMBS> {
        self.plus(other, &mut Workspace::new(self.curve))
    }
}

impl<'c, const LIMBS: usize> Add<&Point<'c, LIMBS>> for &Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn add(self, other: &Point<'c, LIMBS>) -> Point<'c, LIMBS> {
        self.plus(other, &mut Workspace::new(self.curve))
    }
}

impl<'c, const LIMBS: usize> AddAssign for Point<'c, LIMBS> {
    fn add_assign(&mut self, rhs: Point<'c, LIMBS>) {
        Point::add(self, &rhs, &mut Workspace::new(self.curve));
    }
}

impl<'c, const LIMBS: usize> AddAssign<&Point<'c, LIMBS>> for Point<'c, LIMBS> {
    fn add_assign(&mut self, rhs: &Point<'c, LIMBS>) {
        Point::add(self, rhs, &mut Workspace::new(self.curve));
    }
}

impl<'c, const LIMBS: usize> Sub for Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn sub(self, other: Point<'c, LIMBS>) -> Point<'c, LIMBS> {
        self.minus(&other, &mut Workspace::new(self.curve))
    }
}

impl<'c, const LIMBS: usize> Sub<&Point<'c, LIMBS>> for Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn sub(self, other: &Point<'c, LIMBS>) -> Point<'c, LIMBS> {
        self.minus(other, &mut Workspace::new(self.curve))
    }
}

impl<'c, const LIMBS: usize> Sub<&Point<'c, LIMBS>> for &Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn sub(self, other: &Point<'c, LIMBS>) -> Point<'c, LIMBS> {
        self.minus(other, &mut Workspace::new(self.curve))
    }
}

impl<'c, const LIMBS: usize> SubAssign for Point<'c, LIMBS> {
    fn sub_assign(&mut self, rhs: Point<'c, LIMBS>) {
        *self = self.minus(&rhs, &mut Workspace::new(self.curve));
    }
}

impl<'c, const LIMBS: usize> SubAssign<&Point<'c, LIMBS>> for Point<'c, LIMBS> {
    fn sub_assign(&mut self, rhs: &Point<'c, LIMBS>) {
        *self = self.minus(rhs, &mut Workspace::new(self.curve));
    }
}

impl<'c, const LIMBS: usize> Neg for Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn neg(self) -> Point<'c, LIMBS> {
        Point::neg(&self)
    }
}

impl<'c, const LIMBS: usize> Neg for &Point<'c, LIMBS> {
    type Output = Point<'c, LIMBS>;

    fn neg(self) -> Point<'c, LIMBS> {
        Point::neg(self)
    }
}
