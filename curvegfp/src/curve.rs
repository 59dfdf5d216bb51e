//! Short Weierstrass curve parameters.

use crate::{Error, FieldElement, FieldParams, Result};
use bigint::Uint;

/// Classification of the 𝒂-coefficient of the short Weierstrass equation.
///
/// Point doubling selects a specialized formula from this.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EquationA {
    /// The 𝒂-coefficient is 0 (e.g. secp256k1).
    Zero,

    /// The 𝒂-coefficient is -3 (e.g. the NIST P-curves).
    MinusThree,

    /// The 𝒂-coefficient has no properties allowing an optimized formula.
    Generic,
}

/// The curve `y² = x³ + ax + b` over GF(p).
///
/// Points borrow their curve, so a single `CurveGFp` is typically created once
/// and shared by every point and operation on that curve.
#[derive(Clone, Copy, Debug)]
pub struct CurveGFp<const LIMBS: usize> {
    field: FieldParams<LIMBS>,
    a: FieldElement<LIMBS>,
    b: FieldElement<LIMBS>,
    equation_a: EquationA,
}

impl<const LIMBS: usize> CurveGFp<LIMBS> {
    /// Create the curve `y² = x³ + ax + b` over GF(`p`).
    ///
    /// Fails if `p` is not a usable modulus or if `a` or `b` is not reduced
    /// mod `p`.
    pub fn new(p: &Uint<LIMBS>, a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> Result<Self> {
        let field = FieldParams::new(p)?;
        let a = Option::<FieldElement<LIMBS>>::from(field.element(a))
            .ok_or(Error::CoefficientOutOfRange)?;
        let b = Option::<FieldElement<LIMBS>>::from(field.element(b))
            .ok_or(Error::CoefficientOutOfRange)?;

        let equation_a = if a == field.zero() {
            EquationA::Zero
        } else if a == -field.from_u64(3) {
            EquationA::MinusThree
        } else {
            EquationA::Generic
        };

        Ok(Self {
            field,
            a,
            b,
            equation_a,
        })
    }

    /// The field modulus `p`.
    pub fn p(&self) -> &Uint<LIMBS> {
        self.field.modulus()
    }

    /// The 𝒂-coefficient as a canonical integer.
    pub fn a(&self) -> Uint<LIMBS> {
        self.a.to_uint()
    }

    /// The 𝒃-coefficient as a canonical integer.
    pub fn b(&self) -> Uint<LIMBS> {
        self.b.to_uint()
    }

    /// The 𝒂-coefficient in Montgomery form.
    pub fn a_element(&self) -> &FieldElement<LIMBS> {
        &self.a
    }

    /// The 𝒃-coefficient in Montgomery form.
    pub fn b_element(&self) -> &FieldElement<LIMBS> {
        &self.b
    }

    /// Parameters of the underlying field.
    pub fn field(&self) -> &FieldParams<LIMBS> {
        &self.field
    }

    /// Length in bytes of an encoded coordinate.
    pub fn field_bytes(&self) -> usize {
        self.field.bytes()
    }

    /// Classification of the 𝒂-coefficient.
    pub fn equation_a(&self) -> EquationA {
        self.equation_a
    }

    /// Evaluate the right-hand side `x³ + ax + b` at an affine `x`.
    pub fn rhs(&self, x: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        (x.square() + self.a) * x + self.b
    }
}

impl<const LIMBS: usize> PartialEq for CurveGFp<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.b == other.b
    }
}

impl<const LIMBS: usize> Eq for CurveGFp<LIMBS> {}
