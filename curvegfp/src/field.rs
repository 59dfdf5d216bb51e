//! Prime field arithmetic with a modulus chosen at runtime.
//!
//! Elements are stored in Montgomery form using `crypto-bigint`'s
//! [`DynResidue`]. Each element carries its own copy of the Montgomery
//! parameters, so ring operations between elements need no context. Operations
//! which need constants of the field (square roots, encoding, sampling) live on
//! [`FieldParams`].

mod sqrt;

pub use self::sqrt::SqrtAlgorithm;

use self::sqrt::SqrtParams;
use crate::{
    Error, Result,
    uint::{self, WORD_BITS},
};
use alloc::{vec, vec::Vec};
use bigint::{
    Integer, NonZero, RandomMod, Uint,
    modular::runtime_mod::{DynResidue, DynResidueParams},
};
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess, CtOption};
use zeroize::Zeroize;

/// Parameters of the prime field GF(p).
///
/// `p` is assumed to be prime. Only oddness and a lower bound are checked;
/// inversion and square roots give meaningless results for composite moduli.
#[derive(Clone, Copy)]
pub struct FieldParams<const LIMBS: usize> {
    modulus: Uint<LIMBS>,
    residue: DynResidueParams<LIMBS>,
    /// `p - 1`, the exclusive upper bound for nonzero random sampling.
    nonzero_bound: NonZero<Uint<LIMBS>>,
    bits: usize,
    zero: FieldElement<LIMBS>,
    one: FieldElement<LIMBS>,
    sqrt: SqrtParams<LIMBS>,
}

impl<const LIMBS: usize> FieldParams<LIMBS> {
    /// Create the parameters of GF(`modulus`).
    pub fn new(modulus: &Uint<LIMBS>) -> Result<Self> {
        if modulus.as_words()[0] & 1 == 0 {
            return Err(Error::EvenModulus);
        }

        if *modulus < Uint::from_u64(3) {
            return Err(Error::ModulusTooSmall);
        }

        let residue = DynResidueParams::new(modulus);
        let nonzero_bound = Option::<NonZero<Uint<LIMBS>>>::from(NonZero::new(
            modulus.wrapping_sub(&Uint::ONE),
        ))
        .ok_or(Error::ModulusTooSmall)?;

        let zero = FieldElement::from_residue(DynResidue::zero(residue));

        let mut params = Self {
            modulus: *modulus,
            residue,
            nonzero_bound,
            bits: modulus.bits_vartime(),
            zero,
            one: FieldElement::from_residue(DynResidue::one(residue)),
            sqrt: SqrtParams::unsupported(zero),
        };

        params.sqrt = SqrtParams::new(&params);
        Ok(params)
    }

    /// The modulus `p`.
    pub fn modulus(&self) -> &Uint<LIMBS> {
        &self.modulus
    }

    /// Number of significant bits in `p`.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Length in bytes of an encoded field element: `⌈bits(p) / 8⌉`.
    pub fn bytes(&self) -> usize {
        self.bits.div_ceil(8)
    }

    /// The additive identity.
    pub fn zero(&self) -> FieldElement<LIMBS> {
        self.zero
    }

    /// The multiplicative identity.
    pub fn one(&self) -> FieldElement<LIMBS> {
        self.one
    }

    /// Convert a canonical integer into a field element.
    ///
    /// Returns none if `x ≥ p`.
    pub fn element(&self, x: &Uint<LIMBS>) -> CtOption<FieldElement<LIMBS>> {
        let in_range = x.ct_lt(&self.modulus);
        CtOption::new(self.reduce(x), in_range)
    }

    /// Convert an arbitrary integer into a field element, reducing it mod `p`.
    pub fn reduce(&self, x: &Uint<LIMBS>) -> FieldElement<LIMBS> {
        FieldElement::from_residue(DynResidue::new(x, self.residue))
    }

    /// Convert a small integer into a field element.
    pub fn from_u64(&self, n: u64) -> FieldElement<LIMBS> {
        self.reduce(&Uint::from_u64(n))
    }

    /// Decode a big-endian encoding of exactly [`FieldParams::bytes`] bytes.
    ///
    /// Returns none on a length mismatch or if the encoded integer is `≥ p`.
    pub fn from_be_slice(&self, bytes: &[u8]) -> CtOption<FieldElement<LIMBS>> {
        match uint::from_be_slice::<LIMBS>(bytes) {
            Some(x) if bytes.len() == self.bytes() => self.element(&x),
            _ => CtOption::new(self.zero, Choice::from(0)),
        }
    }

    /// Encode `x` as [`FieldParams::bytes`] big-endian bytes.
    pub fn to_be_bytes(&self, x: &FieldElement<LIMBS>) -> Vec<u8> {
        let mut out = vec![0u8; self.bytes()];
        uint::write_be_bytes(&x.to_uint(), &mut out);
        out
    }

    /// Sample a uniformly random element of `[1, p)`.
    pub fn random_nonzero(&self, rng: &mut impl CryptoRngCore) -> FieldElement<LIMBS> {
        let x = Uint::random_mod(rng, &self.nonzero_bound).wrapping_add(&Uint::ONE);
        self.reduce(&x)
    }

    /// Raise `base` to the power `exp`.
    ///
    /// **Variable time** with respect to `exp`.
    pub fn pow_vartime(&self, base: &FieldElement<LIMBS>, exp: &Uint<LIMBS>) -> FieldElement<LIMBS> {
        let bits = exp.bits_vartime();
        let words = exp.as_words();
        let mut res = self.one;

        for i in (0..bits).rev() {
            res = res.square();

            if (words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1 {
                res *= base;
            }
        }

        res
    }

    /// Compute the multiplicative inverse of `x`.
    ///
    /// Returns none if `x` is zero.
    pub fn invert(&self, x: &FieldElement<LIMBS>) -> CtOption<FieldElement<LIMBS>> {
        x.invert()
    }

    /// Invert every element of `elements` in place using Montgomery's trick.
    ///
    /// Costs one inversion plus `3(n - 1)` multiplications. Returns false and
    /// leaves `elements` untouched if any of them is zero.
    pub fn batch_invert(&self, elements: &mut [FieldElement<LIMBS>]) -> Choice {
        let mut products = Vec::with_capacity(elements.len());
        let mut acc = self.one;

        for x in elements.iter() {
            acc *= x;
            products.push(acc);
        }

        let Some(mut inv) = Option::<FieldElement<LIMBS>>::from(self.invert(&acc)) else {
            return Choice::from(0);
        };

        for i in (1..elements.len()).rev() {
            let x_inv = inv * products[i - 1];
            inv *= elements[i];
            elements[i] = x_inv;
        }

        if let Some(first) = elements.first_mut() {
            *first = inv;
        }

        Choice::from(1)
    }

    /// Square root algorithm selected for this modulus.
    pub fn sqrt_algorithm(&self) -> SqrtAlgorithm {
        self.sqrt.algorithm()
    }

    /// Compute a square root of `x`.
    ///
    /// Returns none if `x` is a quadratic non-residue, or if no square root
    /// algorithm is available for `p`.
    pub fn sqrt(&self, x: &FieldElement<LIMBS>) -> CtOption<FieldElement<LIMBS>> {
        self.sqrt.sqrt(self, x)
    }
}

impl<const LIMBS: usize> fmt::Debug for FieldParams<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldParams")
            .field("modulus", &self.modulus)
            .field("sqrt", &self.sqrt.algorithm())
            .finish_non_exhaustive()
    }
}

impl<const LIMBS: usize> PartialEq for FieldParams<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl<const LIMBS: usize> Eq for FieldParams<LIMBS> {}

/// Element of GF(p) in Montgomery form.
#[derive(Clone, Copy)]
pub struct FieldElement<const LIMBS: usize> {
    inner: DynResidue<LIMBS>,
}

impl<const LIMBS: usize> FieldElement<LIMBS> {
    fn from_residue(inner: DynResidue<LIMBS>) -> Self {
        Self { inner }
    }

    /// Canonical integer representative in `[0, p)`.
    pub fn to_uint(&self) -> Uint<LIMBS> {
        self.inner.retrieve()
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.to_uint().ct_eq(&Uint::ZERO)
    }

    /// Determine if the canonical representative is odd.
    pub fn is_odd(&self) -> Choice {
        Integer::is_odd(&self.to_uint())
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        Self::from_residue(self.inner.square())
    }

    /// Compute the multiplicative inverse, or none if `self` is zero.
    pub fn invert(&self) -> CtOption<Self> {
        let (inv, is_some) = self.inner.invert();
        CtOption::new(Self::from_residue(inv), is_some.into())
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Write the canonical representative big-endian into `out`.
    ///
    /// `out` should be [`FieldParams::bytes`] long.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        uint::write_be_bytes(&self.to_uint(), out);
    }
}

impl<const LIMBS: usize> fmt::Debug for FieldElement<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:?})", self.to_uint())
    }
}

impl<const LIMBS: usize> ConditionallySelectable for FieldElement<LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::from_residue(DynResidue::conditional_select(&a.inner, &b.inner, choice))
    }
}

impl<const LIMBS: usize> ConstantTimeEq for FieldElement<LIMBS> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.inner.ct_eq(&other.inner)
    }
}

impl<const LIMBS: usize> PartialEq for FieldElement<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const LIMBS: usize> Eq for FieldElement<LIMBS> {}

impl<const LIMBS: usize> Zeroize for FieldElement<LIMBS> {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl<const LIMBS: usize> Neg for FieldElement<LIMBS> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_residue(-self.inner)
    }
}

impl<const LIMBS: usize> Neg for &FieldElement<LIMBS> {
    type Output = FieldElement<LIMBS>;

    fn neg(self) -> FieldElement<LIMBS> {
        -*self
    }
}

macro_rules! impl_field_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, $tok:tt) => {
        impl<const LIMBS: usize> $op for FieldElement<LIMBS> {
            type Output = Self;

            #[inline]
            fn $op_fn(self, rhs: Self) -> Self {
                Self::from_residue(self.inner $tok rhs.inner)
            }
        }

        impl<const LIMBS: usize> $op<&FieldElement<LIMBS>> for FieldElement<LIMBS> {
            type Output = Self;

            #[inline]
            fn $op_fn(self, rhs: &Self) -> Self {
                Self::from_residue(self.inner $tok rhs.inner)
            }
        }

        impl<const LIMBS: usize> $op<&FieldElement<LIMBS>> for &FieldElement<LIMBS> {
            type Output = FieldElement<LIMBS>;

            #[inline]
            fn $op_fn(self, rhs: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
                FieldElement::from_residue(self.inner $tok rhs.inner)
            }
        }

        impl<const LIMBS: usize> $assign for FieldElement<LIMBS> {
            #[inline]
            fn $assign_fn(&mut self, rhs: Self) {
                *self = *self $tok rhs;
            }
        }

        impl<const LIMBS: usize> $assign<&FieldElement<LIMBS>> for FieldElement<LIMBS> {
            #[inline]
            fn $assign_fn(&mut self, rhs: &Self) {
                *self = *self $tok *rhs;
            }
        }
    };
}

impl_field_op!(Add, add, AddAssign, add_assign, +);
impl_field_op!(Sub, sub, SubAssign, sub_assign, -);
impl_field_op!(Mul, mul, MulAssign, mul_assign, *);
