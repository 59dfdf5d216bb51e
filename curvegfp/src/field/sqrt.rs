//! Modular square root implementations, adapted from <https://eprint.iacr.org/2012/685.pdf>.
//!
//! The modulus is only known at runtime, so the algorithm and its constants are
//! selected once when [`FieldParams`] is created.

use super::{FieldElement, FieldParams};
use bigint::Uint;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Candidates tried when searching for a quadratic non-residue.
const NON_RESIDUE_SEARCH_LIMIT: u64 = 256;

/// Square root algorithms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SqrtAlgorithm {
    /// Atkins algorithm for `p ≡ 5 (mod 8)`.
    Atkins,

    /// Shanks algorithm for `p ≡ 3 (mod 4)`.
    Shanks,

    /// Tonelli-Shanks algorithm for `p ≡ 1 (mod 8)`.
    TonelliShanks,

    /// No quadratic non-residue was found, so `p` is not prime.
    Unsupported,
}

/// Precomputed constants for the selected algorithm.
#[derive(Clone, Copy)]
pub(super) struct SqrtParams<const LIMBS: usize> {
    algorithm: SqrtAlgorithm,

    /// `(p + 1) / 4` for Shanks, `(p - 5) / 8` for Atkins, `(t - 1) / 2` for
    /// Tonelli-Shanks where `p - 1 = 2^s * t`.
    exp: Uint<LIMBS>,

    /// 2-adicity of `p - 1`.
    s: u32,

    /// `2^((p - 5) / 8)` for Atkins, a primitive `2^s`-th root of unity for
    /// Tonelli-Shanks.
    root: FieldElement<LIMBS>,
}

impl<const LIMBS: usize> SqrtParams<LIMBS> {
    pub(super) fn unsupported(zero: FieldElement<LIMBS>) -> Self {
        Self {
            algorithm: SqrtAlgorithm::Unsupported,
            exp: Uint::ZERO,
            s: 0,
            root: zero,
        }
    }

    /// Determine the best algorithm to use with the field's modulus.
    pub(super) fn new(field: &FieldParams<LIMBS>) -> Self {
        let p = field.modulus();

        match p.as_words()[0] & 7 {
            3 | 7 => Self {
                algorithm: SqrtAlgorithm::Shanks,
                exp: p.shr_vartime(2).wrapping_add(&Uint::ONE),
                s: 1,
                root: field.zero(),
            },
            5 => {
                let exp = p.shr_vartime(3);
                Self {
                    algorithm: SqrtAlgorithm::Atkins,
                    exp,
                    s: 2,
                    root: field.pow_vartime(&field.from_u64(2), &exp),
                }
            }
            _ => Self::tonelli_shanks(field),
        }
    }

    fn tonelli_shanks(field: &FieldParams<LIMBS>) -> Self {
        let p = field.modulus();
        let s = p.wrapping_sub(&Uint::ONE).trailing_zeros();
        let t = p.shr_vartime(s);
        let euler_exp = p.shr_vartime(1);
        let minus_one = -field.one();

        for n in 2..NON_RESIDUE_SEARCH_LIMIT {
            if Uint::from_u64(n) >= *p {
                break;
            }

            let z = field.from_u64(n);

            if field.pow_vartime(&z, &euler_exp) == minus_one {
                return Self {
                    algorithm: SqrtAlgorithm::TonelliShanks,
                    exp: t.shr_vartime(1),
                    s: s as u32,
                    root: field.pow_vartime(&z, &t),
                };
            }
        }

        Self::unsupported(field.zero())
    }

    pub(super) fn algorithm(&self) -> SqrtAlgorithm {
        self.algorithm
    }

    pub(super) fn sqrt(
        &self,
        field: &FieldParams<LIMBS>,
        a: &FieldElement<LIMBS>,
    ) -> CtOption<FieldElement<LIMBS>> {
        match self.algorithm {
            SqrtAlgorithm::Atkins => self.sqrt_atkins(field, a),
            SqrtAlgorithm::Shanks => self.sqrt_shanks(field, a),
            SqrtAlgorithm::TonelliShanks => self.sqrt_tonelli_shanks(field, a),
            SqrtAlgorithm::Unsupported => CtOption::new(field.zero(), Choice::from(0)),
        }
    }

    /// Atkins algorithm for `p ≡ 5 (mod 8)`.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 10, algorithm 3)
    fn sqrt_atkins(
        &self,
        field: &FieldParams<LIMBS>,
        a: &FieldElement<LIMBS>,
    ) -> CtOption<FieldElement<LIMBS>> {
        let a1 = field.pow_vartime(a, &self.exp);
        let a0 = (a1.square() * a).square();
        let b = self.root * a1;
        let ab = *a * b;
        let i = ab.double() * b;
        let x = ab * (i - field.one());
        CtOption::new(x, !a0.ct_eq(&-field.one()))
    }

    /// Shanks algorithm for `p ≡ 3 (mod 4)`: a single exponentiation
    /// `a^((p + 1) / 4)`.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5)
    fn sqrt_shanks(
        &self,
        field: &FieldParams<LIMBS>,
        a: &FieldElement<LIMBS>,
    ) -> CtOption<FieldElement<LIMBS>> {
        let x = field.pow_vartime(a, &self.exp);
        CtOption::new(x, x.square().ct_eq(a))
    }

    /// Tonelli-Shanks algorithm works for every odd prime.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5)
    fn sqrt_tonelli_shanks(
        &self,
        field: &FieldParams<LIMBS>,
        a: &FieldElement<LIMBS>,
    ) -> CtOption<FieldElement<LIMBS>> {
        let one = field.one();
        let w = field.pow_vartime(a, &self.exp);

        let mut v = self.s;
        let mut x = *a * w;
        let mut b = x * w;
        let mut z = self.root;

        for max_v in (1..=self.s).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&one);
                let squared = FieldElement::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = FieldElement::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = FieldElement::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = FieldElement::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = FieldElement::conditional_select(&result, &x, b.ct_eq(&one));
            z = z.square();
            b *= z;
            v = k;
        }

        CtOption::new(x, x.square().ct_eq(a))
    }
}

#[cfg(test)]
mod tests {
    use super::SqrtAlgorithm;
    use crate::FieldParams;
    use alloc::vec::Vec;
    use bigint::{U64, U256};

    /// Exhaustively check a small prime field against the set of squares.
    fn exhaustive(p: u64, algorithm: SqrtAlgorithm) {
        let field = FieldParams::new(&U64::from_u64(p)).unwrap();
        assert_eq!(field.sqrt_algorithm(), algorithm);

        let squares: Vec<_> = (0..p).map(|n| field.from_u64(n).square()).collect();

        for n in 0..p {
            let a = field.from_u64(n);
            let root = field.sqrt(&a);

            if squares.contains(&a) {
                assert_eq!(root.unwrap().square(), a, "sqrt({n}) mod {p}");
            } else {
                assert!(bool::from(root.is_none()), "{n} is not a square mod {p}");
            }
        }
    }

    /// Generic sqrt test.
    fn sqrt_test<const LIMBS: usize>(field: &FieldParams<LIMBS>) {
        for &n in &[1u64, 4, 9, 16, 25, 36, 49, 64] {
            let a = field.from_u64(n);
            let sqrt = field.sqrt(&a).unwrap();
            assert_eq!(sqrt.square(), a);
        }
    }

    #[test]
    fn shanks() {
        exhaustive(103, SqrtAlgorithm::Shanks);
        exhaustive(3, SqrtAlgorithm::Shanks);

        // P-256 base field
        let field = FieldParams::new(&U256::from_be_hex(
            "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        ))
        .unwrap();
        assert_eq!(field.sqrt_algorithm(), SqrtAlgorithm::Shanks);
        sqrt_test(&field);
    }

    #[test]
    fn atkins() {
        exhaustive(101, SqrtAlgorithm::Atkins);
        exhaustive(13, SqrtAlgorithm::Atkins);

        // Curve25519 base field
        let field = FieldParams::new(&U256::from_be_hex(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
        ))
        .unwrap();
        assert_eq!(field.sqrt_algorithm(), SqrtAlgorithm::Atkins);
        sqrt_test(&field);
    }

    #[test]
    fn tonelli_shanks() {
        exhaustive(97, SqrtAlgorithm::TonelliShanks);
        exhaustive(17, SqrtAlgorithm::TonelliShanks);

        // P-224 base field, p - 1 has 2-adicity 96
        let field = FieldParams::new(&U256::from_be_hex(
            "00000000ffffffffffffffffffffffffffffffff000000000000000000000001",
        ))
        .unwrap();
        assert_eq!(field.sqrt_algorithm(), SqrtAlgorithm::TonelliShanks);
        sqrt_test(&field);
    }

    #[test]
    fn composite_modulus() {
        let field = FieldParams::new(&U64::from_u64(9)).unwrap();
        assert_eq!(field.sqrt_algorithm(), SqrtAlgorithm::Unsupported);
        assert!(bool::from(field.sqrt(&field.one()).is_none()));
    }
}
