//! Development-related functionality: curves with known generators and group
//! orders, for use in tests and benchmarks.

use crate::CurveGFp;
use bigint::{U64, U256, Uint};

/// A curve together with a generator of known order.
#[derive(Clone, Copy, Debug)]
pub struct TestCurve<const LIMBS: usize> {
    /// Curve parameters.
    pub curve: CurveGFp<LIMBS>,

    /// Affine coordinates of the generator.
    pub generator: (Uint<LIMBS>, Uint<LIMBS>),

    /// Order of the subgroup generated by `generator`.
    pub order: Uint<LIMBS>,
}

/// `y² = x³ + 2x + 3` over GF(97).
///
/// The curve has 100 points. The generator `(3, 6)` has order 5; its
/// multiples are `(80, 10)`, `(80, 87)`, `(3, 91)` and the point at infinity.
/// `(30, 0)`, `(68, 0)` and `(96, 0)` are the points of order 2.
pub fn toy97() -> TestCurve<{ U64::LIMBS }> {
    let curve = CurveGFp::new(&U64::from_u64(97), &U64::from_u64(2), &U64::from_u64(3))
        .expect("valid curve parameters");

    TestCurve {
        curve,
        generator: (U64::from_u64(3), U64::from_u64(6)),
        order: U64::from_u64(5),
    }
}

/// NIST P-256 (secp256r1), with `a = -3`.
pub fn p256() -> TestCurve<{ U256::LIMBS }> {
    let curve = CurveGFp::new(
        &U256::from_be_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        &U256::from_be_hex("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
        &U256::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
    )
    .expect("valid curve parameters");

    TestCurve {
        curve,
        generator: (
            U256::from_be_hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
            U256::from_be_hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        ),
        order: U256::from_be_hex(
            "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
        ),
    }
}

/// secp256k1, with `a = 0`.
pub fn secp256k1() -> TestCurve<{ U256::LIMBS }> {
    let curve = CurveGFp::new(
        &U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        &U256::ZERO,
        &U256::from_u64(7),
    )
    .expect("valid curve parameters");

    TestCurve {
        curve,
        generator: (
            U256::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            U256::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        ),
        order: U256::from_be_hex(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
        ),
    }
}

/// NIST P-224 (secp224r1), with `a = -3`.
///
/// `p ≡ 1 (mod 8)`, so square roots take the Tonelli-Shanks path.
pub fn p224() -> TestCurve<{ U256::LIMBS }> {
    let curve = CurveGFp::new(
        &U256::from_be_hex("00000000ffffffffffffffffffffffffffffffff000000000000000000000001"),
        &U256::from_be_hex("00000000fffffffffffffffffffffffffffffffefffffffffffffffffffffffe"),
        &U256::from_be_hex("00000000b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
    )
    .expect("valid curve parameters");

    TestCurve {
        curve,
        generator: (
            U256::from_be_hex("00000000b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
            U256::from_be_hex("00000000bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
        ),
        order: U256::from_be_hex(
            "00000000ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
        ),
    }
}
