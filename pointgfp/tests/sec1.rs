//! SEC1 encoding tests.

use curvegfp::{
    SqrtAlgorithm,
    dev::{TestCurve, p224, p256, secp256k1},
};
use hex_literal::hex;
use pointgfp::{
    CurveGFp, Error, Point, PointFormat, ScalarMultiplier, Workspace, bigint::U256, decode,
    decode_coordinates, encode,
};
use proptest::prelude::*;
use rand_core::OsRng;

const FORMATS: [PointFormat; 3] = [
    PointFormat::Uncompressed,
    PointFormat::Compressed,
    PointFormat::Hybrid,
];

const P256_UNCOMPRESSED: [u8; 65] = hex!(
    "04"
    "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
    "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
);

const P256_COMPRESSED: [u8; 33] =
    hex!("03" "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");

const P256_HYBRID: [u8; 65] = hex!(
    "07"
    "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
    "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
);

const K256_COMPRESSED: [u8; 33] =
    hex!("02" "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");

#[test]
fn p256_generator_encodings() {
    let test = p256();
    let g = Point::from_affine(&test.curve, &test.generator.0, &test.generator.1).unwrap();

    assert_eq!(encode(&g, PointFormat::Uncompressed), P256_UNCOMPRESSED);
    assert_eq!(encode(&g, PointFormat::Compressed), P256_COMPRESSED);
    assert_eq!(encode(&g, PointFormat::Hybrid), P256_HYBRID);
    assert_eq!(g.to_sec1(PointFormat::default()), P256_UNCOMPRESSED);

    let encodings: [&[u8]; 3] = [&P256_UNCOMPRESSED, &P256_COMPRESSED, &P256_HYBRID];

    for bytes in encodings {
        let decoded = Point::from_sec1(&test.curve, bytes).unwrap();
        assert!(decoded.is_affine());
        assert_eq!(decoded, g);
        assert_eq!(
            decode_coordinates(bytes, &test.curve),
            Ok(Some(test.generator))
        );
    }
}

#[test]
fn secp256k1_compressed_generator() {
    let test = secp256k1();
    let g = Point::from_affine(&test.curve, &test.generator.0, &test.generator.1).unwrap();

    assert_eq!(encode(&g, PointFormat::Compressed), K256_COMPRESSED);
    assert_eq!(decode(&K256_COMPRESSED, &test.curve), Ok(g));

    let mut odd = K256_COMPRESSED;
    odd[0] = 0x03;
    assert_eq!(decode(&odd, &test.curve), Ok(g.neg()));
}

#[test]
fn encoding_ignores_representation() {
    let test = p256();
    let g = Point::from_affine(&test.curve, &test.generator.0, &test.generator.1).unwrap();
    let mut ws = Workspace::new(&test.curve);

    let mut p = g.double(&mut ws);
    let expected = encode(&p, PointFormat::Compressed);

    p.randomize_repr(&mut OsRng);
    assert_eq!(encode(&p, PointFormat::Compressed), expected);
    assert_eq!(decode(&expected, &test.curve), Ok(p));
}

#[test]
fn rejects_malformed() {
    let test = p256();
    let curve = &test.curve;

    // truncated
    assert_eq!(decode(&P256_UNCOMPRESSED[..64], curve), Err(Error::InvalidPoint));
    assert_eq!(decode(&P256_COMPRESSED[..32], curve), Err(Error::InvalidPoint));

    // compressed tag on an uncompressed payload
    let mut bytes = P256_UNCOMPRESSED;
    bytes[0] = 0x02;
    assert_eq!(decode(&bytes, curve), Err(Error::InvalidPoint));

    // hybrid tag disagreeing with the parity of y
    let mut bytes = P256_HYBRID;
    bytes[0] = 0x06;
    assert_eq!(decode(&bytes, curve), Err(Error::InvalidPoint));

    // y + 1 is not on the curve
    let mut bytes = P256_UNCOMPRESSED;
    bytes[64] ^= 1;
    assert_eq!(decode(&bytes, curve), Err(Error::InvalidPoint));

    // x = p is out of range
    let bytes = hex!("02" "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
    assert_eq!(decode(&bytes, curve), Err(Error::InvalidPoint));

    assert_eq!(decode(&[], curve), Err(Error::InvalidPoint));
    assert_eq!(decode(&[0x05], curve), Err(Error::InvalidPoint));
}

#[test]
fn identity() {
    let test = secp256k1();
    let zero = Point::zero(&test.curve);

    assert_eq!(zero.to_sec1(PointFormat::Compressed), [0x00]);
    assert!(Point::from_sec1(&test.curve, &[0x00]).unwrap().is_zero());
    assert_eq!(decode_coordinates::<{ U256::LIMBS }>(&[0x00], &test.curve), Ok(None));
}

#[test]
fn p224_compressed_generator() {
    let test = p224();
    assert_eq!(test.curve.field().sqrt_algorithm(), SqrtAlgorithm::TonelliShanks);
    assert_eq!(test.curve.field_bytes(), 28);

    let g = Point::from_affine(&test.curve, &test.generator.0, &test.generator.1).unwrap();
    let bytes = hex!("02" "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21");

    assert_eq!(encode(&g, PointFormat::Compressed), bytes);
    assert_eq!(decode(&bytes, &test.curve), Ok(g));

    let g2 = hex!("03" "706a46dc76dcb76798e60e6d89474788d16dc18032d268fd1a704fa6");
    let mut ws = Workspace::new(&test.curve);
    assert_eq!(decode(&g2, &test.curve), Ok(g.double(&mut ws)));
    assert_eq!(
        decode_coordinates(&g2, &test.curve).unwrap().map(|(_, y)| y),
        Some(U256::from_be_hex(
            "000000001c2b76a7bc25e7702a704fa986892849fca629487acf3709d2e4e8bb"
        ))
    );

    assert!(ScalarMultiplier::multiply(&g, &test.order, &mut ws).is_zero());
}

/// `y² = x³ + 2x + 3` over GF(2^255 - 19), where `p ≡ 5 (mod 8)`.
#[test]
fn atkins_decompression() {
    let curve = CurveGFp::new(
        &U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        &U256::from_u64(2),
        &U256::from_u64(3),
    )
    .unwrap();
    assert_eq!(curve.field().sqrt_algorithm(), SqrtAlgorithm::Atkins);

    let y = U256::from_be_hex("5ec5698dec9aeb9fb06ea55e8cfa6579063f715dbd2aed12e920fbee4a0c86ba");
    let p = Point::from_affine(&curve, &U256::ZERO, &y).unwrap();
    assert!(p.on_the_curve());

    let even = hex!("02" "0000000000000000000000000000000000000000000000000000000000000000");
    let odd = hex!("03" "0000000000000000000000000000000000000000000000000000000000000000");

    assert_eq!(encode(&p, PointFormat::Compressed), even);
    assert_eq!(decode(&even, &curve), Ok(p));
    assert_eq!(decode(&odd, &curve), Ok(p.neg()));

    let mut ws = Workspace::new(&curve);
    let p2 = p.double(&mut ws);
    assert_eq!(
        p2.affine_coordinates(),
        Ok((
            U256::from_be_hex("5555555555555555555555555555555555555555555555555555555555555549"),
            U256::from_be_hex("24ebc39b31fe886b031348419c3f1d798747baed2dd04deafcf7cba1e69cbf8e"),
        ))
    );

    for point in [p, p.neg(), p2, p2.plus(&p, &mut ws)] {
        for format in FORMATS {
            assert_eq!(decode(&encode(&point, format), &curve), Ok(point));
        }
    }
}

fn test_curve() -> impl Strategy<Value = TestCurve<{ U256::LIMBS }>> {
    prop_oneof![Just(p256()), Just(secp256k1()), Just(p224())]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn round_trip(test in test_curve(), bytes in any::<[u8; 32]>()) {
        let g = Point::from_affine(&test.curve, &test.generator.0, &test.generator.1).unwrap();
        let mut ws = Workspace::new(&test.curve);

        let mut point = ScalarMultiplier::multiply(&g, &U256::from_be_slice(&bytes), &mut ws);
        point.randomize_repr(&mut OsRng);

        for format in FORMATS {
            let encoded = encode(&point, format);
            let decoded = decode(&encoded, &test.curve).unwrap();

            prop_assert_eq!(decoded, point);
            prop_assert!(decoded.is_zero() || decoded.is_affine());
            prop_assert_eq!(encode(&decoded, format), encoded);
        }
    }
}
