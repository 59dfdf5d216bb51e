//! SEC1 point encoding (`Elliptic-Curve-Point-to-Octet-String` and back).
//!
//! With `L = ⌈bits(p) / 8⌉` the supported encodings are:
//!
//! - `00`: the point at infinity (1 byte)
//! - `04 || X || Y`: uncompressed (`1 + 2L` bytes)
//! - `02 || X`, `03 || X`: compressed, with the tag giving the parity of `y`
//!   (`1 + L` bytes)
//! - `06 || X || Y`, `07 || X || Y`: hybrid, uncompressed with the parity of
//!   `y` repeated in the tag (`1 + 2L` bytes)

use crate::{Error, Point, Result};
use alloc::{vec, vec::Vec};
use bigint::Uint;
use curvegfp::{CurveGFp, FieldElement};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Point encoding formats.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PointFormat {
    /// `04 || X || Y`
    #[default]
    Uncompressed,

    /// `02 || X` or `03 || X`
    Compressed,

    /// `06 || X || Y` or `07 || X || Y`
    Hybrid,
}

/// Tag byte of an encoded point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
enum Tag {
    /// Point at infinity.
    Identity = 0,

    /// Compressed point with even y-coordinate.
    CompressedEvenY = 2,

    /// Compressed point with odd y-coordinate.
    CompressedOddY = 3,

    /// Uncompressed point.
    Uncompressed = 4,

    /// Hybrid point with even y-coordinate.
    HybridEvenY = 6,

    /// Hybrid point with odd y-coordinate.
    HybridOddY = 7,
}

impl Tag {
    fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Tag::Identity),
            2 => Ok(Tag::CompressedEvenY),
            3 => Ok(Tag::CompressedOddY),
            4 => Ok(Tag::Uncompressed),
            6 => Ok(Tag::HybridEvenY),
            7 => Ok(Tag::HybridOddY),
            _ => Err(Error::InvalidPoint),
        }
    }

    /// Tag for `format` given the parity of the affine `y`.
    fn for_format(format: PointFormat, y_is_odd: bool) -> Self {
        match (format, y_is_odd) {
            (PointFormat::Uncompressed, _) => Tag::Uncompressed,
            (PointFormat::Compressed, false) => Tag::CompressedEvenY,
            (PointFormat::Compressed, true) => Tag::CompressedOddY,
            (PointFormat::Hybrid, false) => Tag::HybridEvenY,
            (PointFormat::Hybrid, true) => Tag::HybridOddY,
        }
    }

    /// Number of bytes following the tag.
    fn payload_len(self, field_bytes: usize) -> usize {
        match self {
            Tag::Identity => 0,
            Tag::CompressedEvenY | Tag::CompressedOddY => field_bytes,
            Tag::Uncompressed | Tag::HybridEvenY | Tag::HybridOddY => 2 * field_bytes,
        }
    }
}

/// Encode `point` in the given format.
///
/// The point at infinity encodes as the single byte `00` regardless of
/// `format`.
pub fn encode<const LIMBS: usize>(point: &Point<'_, LIMBS>, format: PointFormat) -> Vec<u8> {
    let Ok((x, y)) = point.affine_elements() else {
        return vec![Tag::Identity as u8];
    };

    let len = point.curve().field_bytes();
    let tag = Tag::for_format(format, y.is_odd().into());

    let mut out = vec![0u8; 1 + tag.payload_len(len)];
    out[0] = tag as u8;
    x.write_be_bytes(&mut out[1..1 + len]);

    if format != PointFormat::Compressed {
        y.write_be_bytes(&mut out[1 + len..]);
    }

    out
}

/// Decode a point on `curve`.
///
/// Fails with [`Error::InvalidPoint`] if `bytes` is empty, has an unknown tag,
/// has the wrong length for its tag, contains a coordinate `≥ p`, has a hybrid
/// tag disagreeing with the parity of `y`, names an `x` for which no `y`
/// exists, or does not satisfy the curve equation.
pub fn decode<'c, const LIMBS: usize>(
    bytes: &[u8],
    curve: &'c CurveGFp<LIMBS>,
) -> Result<Point<'c, LIMBS>> {
    Ok(match decode_elements(bytes, curve)? {
        Some((x, y)) => Point::from_affine_elements(curve, x, y),
        None => Point::zero(curve),
    })
}

/// Decode the affine coordinates of a point on `curve`, with the same checks
/// as [`decode`].
///
/// Returns `None` for the point at infinity.
pub fn decode_coordinates<const LIMBS: usize>(
    bytes: &[u8],
    curve: &CurveGFp<LIMBS>,
) -> Result<Option<(Uint<LIMBS>, Uint<LIMBS>)>> {
    Ok(decode_elements(bytes, curve)?.map(|(x, y)| (x.to_uint(), y.to_uint())))
}

fn decode_elements<const LIMBS: usize>(
    bytes: &[u8],
    curve: &CurveGFp<LIMBS>,
) -> Result<Option<(FieldElement<LIMBS>, FieldElement<LIMBS>)>> {
    let (&tag, payload) = bytes.split_first().ok_or(Error::InvalidPoint)?;
    let tag = Tag::from_u8(tag)?;
    let len = curve.field_bytes();

    if payload.len() != tag.payload_len(len) {
        return Err(Error::InvalidPoint);
    }

    let (x, y) = match tag {
        Tag::Identity => return Ok(None),
        Tag::CompressedEvenY | Tag::CompressedOddY => {
            let x = field_element(curve, payload)?;
            let y = decompress(curve, &x, Choice::from((tag == Tag::CompressedOddY) as u8))?;
            (x, y)
        }
        Tag::Uncompressed => (
            field_element(curve, &payload[..len])?,
            field_element(curve, &payload[len..])?,
        ),
        Tag::HybridEvenY | Tag::HybridOddY => {
            let x = field_element(curve, &payload[..len])?;
            let y = field_element(curve, &payload[len..])?;

            if bool::from(y.is_odd()) != (tag == Tag::HybridOddY) {
                return Err(Error::InvalidPoint);
            }

            (x, y)
        }
    };

    if y.square() != curve.rhs(&x) {
        return Err(Error::InvalidPoint);
    }

    Ok(Some((x, y)))
}

fn field_element<const LIMBS: usize>(
    curve: &CurveGFp<LIMBS>,
    bytes: &[u8],
) -> Result<FieldElement<LIMBS>> {
    Option::from(curve.field().from_be_slice(bytes)).ok_or(Error::InvalidPoint)
}

/// Recover `y` from `x` and the parity of `y`.
fn decompress<const LIMBS: usize>(
    curve: &CurveGFp<LIMBS>,
    x: &FieldElement<LIMBS>,
    y_is_odd: Choice,
) -> Result<FieldElement<LIMBS>> {
    let beta: FieldElement<LIMBS> =
        Option::from(curve.field().sqrt(&curve.rhs(x))).ok_or(Error::InvalidPoint)?;
    let y = FieldElement::conditional_select(&-beta, &beta, beta.is_odd().ct_eq(&y_is_odd));

    // `y = 0` has no odd representative
    if bool::from(y.is_odd().ct_eq(&y_is_odd)) {
        Ok(y)
    } else {
        Err(Error::InvalidPoint)
    }
}
