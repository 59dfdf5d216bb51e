//! Error types.

use core::fmt;

/// Errors raised by point conversion and decoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed, out-of-range or off-curve point encoding or coordinates.
    InvalidPoint,

    /// Transformation which is undefined for the point at infinity, such as
    /// converting it to affine coordinates.
    IllegalTransformation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPoint => write!(f, "invalid elliptic curve point"),
            Error::IllegalTransformation => {
                write!(f, "cannot convert the point at infinity to affine form")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
