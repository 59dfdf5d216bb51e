//! Error types.

use core::fmt;

/// Errors raised while constructing field or curve parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The modulus is even, so Montgomery arithmetic is unavailable.
    EvenModulus,

    /// The modulus is smaller than 3.
    ModulusTooSmall,

    /// A curve coefficient is not a canonical field element (`≥ p`).
    CoefficientOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EvenModulus => write!(f, "field modulus must be odd"),
            Error::ModulusTooSmall => write!(f, "field modulus must be at least 3"),
            Error::CoefficientOutOfRange => write!(f, "curve coefficient is not reduced mod p"),
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
