#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;

#[cfg(feature = "dev")]
pub mod dev;

mod curve;
mod error;
mod field;
pub mod uint;

pub use crate::{
    curve::{CurveGFp, EquationA},
    error::{Error, Result},
    field::{FieldElement, FieldParams, SqrtAlgorithm},
};
pub use bigint;
pub use rand_core;
pub use subtle;
pub use zeroize;
