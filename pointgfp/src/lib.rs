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

#[cfg(feature = "std")]
extern crate std;

mod codec;
mod error;
mod lookup_table;
mod mul;
mod multiexp;
mod point;
mod point_arithmetic;
mod workspace;

pub use crate::{
    codec::{PointFormat, decode, decode_coordinates, encode},
    error::{Error, Result},
    lookup_table::WINDOW_BITS,
    mul::ScalarMultiplier,
    multiexp::{MultiExponentiator, multi_exponentiate},
    point::Point,
    workspace::{WORKSPACE_SIZE, Workspace},
};
pub use bigint;
pub use curvegfp::{self, CurveGFp, EquationA, FieldElement, FieldParams};
pub use rand_core;
pub use subtle;
