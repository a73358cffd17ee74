#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `sm_reflect`, which must also resolve
// inside the crate itself (unit tests, doc tests).
extern crate self as sm_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod convert;
pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::Reflect;
pub use sm_reflect_derive as derive;
