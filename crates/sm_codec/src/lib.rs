#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod compile;
mod config;
mod error;
mod flat_map;
mod marshal;
mod tag;
mod unmarshal;

pub mod plan;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::{Config, KeyTransform};
pub use error::{Direction, Error};
pub use flat_map::{FlatMap, ValueMap};
pub use marshal::Marshaler;
pub use unmarshal::Unmarshaler;

// -----------------------------------------------------------------------------
// Default engines

use sm_reflect::Reflect;
use sm_reflect::info::Typed;

static DEFAULT_MARSHALER: Marshaler = Marshaler::new(Config::new());
static DEFAULT_UNMARSHALER: Unmarshaler = Unmarshaler::new(Config::new());

/// Writes `src` into `dst` with a process-wide [`Marshaler`] using the
/// default [`Config`].
#[inline]
pub fn marshal<T, M>(src: &T, dst: &mut M) -> Result<(), Error>
where
    T: Reflect + Typed,
    M: FlatMap + ?Sized,
{
    DEFAULT_MARSHALER.marshal(src, dst)
}

/// Fills `dst` from `src` with a process-wide [`Unmarshaler`] using the
/// default [`Config`].
#[inline]
pub fn unmarshal<M, T>(src: &M, dst: &mut T) -> Result<(), Error>
where
    M: FlatMap + ?Sized,
    T: Reflect + Typed,
{
    DEFAULT_UNMARSHALER.unmarshal(src, dst)
}
