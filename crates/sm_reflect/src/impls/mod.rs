//! Reflection for foreign types, and the cells used to implement [`Typed`].
//!
//! ## Implemented types
//!
//! - scalars: `String`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`, `f32`, `f64`,
//!   `bool`, `char`
//! - lists: `Vec<T>`
//! - pointers: `Option<T>` (nullable), `Box<T>`
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod native;
mod option;
mod vec;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
