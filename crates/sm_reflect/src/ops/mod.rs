//! Kind-specific access to reflected values.
//!
//! - [`ReflectRef`] / [`ReflectMut`]: one variant per
//!   [`ReflectKind`](crate::info::ReflectKind).
//! - [`Struct`]: field access by index or name.
//! - [`List`]: indexed access and resizing, for `Vec<T>`.
//! - [`Pointer`]: access to the pointee, for `Option<T>` and `Box<T>`.
//! - [`ScalarRef`] / [`ScalarMut`]: typed access to strings and numbers.

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod pointer_ops;
mod scalar_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::List;
pub use pointer_ops::Pointer;
pub use scalar_ops::{FloatMut, IntMut, ScalarMut, ScalarRef, UintMut};
pub use struct_ops::Struct;
