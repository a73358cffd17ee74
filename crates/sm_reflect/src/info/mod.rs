//! Static type information.
//!
//! - [`Typed`]: implemented by every reflected type, returns its [`TypeInfo`].
//! - [`TypeInfo`]: one variant per [`ReflectKind`], each carrying the [`Type`]
//!   and the [`ValueHooks`] of the described type.
//! - [`NamedField`]: a struct field, with its `map` tag and embedding flag.
//!
//! [`ValueHooks`]: crate::convert::ValueHooks

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod kind;
mod list_info;
mod opaque_info;
mod pointer_info;
mod scalar_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::NamedField;
pub use kind::{ReflectKind, ReflectKindError};
pub use list_info::ListInfo;
pub use opaque_info::OpaqueInfo;
pub use pointer_info::PointerInfo;
pub use scalar_info::{ScalarInfo, ScalarKind};
pub use struct_info::StructInfo;
pub use ty::Type;
pub use type_info::TypeInfo;
pub use typed::{DynamicTyped, Typed};
