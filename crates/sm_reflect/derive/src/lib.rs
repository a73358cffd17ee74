//! Provides `#[derive(Reflect)]` for `sm_reflect`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements:
///
/// - `Typed`
/// - `Reflect`
/// - `Struct` (for `struct T { ... }`)
///
/// Unit structs (`struct T;`) are treated as `Opaque`. Enums and tuple structs
/// must be marked `Opaque` explicitly.
///
/// Every reflected field type must implement `Reflect` and `Typed`; the
/// generated impls carry these bounds, so generic structs work as long as
/// their parameters satisfy them.
///
/// ## Field attributes
///
/// ### `map`
///
/// Stores the raw `map` tag in the field's `NamedField`. The string is not
/// checked here; `structmap` reads it as `"<name>,<option>,..."`.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Login {
///     #[reflect(map = "user,required")]
///     user: String,
///     #[reflect(map = "-")]
///     cache_hint: String,
/// }
/// ```
///
/// ### `embed`
///
/// Marks the field as embedded: its own fields are promoted to the parent's
/// key namespace unless it is given a name with `map`.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Request {
///     #[reflect(embed)]
///     paging: Paging,
///     query: String,
/// }
/// ```
///
/// ### `ignore`
///
/// Removes the field from reflection entirely: it has no `NamedField`, no
/// index, and `set_zero` leaves it untouched. Its type does not need to
/// implement `Reflect`.
///
/// ## Type attributes
///
/// ### `Opaque`
///
/// The type is reflected without its fields. `set_zero` assigns
/// `Default::default()`, so the type must implement `Default`.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(Opaque)]
/// struct Token([u8; 16]);
/// ```
///
/// ### `marshal` / `unmarshal`
///
/// Registers the type's `ValueMarshaler` / `ValueUnmarshaler` implementation in
/// its `TypeInfo`. Both can be combined with any kind.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(Opaque, marshal, unmarshal)]
/// struct Tags(Vec<String>);
///
/// impl ValueMarshaler for Tags { /* ... */ }
/// impl ValueUnmarshaler for Tags { /* ... */ }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast).into()
}
