//! Paths into `sm_reflect` used by the generated code.
//!
//! Keeping them in one place limits the changes needed when the layout of
//! `sm_reflect` moves.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Returns the path through which the invoking crate reaches `sm_reflect`.
///
/// 1. Crates depending on `sm_reflect` get `::sm_reflect`.
/// 2. Crates depending on `structmap` get `::structmap::reflect`.
/// 3. Anything else gets `::sm_reflect`, which also covers `sm_reflect` itself
///    through its `extern crate self as sm_reflect`.
///
/// This reads the caller's manifest, so it is computed once per derive and
/// passed around.
pub(crate) fn sm_reflect() -> syn::Path {
    sm_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("sm_reflect"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! define_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(sm_reflect_path: &syn::Path) -> TokenStream {
                quote! { #sm_reflect_path $(:: $segment)+ }
            }
        )*
    };
}

define_paths! {
    reflect_ => Reflect;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    opaque_info_ => info::OpaqueInfo;
    named_field_ => info::NamedField;
    reflect_kind_ => info::ReflectKind;
    struct_ => ops::Struct;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    value_hooks_ => convert::ValueHooks;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}
