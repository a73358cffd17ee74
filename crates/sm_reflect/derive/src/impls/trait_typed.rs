use proc_macro2::TokenStream;
use quote::quote;
use syn::{Type, WherePredicate};

use crate::derive_data::ReflectMeta;

/// Generates the `Typed` implementation.
///
/// `type_info_tokens` builds the `TypeInfo`; see
/// [`ReflectStruct::to_info_tokens`](crate::derive_data::ReflectStruct::to_info_tokens).
pub(crate) fn impl_trait_typed(
    meta: &ReflectMeta,
    type_info_tokens: TokenStream,
    field_types: &[&Type],
    extra: &[WherePredicate],
) -> TokenStream {
    let sm_reflect_path = meta.sm_reflect_path();
    let typed_ = crate::path::typed_(sm_reflect_path);
    let type_info_ = crate::path::type_info_(sm_reflect_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(sm_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(sm_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let self_ty = meta.self_ty();
    let (impl_generics, _, where_clause) = meta.split_generics(field_types, extra);

    quote! {
        impl #impl_generics #typed_ for #self_ty #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
