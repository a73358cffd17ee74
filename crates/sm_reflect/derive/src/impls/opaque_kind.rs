use proc_macro2::TokenStream;
use quote::quote;
use syn::{WherePredicate, parse_quote};

use super::{impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectMeta;

/// Implements reflection for a type whose structure is hidden.
///
/// A unit struct has a single value, so `set_zero` does nothing and no
/// `Default` bound is needed. Any other opaque type is reset through
/// `Default`.
pub(crate) fn impl_opaque(meta: &ReflectMeta, is_unit: bool) -> TokenStream {
    let sm_reflect_path = meta.sm_reflect_path();
    let type_info_ = crate::path::type_info_(sm_reflect_path);
    let opaque_info_ = crate::path::opaque_info_(sm_reflect_path);
    let default_ = crate::path::default_();

    let with_hooks = meta.with_hooks_expression();
    let info_tokens = quote! {
        #type_info_::Opaque(#opaque_info_::new::<Self>() #with_hooks)
    };

    let self_ty = meta.self_ty();
    let (extra, set_zero_tokens): (Vec<WherePredicate>, TokenStream) = if is_unit {
        (Vec::new(), TokenStream::new())
    } else {
        (
            vec![parse_quote!(#self_ty: #default_)],
            quote! { *self = <Self as #default_>::default(); },
        )
    };

    let typed_tokens = impl_trait_typed(meta, info_tokens, &[], &extra);
    let reflect_tokens = impl_trait_reflect(meta, quote!(Opaque), set_zero_tokens, &[], &extra);

    quote! {
        #typed_tokens

        #reflect_tokens
    }
}
