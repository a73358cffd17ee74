use proc_macro2::TokenStream;
use quote::quote;
use syn::{Type, WherePredicate};

use crate::derive_data::ReflectMeta;

/// Generates the `Reflect` implementation.
///
/// `reflect_kind_token` names the `ReflectKind` / `ReflectRef` / `ReflectMut`
/// variant, and `set_zero_tokens` is the body of `set_zero`.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    reflect_kind_token: TokenStream,
    set_zero_tokens: TokenStream,
    field_types: &[&Type],
    extra: &[WherePredicate],
) -> TokenStream {
    let sm_reflect_path = meta.sm_reflect_path();

    let reflect_ = crate::path::reflect_(sm_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(sm_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(sm_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(sm_reflect_path);

    let self_ty = meta.self_ty();
    let (impl_generics, _, where_clause) = meta.split_generics(field_types, extra);

    quote! {
        impl #impl_generics #reflect_ for #self_ty #where_clause {
            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#reflect_kind_token
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#reflect_kind_token(self)
            }

            fn set_zero(&mut self) {
                #set_zero_tokens
            }
        }
    }
}
