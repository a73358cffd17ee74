use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::{impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectStruct;

/// Implements `Typed`, `Reflect` and `Struct` for a struct with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let field_types = info.active_types();

    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens(), &field_types, &[]);

    let reflect_ = crate::path::reflect_(meta.sm_reflect_path());
    let field_idents = info.active_fields().map(|field| field.ident);
    let set_zero_tokens = quote! {
        #(#reflect_::set_zero(&mut self.#field_idents);)*
    };
    let reflect_trait_tokens =
        impl_trait_reflect(meta, quote!(Struct), set_zero_tokens, &field_types, &[]);

    let struct_trait_tokens = impl_trait_struct(info);

    quote! {
        #typed_trait_tokens

        #reflect_trait_tokens

        #struct_trait_tokens
    }
}

/// Generates the `Struct` implementation.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let sm_reflect_path = meta.sm_reflect_path();
    let struct_ = crate::path::struct_(sm_reflect_path);
    let reflect_ = crate::path::reflect_(sm_reflect_path);
    let option_ = crate::path::option_();

    let field_names: Vec<String> = info.active_fields().map(|f| f.reflect_name()).collect();
    let field_idents: Vec<_> = info.active_fields().map(|f| f.ident).collect();
    let field_indices: Vec<Literal> = (0..field_idents.len())
        .map(Literal::usize_unsuffixed)
        .collect();
    let field_count = field_idents.len();

    let field_types = info.active_types();
    let self_ty = meta.self_ty();
    let (impl_generics, _, where_clause) = meta.split_generics(&field_types, &[]);

    quote! {
        impl #impl_generics #struct_ for #self_ty #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(#reflect_::as_reflect(&self.#field_idents)),)*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(#reflect_::as_reflect_mut(&mut self.#field_idents)),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(#reflect_::as_reflect(&self.#field_idents)),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(#reflect_::as_reflect_mut(&mut self.#field_idents)),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#field_indices => #option_::Some(#field_names),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }
        }
    }
}
