use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::derive_data::{ReflectMeta, ReflectStruct, TypeAttributes};

/// Entry point of `#[derive(Reflect)]`.
pub(crate) fn match_reflect_impls(ast: DeriveInput) -> TokenStream {
    let reflect_impls = match expand(&ast) {
        Ok(tokens) => tokens,
        Err(err) => return err.into_compile_error(),
    };

    quote! {
        const _: () = {
            #reflect_impls
        };
    }
}

fn expand(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let explicit_opaque = attrs.opaque.is_some();
    let meta = ReflectMeta::new(attrs, &ast.ident, &ast.generics);

    if explicit_opaque {
        return Ok(super::impl_opaque(&meta, false));
    }

    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Unit => Ok(super::impl_opaque(&meta, true)),
            fields => match ReflectStruct::from_fields(meta, fields) {
                Some(info) => Ok(super::impl_struct(&info?)),
                None => Err(syn::Error::new_spanned(
                    &ast.ident,
                    "tuple structs can only be reflected as `#[reflect(Opaque)]`",
                )),
            },
        },
        Data::Enum(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "enums can only be reflected as `#[reflect(Opaque)]`",
        )),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "unions can only be reflected as `#[reflect(Opaque)]`",
        )),
    }
}
