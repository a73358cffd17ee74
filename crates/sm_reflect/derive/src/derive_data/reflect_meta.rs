use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, Path, Type, WherePredicate, parse_quote};

use super::TypeAttributes;

/// Data shared by every kind of derive target.
pub(crate) struct ReflectMeta<'a> {
    sm_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("sm_reflect_path", &self.sm_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            sm_reflect_path: crate::path::sm_reflect(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn sm_reflect_path(&self) -> &Path {
        &self.sm_reflect_path
    }

    /// Returns `true` if the type has type or const parameters, in which case
    /// a single `static` cannot hold its type info.
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, syn::GenericParam::Lifetime(_)))
    }

    /// Splits the generics for an impl block.
    ///
    /// Every type parameter gets `Send + Sync + 'static`, and every type in
    /// `field_types` gets `Reflect + Typed`. `extra` predicates are appended
    /// as given.
    pub fn split_generics(
        &self,
        field_types: &[&Type],
        extra: &[WherePredicate],
    ) -> (TokenStream, TokenStream, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let reflect_ = crate::path::reflect_(&self.sm_reflect_path);
        let typed_ = crate::path::typed_(&self.sm_reflect_path);

        let mut predicates: Vec<WherePredicate> = where_clause
            .map(|clause| clause.predicates.iter().cloned().collect())
            .unwrap_or_default();

        for param in self.generics.type_params() {
            let ident = &param.ident;
            predicates.push(parse_quote! {
                #ident: ::core::marker::Send + ::core::marker::Sync + 'static
            });
        }

        // Non-generic field types are checked by the impl bodies themselves.
        if self.generics.type_params().next().is_some() {
            for ty in field_types {
                predicates.push(parse_quote!(#ty: #reflect_ + #typed_));
            }
        }

        predicates.extend(extra.iter().cloned());

        let where_tokens = if predicates.is_empty() {
            TokenStream::new()
        } else {
            quote! { where #(#predicates,)* }
        };

        (
            impl_generics.to_token_stream(),
            ty_generics.to_token_stream(),
            where_tokens,
        )
    }

    /// Returns the full type, e.g. `Foo<T>`.
    pub fn self_ty(&self) -> TokenStream {
        let ident = self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote! { #ident #ty_generics }
    }

    /// Generates the `.with_hooks(...)` call for the type's info, or nothing
    /// when no hook is requested.
    pub fn with_hooks_expression(&self) -> TokenStream {
        if self.attrs.marshal.is_none() && self.attrs.unmarshal.is_none() {
            return TokenStream::new();
        }

        let value_hooks_ = crate::path::value_hooks_(&self.sm_reflect_path);
        let with_marshaler = self
            .attrs
            .marshal
            .map(|span| quote::quote_spanned! { span=> .with_marshaler::<Self>() });
        let with_unmarshaler = self
            .attrs
            .unmarshal
            .map(|span| quote::quote_spanned! { span=> .with_unmarshaler::<Self>() });

        quote! {
            .with_hooks(#value_hooks_::new() #with_marshaler #with_unmarshaler)
        }
    }
}
