use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Fields, FieldsNamed, Ident, LitStr, Type};

use super::{FieldAttributes, ReflectMeta};

/// A field of a derived struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    /// The name exposed through reflection, without any `r#` prefix.
    pub fn reflect_name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

/// A struct with named fields.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(meta: ReflectMeta<'a>, fields: &'a FieldsNamed) -> syn::Result<Self> {
        let fields = fields
            .named
            .iter()
            .map(|field| {
                Ok(StructField {
                    ident: field
                        .ident
                        .as_ref()
                        .expect("named fields always have an identifier"),
                    ty: &field.ty,
                    attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { meta, fields })
    }

    /// Returns `Some(..)` only for structs with named fields.
    pub fn from_fields(meta: ReflectMeta<'a>, fields: &'a Fields) -> Option<syn::Result<Self>> {
        match fields {
            Fields::Named(named) => Some(Self::new(meta, named)),
            _ => None,
        }
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields that take part in reflection, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.ignore.is_none())
    }

    pub fn active_types(&self) -> Vec<&'a Type> {
        self.active_fields().map(|field| field.ty).collect()
    }

    /// Generates the `TypeInfo` expression:
    ///
    /// ```ignore
    /// TypeInfo::Struct(
    ///     StructInfo::new::<Self>(&[
    ///         NamedField::new::<Ty>("name").with_tag("..").with_embedded(true),
    ///         ...
    ///     ])
    ///     .with_hooks(...)
    /// )
    /// ```
    pub fn to_info_tokens(&self) -> TokenStream {
        let sm_reflect_path = self.meta.sm_reflect_path();
        let type_info_ = crate::path::type_info_(sm_reflect_path);
        let struct_info_ = crate::path::struct_info_(sm_reflect_path);
        let named_field_ = crate::path::named_field_(sm_reflect_path);

        let fields = self.active_fields().map(|field| {
            let ty = field.ty;
            let name = LitStr::new(&field.reflect_name(), field.ident.span());
            let with_tag = field.attrs.map.as_ref().map(|tag| quote! { .with_tag(#tag) });
            let with_embedded = field
                .attrs
                .embed
                .map(|_| quote! { .with_embedded(true) });

            quote! {
                #named_field_::new::<#ty>(#name) #with_tag #with_embedded
            }
        });

        let with_hooks = self.meta.with_hooks_expression();

        quote! {
            #type_info_::Struct(
                #struct_info_::new::<Self>(&[
                    #(#fields),*
                ])
                #with_hooks
            )
        }
    }
}
