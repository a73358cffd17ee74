use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Type-level `#[reflect(...)]` flags.
///
/// Each flag keeps the span it was written at, for error reporting.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[reflect(Opaque)]`
    pub opaque: Option<Span>,
    /// `#[reflect(marshal)]`
    pub marshal: Option<Span>,
    /// `#[reflect(unmarshal)]`
    pub unmarshal: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("Opaque") {
                    set_flag(&mut this.opaque, &meta)
                } else if meta.path.is_ident("marshal") {
                    set_flag(&mut this.marshal, &meta)
                } else if meta.path.is_ident("unmarshal") {
                    set_flag(&mut this.unmarshal, &meta)
                } else {
                    Err(meta.error(
                        "unsupported type attribute, expected `Opaque`, `marshal` or `unmarshal`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

/// Field-level `#[reflect(...)]` options.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[reflect(map = "...")]`
    pub map: Option<LitStr>,
    /// `#[reflect(embed)]`
    pub embed: Option<Span>,
    /// `#[reflect(ignore)]`
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("map") {
                    if this.map.is_some() {
                        return Err(meta.error("duplicate `map` attribute"));
                    }
                    this.map = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("embed") {
                    set_flag(&mut this.embed, &meta)
                } else if meta.path.is_ident("ignore") {
                    set_flag(&mut this.ignore, &meta)
                } else {
                    Err(meta.error(
                        "unsupported field attribute, expected `map`, `embed` or `ignore`",
                    ))
                }
            })?;
        }

        if let Some(span) = this.ignore
            && (this.map.is_some() || this.embed.is_some())
        {
            return Err(syn::Error::new(
                span,
                "an ignored field cannot also use `map` or `embed`",
            ));
        }

        Ok(this)
    }
}

fn reflect_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
}

fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}
