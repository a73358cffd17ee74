use crate::info::{TypeInfo, Typed};

/// A named struct field.
///
/// Besides the field's name and type, it keeps the raw `map` tag written with
/// `#[reflect(map = "...")]` and whether the field is embedded
/// (`#[reflect(embed)]`). Interpreting the tag is left to the consumer.
///
/// ```
/// use sm_reflect::info::NamedField;
///
/// const FIELD: NamedField = NamedField::new::<String>("first_name")
///     .with_tag("first,required")
///     .with_embedded(false);
///
/// assert_eq!(FIELD.name(), "first_name");
/// assert_eq!(FIELD.tag(), Some("first,required"));
/// assert!(FIELD.type_info().is::<String>());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NamedField {
    name: &'static str,
    type_info: fn() -> &'static TypeInfo,
    tag: Option<&'static str>,
    embedded: bool,
}

impl NamedField {
    /// Creates a field of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            tag: None,
            embedded: false,
        }
    }

    /// Sets the raw `map` tag.
    #[inline]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Marks the field as embedded.
    #[inline]
    pub const fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Returns the declared name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the info of the field's type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the raw `map` tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// Returns `true` for embedded fields.
    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}
