use crate::convert::ValueHooks;
use crate::info::{NamedField, Type, Typed};

use super::type_info::impl_common_info;

/// Information about a struct with named fields.
///
/// Fields are kept in declaration order, without the ones marked
/// `#[reflect(ignore)]`. Their positions match the indices used by
/// [`Struct::field_at`](crate::ops::Struct::field_at).
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    hooks: ValueHooks,
}

impl_common_info!(StructInfo);

impl StructInfo {
    /// Creates the info of struct `T` from its fields.
    pub fn new<T: Typed>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            hooks: ValueHooks::new(),
        }
    }

    /// Returns the field at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the field called `name`.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the index of the field called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Iterates over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NamedField> {
        self.fields.iter()
    }

    /// Returns the number of reflected fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
