//! Static storage for [`TypeInfo`].
//!
//! A `static CELL` inside a non-generic `type_info` function belongs to a single
//! type, so [`NonGenericTypeInfoCell`] is a plain [`OnceLock`].
//!
//! Inside a generic function the same `static` is shared by every
//! instantiation, so [`GenericTypeInfoCell`] keeps one entry per [`TypeId`]
//! behind a [`RwLock`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use sm_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Storage for the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use sm_reflect::impls::NonGenericTypeInfoCell;
/// use sm_reflect::info::{StructInfo, NamedField, TypeInfo, Typed};
///
/// struct Point { x: i32 }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Struct(
///             StructInfo::new::<Self>(&[NamedField::new::<i32>("x")])
///         ))
///     }
/// }
///
/// assert_eq!(Point::type_info().as_struct().unwrap().field_len(), 1);
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

/// Storage for the [`TypeInfo`] of every instantiation of a generic type.
///
/// Entries are leaked on insertion and live for the rest of the process; the
/// number of entries is bounded by the instantiations in the program.
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, building it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Kept out of line so each instantiation only inlines the `TypeId` lookup.
    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &TypeInfo {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match cached {
            Some(info) => info,
            None => {
                // `f` may need the info of other instantiations; build it
                // before taking the write lock.
                let info = f();
                *self
                    .0
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(type_id, || Box::leak(Box::new(info)))
            }
        }
    }
}
