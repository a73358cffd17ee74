use crate::info::TypeInfo;

/// A type with static [`TypeInfo`].
///
/// Implementations store the info in a `static` cell so it is built once:
/// [`NonGenericTypeInfoCell`] for plain types, [`GenericTypeInfoCell`] for
/// generic ones.
///
/// ```
/// use sm_reflect::info::{ScalarKind, Typed};
///
/// let info = i32::type_info().as_scalar().unwrap();
/// assert_eq!(info.scalar_kind(), ScalarKind::Int(32));
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    /// Returns the compile-time info for this type.
    fn type_info() -> &'static TypeInfo;
}

/// The object-safe counterpart of [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
