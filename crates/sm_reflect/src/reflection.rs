use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// Runtime access to a value whose concrete type is not known statically.
///
/// `Reflect` pairs a value with its static [`TypeInfo`] (through
/// [`DynamicTyped`]) and exposes kind-specific views of the value:
///
/// - [`reflect_ref`] / [`reflect_mut`] return a [`ReflectRef`] / [`ReflectMut`],
///   one variant per [`ReflectKind`].
/// - [`set_zero`] resets the value to its zero state.
///
/// Prefer `#[derive(Reflect)]` over implementing this by hand. A manual
/// implementation must report the same kind from [`reflect_ref`],
/// [`reflect_mut`] and its [`TypeInfo`]; code driven by type information relies
/// on it.
///
/// # Example
///
/// ```
/// use sm_reflect::{Reflect, ops::{ReflectRef, ScalarRef}};
///
/// let value: &dyn Reflect = &7_i16;
/// assert!(matches!(value.reflect_ref(), ReflectRef::Scalar(ScalarRef::Int(7))));
/// assert_eq!(value.downcast_ref::<i16>(), Some(&7));
/// ```
///
/// [`TypeInfo`]: crate::info::TypeInfo
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`set_zero`]: Reflect::set_zero
pub trait Reflect: DynamicTyped + Any + Send + Sync {
    /// Casts this type to a reflected value.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Casts this type to a mutable reflected value.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Returns the kind of this value.
    ///
    /// Always equal to `self.reflect_ref().kind()`.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_ref().kind()
    }

    /// Returns an immutable, kind-specific view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable, kind-specific view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Resets this value to its zero state.
    ///
    /// - scalars become their `Default` value;
    /// - lists are emptied, keeping their allocation;
    /// - nullable pointers become null, non-nullable pointers zero their pointee;
    /// - structs zero every reflected field;
    /// - opaque types are replaced by their `Default` value.
    fn set_zero(&mut self);
}

impl dyn Reflect {
    /// Returns the [`TypeId`] of the underlying value.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        (self as &dyn Any).type_id()
    }

    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Reflect>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcasts to `&T` if the underlying value is a `T`.
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Downcasts to `&mut T` if the underlying value is a `T`.
    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dyn Reflect<{}>({})",
            self.reflect_type_info().type_name(),
            self.reflect_kind()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::Typed;
    use crate::ops::{Pointer, ReflectMut, Struct};
    use core::any::TypeId;

    #[test]
    fn downcast() {
        let mut value = String::from("text");
        let reflect: &mut dyn Reflect = &mut value;

        assert!(reflect.is::<String>());
        assert!(!reflect.is::<i32>());
        assert_eq!(reflect.ty_id(), TypeId::of::<String>());

        reflect.downcast_mut::<String>().unwrap().push('!');
        assert_eq!(value, "text!");
    }

    #[derive(Reflect, Default)]
    struct Node {
        value: i32,
        next: Option<Box<Node>>,
    }

    #[test]
    fn self_referential_struct() {
        let info = Node::type_info().as_struct().unwrap();
        let next = info.field("next").unwrap().type_info().as_pointer().unwrap();
        assert!(next.pointee_info().is::<Box<Node>>());

        let mut node = Node {
            value: 1,
            next: Some(Box::new(Node {
                value: 2,
                next: None,
            })),
        };
        let next = node.field_mut("next").unwrap().reflect_mut();
        assert!(matches!(next, ReflectMut::Pointer(ptr) if !Pointer::is_null(ptr)));

        node.set_zero();
        assert_eq!(node.value, 0);
        assert!(node.next.is_none());
    }

    #[test]
    fn debug_names_type_and_kind() {
        let reflect: &dyn Reflect = &vec![1_i32];
        let text = format!("{reflect:?}");
        assert!(text.contains("Vec<i32>"));
        assert!(text.contains("List"));
    }
}
