use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{PointerInfo, ReflectKind, TypeInfo, Typed};
use crate::ops::{Pointer, ReflectMut, ReflectRef};

// `Option<T>` is the nullable pointer: `None` is null, and allocation fills it
// with `T::default()`.

impl<T: Reflect + Typed + Default> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self, T>(true)))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Option<T> {
    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Pointer
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(self)
    }

    #[inline]
    fn set_zero(&mut self) {
        *self = None;
    }
}

impl<T: Reflect + Typed + Default> Pointer for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn ensure_allocated(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::Pointer;

    #[test]
    fn nullable() {
        let info = <Option<String>>::type_info().as_pointer().unwrap();
        assert!(info.is_nullable());
        assert!(info.pointee_info().is::<String>());
    }

    #[test]
    fn allocate_keeps_existing_value() {
        let mut value = Some(3_i32);
        Pointer::ensure_allocated(&mut value);
        assert_eq!(value, Some(3));

        value.set_zero();
        assert!(Pointer::is_null(&value));
    }
}
