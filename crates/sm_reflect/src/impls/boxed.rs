use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{PointerInfo, ReflectKind, TypeInfo, Typed};
use crate::ops::{Pointer, ReflectMut, ReflectRef};

// `Box<T>` is a pointer that is never null.

impl<T: Reflect + Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self, T>(false)))
    }
}

impl<T: Reflect + Typed> Reflect for Box<T> {
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
        T::set_zero(self);
    }
}

impl<T: Reflect + Typed> Pointer for Box<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        Some(T::as_reflect(self))
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(T::as_reflect_mut(self))
    }

    #[inline]
    fn ensure_allocated(&mut self) -> &mut dyn Reflect {
        T::as_reflect_mut(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::Pointer;

    #[test]
    fn never_null() {
        let mut value = Box::new(String::from("text"));
        assert!(!<Box<String>>::type_info().as_pointer().unwrap().is_nullable());
        assert!(!Pointer::is_null(&value));

        value.set_zero();
        assert!(value.is_empty());
    }
}
