use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, ReflectKind, TypeInfo, Typed};
use crate::ops::{List, ReflectMut, ReflectRef};

impl<T: Reflect + Typed + Default> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Vec<T> {
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
        ReflectKind::List
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    #[inline]
    fn set_zero(&mut self) {
        Vec::clear(self);
    }
}

impl<T: Reflect + Typed + Default> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(Reflect::as_reflect_mut)
    }

    fn resize(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
}
