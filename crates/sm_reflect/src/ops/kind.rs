use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{List, Pointer, ScalarMut, ScalarRef, Struct};

/// An immutable view of a reflected value, by kind.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Pointer(&'a dyn Pointer),
    Scalar(ScalarRef<'a>),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a reflected value, by kind.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Pointer(&'a mut dyn Pointer),
    Scalar(ScalarMut<'a>),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectRef<'_> {
    /// Returns the kind of the viewed value.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

impl ReflectMut<'_> {
    /// Returns the kind of the viewed value.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
