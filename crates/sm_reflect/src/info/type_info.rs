use core::any::TypeId;

use crate::convert::ValueHooks;
use crate::info::{ListInfo, OpaqueInfo, PointerInfo, ScalarInfo, StructInfo};
use crate::info::{ReflectKind, ReflectKindError, Type};

/// Compile-time information about a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info).
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Pointer(PointerInfo),
    Scalar(ScalarInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] if this is a `", stringify!($kind), "`.")]
        #[inline]
        pub fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    /// Returns the [`Type`] this info describes.
    pub fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the custom conversion hooks of the described type.
    pub fn hooks(&self) -> &ValueHooks {
        match self {
            Self::Struct(info) => info.hooks(),
            Self::List(info) => info.hooks(),
            Self::Pointer(info) => info.hooks(),
            Self::Scalar(info) => info.hooks(),
            Self::Opaque(info) => info.hooks(),
        }
    }

    /// Returns the kind of the described type.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the name of the described type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);
}

/// Implements the accessors shared by every `XxxInfo`.
macro_rules! impl_common_info {
    ($info:ident) => {
        impl $info {
            /// Returns the [`Type`](crate::info::Type) this info describes.
            #[inline]
            pub fn ty(&self) -> &$crate::info::Type {
                &self.ty
            }

            /// Returns the name of the described type.
            #[inline]
            pub fn type_name(&self) -> &'static str {
                self.ty.name()
            }

            /// Returns the custom conversion hooks of the described type.
            #[inline]
            pub fn hooks(&self) -> &$crate::convert::ValueHooks {
                &self.hooks
            }

            /// Replaces the custom conversion hooks.
            #[inline]
            pub fn with_hooks(mut self, hooks: $crate::convert::ValueHooks) -> Self {
                self.hooks = hooks;
                self
            }
        }
    };
}

pub(super) use impl_common_info;
