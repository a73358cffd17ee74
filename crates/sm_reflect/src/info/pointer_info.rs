use crate::convert::ValueHooks;
use crate::info::{Type, TypeInfo, Typed};

use super::type_info::impl_common_info;

/// Information about a pointer type such as `Option<T>` or `Box<T>`.
#[derive(Debug)]
pub struct PointerInfo {
    ty: Type,
    pointee_info: fn() -> &'static TypeInfo,
    nullable: bool,
    hooks: ValueHooks,
}

impl_common_info!(PointerInfo);

impl PointerInfo {
    /// Creates the info of pointer `TPtr` to `TPointee`.
    pub fn new<TPtr: Typed, TPointee: Typed>(nullable: bool) -> Self {
        Self {
            ty: Type::of::<TPtr>(),
            pointee_info: TPointee::type_info,
            nullable,
            hooks: ValueHooks::new(),
        }
    }

    /// Returns the info of the pointee type.
    #[inline]
    pub fn pointee_info(&self) -> &'static TypeInfo {
        (self.pointee_info)()
    }

    /// Returns `true` if the pointer can be null (`Option`), `false` if it
    /// always owns a value (`Box`).
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}
