use crate::convert::ValueHooks;
use crate::info::{Type, Typed};

use super::type_info::impl_common_info;

/// Information about a type whose structure is not reflected.
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    hooks: ValueHooks,
}

impl_common_info!(OpaqueInfo);

impl OpaqueInfo {
    /// Creates the info of opaque type `T`.
    pub fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            hooks: ValueHooks::new(),
        }
    }
}
