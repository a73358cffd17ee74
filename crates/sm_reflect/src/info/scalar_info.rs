use crate::convert::ValueHooks;
use crate::info::{Type, Typed};

use super::type_info::impl_common_info;

/// The concrete shape of a scalar type.
///
/// Numeric variants carry their width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int(u32),
    Uint(u32),
    Float(u32),
    Bool,
    Char,
}

/// Information about a scalar type.
#[derive(Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
    hooks: ValueHooks,
}

impl_common_info!(ScalarInfo);

impl ScalarInfo {
    /// Creates the info of scalar `T`.
    pub fn new<T: Typed>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            hooks: ValueHooks::new(),
        }
    }

    /// Returns the scalar kind.
    #[inline]
    pub fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
}
