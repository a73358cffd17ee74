//! Custom conversion between a value and a sequence of strings.
//!
//! A type takes over its own conversion by implementing [`ValueMarshaler`]
//! and/or [`ValueUnmarshaler`] and opting in on the derive:
//!
//! ```
//! use sm_reflect::convert::{BoxError, ValueMarshaler, ValueUnmarshaler};
//! use sm_reflect::{derive::Reflect, info::Typed};
//!
//! #[derive(Reflect, Default)]
//! #[reflect(Opaque, marshal, unmarshal)]
//! struct Csv(Vec<String>);
//!
//! impl ValueMarshaler for Csv {
//!     fn marshal_value(&self) -> Result<Vec<String>, BoxError> {
//!         Ok(vec![self.0.join(",")])
//!     }
//! }
//!
//! impl ValueUnmarshaler for Csv {
//!     fn unmarshal_value(&mut self, values: &[String]) -> Result<(), BoxError> {
//!         self.0 = values.iter().flat_map(|v| v.split(',')).map(String::from).collect();
//!         Ok(())
//!     }
//! }
//!
//! let hooks = Csv::type_info().hooks();
//! let mut csv = Csv::default();
//!
//! hooks.unmarshal().unwrap()(&mut csv, &["a,b".into(), "c".into()]).unwrap();
//! assert_eq!(hooks.marshal().unwrap()(&csv).unwrap(), ["a,b,c"]);
//! ```
//!
//! The hooks are stored in the type's [`TypeInfo`](crate::info::TypeInfo) as
//! type-erased function pointers, so a consumer walking type information can
//! find them without knowing the concrete type.

use core::{error, fmt};

use crate::Reflect;
use crate::info::Type;

/// The error type returned by custom conversions.
pub type BoxError = Box<dyn error::Error + Send + Sync + 'static>;

/// Converts a value into a sequence of strings.
pub trait ValueMarshaler {
    /// Returns the strings representing `self`.
    ///
    /// An empty sequence counts as an empty value.
    fn marshal_value(&self) -> Result<Vec<String>, BoxError>;
}

/// Fills a value from a sequence of strings.
pub trait ValueUnmarshaler {
    /// Replaces `self` with the value represented by `values`.
    ///
    /// `values` is never empty when called by the codec.
    fn unmarshal_value(&mut self, values: &[String]) -> Result<(), BoxError>;
}

/// A type-erased [`ValueMarshaler::marshal_value`].
pub type MarshalValueFn = fn(&dyn Reflect) -> Result<Vec<String>, BoxError>;

/// A type-erased [`ValueUnmarshaler::unmarshal_value`].
pub type UnmarshalValueFn = fn(&mut dyn Reflect, &[String]) -> Result<(), BoxError>;

/// Custom conversion hooks attached to a type's info.
#[derive(Clone, Copy, Default)]
pub struct ValueHooks {
    marshal: Option<MarshalValueFn>,
    unmarshal: Option<UnmarshalValueFn>,
}

impl ValueHooks {
    /// Creates an empty set of hooks.
    #[inline]
    pub const fn new() -> Self {
        Self {
            marshal: None,
            unmarshal: None,
        }
    }

    /// Registers `T`'s [`ValueMarshaler`] implementation.
    pub fn with_marshaler<T: ValueMarshaler + Reflect>(mut self) -> Self {
        let hook: MarshalValueFn = |value| {
            let value = value
                .downcast_ref::<T>()
                .ok_or_else(|| HookTypeMismatch::new::<T>(value))?;
            value.marshal_value()
        };
        self.marshal = Some(hook);
        self
    }

    /// Registers `T`'s [`ValueUnmarshaler`] implementation.
    pub fn with_unmarshaler<T: ValueUnmarshaler + Reflect>(mut self) -> Self {
        let hook: UnmarshalValueFn = |value, values| {
            let mismatch = HookTypeMismatch::new::<T>(value);
            let value = value.downcast_mut::<T>().ok_or(mismatch)?;
            value.unmarshal_value(values)
        };
        self.unmarshal = Some(hook);
        self
    }

    /// Returns the marshal hook.
    #[inline]
    pub fn marshal(&self) -> Option<MarshalValueFn> {
        self.marshal
    }

    /// Returns the unmarshal hook.
    #[inline]
    pub fn unmarshal(&self) -> Option<UnmarshalValueFn> {
        self.unmarshal
    }

    /// Returns `true` if no hook is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marshal.is_none() && self.unmarshal.is_none()
    }
}

impl fmt::Debug for ValueHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueHooks")
            .field("marshal", &self.marshal.is_some())
            .field("unmarshal", &self.unmarshal.is_some())
            .finish()
    }
}

/// A hook was called with a value of another type than the one it was
/// registered for.
#[derive(Debug, Clone, Copy)]
struct HookTypeMismatch {
    expected: &'static str,
    found: &'static str,
}

impl HookTypeMismatch {
    fn new<T: Reflect>(found: &dyn Reflect) -> Self {
        Self {
            expected: Type::of::<T>().name(),
            found: found.reflect_type_info().type_name(),
        }
    }
}

impl fmt::Display for HookTypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conversion hook of `{}` called with `{}`",
            self.expected, self.found
        )
    }
}

impl error::Error for HookTypeMismatch {}
