use core::fmt;
use core::num::ParseIntError;

use sm_reflect::convert::BoxError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Direction

/// The direction a plan is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Record to flat map.
    Marshal,
    /// Flat map to record.
    Unmarshal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Marshal => "marshal from",
            Self::Unmarshal => "unmarshal into",
        })
    }
}

// -----------------------------------------------------------------------------
// Error

/// Errors returned by [`Marshaler`](crate::Marshaler) and
/// [`Unmarshaler`](crate::Unmarshaler).
///
/// The first group is raised while compiling a plan for a type; such errors
/// are not cached and come back on every call for that type. The second group
/// is raised while converting a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The type cannot be converted in this direction.
    #[error("cannot {op} {ty}")]
    UnsupportedKind { op: Direction, ty: &'static str },

    /// The item type of a list cannot be converted in this direction.
    #[error("cannot {op} slice of {ty}")]
    UnsupportedElement { op: Direction, ty: &'static str },

    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("a field cannot be set as both required and omitempty")]
    ConflictingOptions,

    #[error("cannot set required or omitempty option for struct")]
    StructOption,

    /// A compilation error raised by the field `name`.
    #[error("struct field {name}: {source}")]
    Field {
        name: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Marshal found an empty value for a `required` key.
    ///
    /// `key` is empty for a null root pointer.
    #[error("{}missing required value", KeyPrefix(.key))]
    MissingValue { key: String },

    /// Unmarshal found no value for a `required` key.
    #[error("value not found for required key \"{key}\"")]
    MissingKey { key: String },

    #[error("key {key}: {source}")]
    InvalidInt {
        key: String,
        #[source]
        source: ParseIntError,
    },

    #[error("key {key}: int slice index #{index}: {source}")]
    InvalidIntElement {
        key: String,
        index: usize,
        #[source]
        source: ParseIntError,
    },

    /// An error returned by a custom conversion, unchanged.
    #[error(transparent)]
    Custom(#[from] BoxError),

    /// A value does not reflect as the kind its type info announced.
    ///
    /// Only reachable through a hand-written `Reflect` implementation that
    /// disagrees with its `TypeInfo`.
    #[error("expected {expected}, found a value of type `{found}`")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    /// Wraps a compilation error with the name of the field that raised it.
    pub(crate) fn in_field(self, name: &'static str) -> Self {
        Self::Field {
            name,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`Error::Field`].
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use sm_codec::Error;
    /// use sm_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect, Default)]
    /// struct Form {
    ///     #[reflect(map = ",nope")]
    ///     field: String,
    /// }
    ///
    /// let src = BTreeMap::<String, Vec<String>>::new();
    /// let err = sm_codec::unmarshal(&src, &mut Form::default()).unwrap_err();
    ///
    /// assert_eq!(err.to_string(), "struct field field: unknown option nope");
    /// assert!(matches!(err.root_cause(), Error::UnknownOption(opt) if opt == "nope"));
    /// ```
    pub fn root_cause(&self) -> &Self {
        let mut err = self;
        while let Self::Field { source, .. } = err {
            err = source;
        }
        err
    }
}

struct KeyPrefix<'a>(&'a str);

impl fmt::Display for KeyPrefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "key {}: ", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Error};

    #[test]
    fn messages() {
        let unsupported = Error::UnsupportedKind {
            op: Direction::Unmarshal,
            ty: "f64",
        };
        assert_eq!(unsupported.to_string(), "cannot unmarshal into f64");

        let element = Error::UnsupportedElement {
            op: Direction::Marshal,
            ty: "bool",
        };
        assert_eq!(element.to_string(), "cannot marshal from slice of bool");

        let wrapped = Error::StructOption.in_field("Nested");
        assert_eq!(
            wrapped.to_string(),
            "struct field Nested: cannot set required or omitempty option for struct"
        );
    }

    #[test]
    fn missing_value_without_key() {
        let keyed = Error::MissingValue { key: "a.b".into() };
        assert_eq!(keyed.to_string(), "key a.b: missing required value");

        let root = Error::MissingValue { key: String::new() };
        assert_eq!(root.to_string(), "missing required value");
    }

    #[test]
    fn custom_is_transparent() {
        let err = Error::from(sm_reflect::convert::BoxError::from("bad token"));
        assert_eq!(err.to_string(), "bad token");
    }
}
