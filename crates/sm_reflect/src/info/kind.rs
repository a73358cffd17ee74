use core::{error, fmt};

/// The structural kind of a reflected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A struct with named fields, see [`StructInfo`](super::StructInfo).
    Struct,
    /// A growable sequence such as `Vec<T>`.
    List,
    /// A nullable or owning pointer such as `Option<T>` or `Box<T>`.
    Pointer,
    /// A string, number, `bool` or `char`.
    Scalar,
    /// A type whose inner structure is hidden.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ReflectKind::Struct => "Struct",
            ReflectKind::List => "List",
            ReflectKind::Pointer => "Pointer",
            ReflectKind::Scalar => "Scalar",
            ReflectKind::Opaque => "Opaque",
        })
    }
}

/// Returned when a [`TypeInfo`](super::TypeInfo) is cast to the wrong kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kind mismatch: expected {:?}, received {:?}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}
