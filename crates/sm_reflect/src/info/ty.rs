use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// The identity and name of a type.
///
/// Two `Type`s compare equal when their [`TypeId`]s do; the name is only
/// used for display and error messages.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: &'static str,
}

impl Type {
    /// Creates the `Type` of `T`.
    ///
    /// ```
    /// use sm_reflect::info::Type;
    ///
    /// let ty = Type::of::<Vec<String>>();
    /// assert!(ty.is::<Vec<String>>());
    /// assert!(ty.name().contains("Vec"));
    /// ```
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name, as given by [`core::any::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}
