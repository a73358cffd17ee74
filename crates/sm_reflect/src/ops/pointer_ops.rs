use crate::Reflect;

/// Access to the pointee of `Option<T>`-like and `Box<T>`-like types.
///
/// ```
/// use sm_reflect::ops::Pointer;
///
/// let mut slot: Option<i32> = None;
/// let ptr: &mut dyn Pointer = &mut slot;
///
/// assert!(ptr.is_null());
/// *ptr.ensure_allocated().downcast_mut::<i32>().unwrap() = 5;
/// assert_eq!(slot, Some(5));
/// ```
pub trait Pointer: Reflect {
    /// Returns the pointee, or `None` if the pointer is null.
    fn get(&self) -> Option<&dyn Reflect>;

    /// Returns the pointee mutably, or `None` if the pointer is null.
    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the pointee, allocating a default one first if the pointer is null.
    fn ensure_allocated(&mut self) -> &mut dyn Reflect;

    /// Returns `true` if the pointer is null.
    #[inline]
    fn is_null(&self) -> bool {
        self.get().is_none()
    }
}
