use crate::Reflect;

/// Access to a growable sequence of reflected items.
///
/// ```
/// use sm_reflect::ops::List;
///
/// let mut items = vec![String::from("a")];
/// let list: &mut dyn List = &mut items;
///
/// list.resize(3);
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(2).unwrap().downcast_ref::<String>().unwrap(), "");
///
/// list.resize(1);
/// assert_eq!(items, ["a"]);
/// ```
pub trait List: Reflect {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the list has no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the item at `index`, mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Sets the length to exactly `len`, truncating or appending default items.
    ///
    /// Kept items and the allocation are reused.
    fn resize(&mut self, len: usize);

    /// Removes every item, keeping the allocation.
    fn clear(&mut self);
}
