use crate::Reflect;

/// Field access for structs with named fields.
///
/// Indices follow [`StructInfo`](crate::info::StructInfo): declaration order,
/// without ignored fields.
///
/// ```
/// use sm_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Page {
///     number: i32,
///     title: String,
/// }
///
/// let mut page = Page { number: 1, title: "intro".into() };
///
/// assert_eq!(page.field_len(), 2);
/// assert_eq!(page.name_at(1), Some("title"));
///
/// *page.field_mut("number").unwrap().downcast_mut::<i32>().unwrap() = 2;
/// assert_eq!(page.number, 2);
/// ```
pub trait Struct: Reflect {
    /// Returns the field called `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field called `name`, mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index`, mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of reflected fields.
    fn field_len(&self) -> usize;
}
