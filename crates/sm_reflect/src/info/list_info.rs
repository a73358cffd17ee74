use crate::convert::ValueHooks;
use crate::info::{Type, TypeInfo, Typed};

use super::type_info::impl_common_info;

/// Information about a list type such as `Vec<T>`.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
    hooks: ValueHooks,
}

impl_common_info!(ListInfo);

impl ListInfo {
    /// Creates the info of list `TList` holding `TItem`.
    pub fn new<TList: Typed, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_info: TItem::type_info,
            hooks: ValueHooks::new(),
        }
    }

    /// Returns the info of the item type.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}
