//! Compiled conversion plans.
//!
//! A plan is built once per type and engine, then shared read-only by every
//! conversion of that type. Plans can be inspected through
//! [`Marshaler::plan`](crate::Marshaler::plan) and
//! [`Unmarshaler::plan`](crate::Unmarshaler::plan).

use sm_reflect::convert::ValueHooks;

// -----------------------------------------------------------------------------
// PlanNode

/// How one type converts.
#[derive(Debug)]
pub enum PlanNode {
    /// A `String`, stored as one value.
    String,
    /// A signed integer of `bits` width, stored as one base-10 value.
    Integer { bits: u32 },
    /// A `Vec<String>`, stored value by value.
    StringSlice,
    /// A `Vec` of signed integers of `bits` width.
    IntegerSlice { bits: u32 },
    /// An `Option` or `Box` around another node.
    Pointer(Box<PlanNode>),
    /// A type with its own conversion hook for the compiled direction.
    Custom(ValueHooks),
    /// A struct, with one plan per converted field in declaration order.
    Nested(Box<[FieldPlan]>),
}

impl PlanNode {
    /// Returns `true` if the node is a struct, directly or behind pointers.
    pub fn is_nested(&self) -> bool {
        match self {
            Self::Nested(_) => true,
            Self::Pointer(elem) => elem.is_nested(),
            _ => false,
        }
    }

    /// Returns every key the plan reads or writes, in conversion order.
    ///
    /// ```
    /// use sm_codec::Marshaler;
    /// use sm_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect)]
    /// struct Page {
    ///     #[reflect(map = "page")]
    ///     number: i32,
    ///     filter: Filter,
    /// }
    ///
    /// #[derive(Reflect)]
    /// struct Filter {
    ///     name: String,
    /// }
    ///
    /// let plan = Marshaler::default().plan::<Page>().unwrap();
    /// assert_eq!(plan.keys(), ["page", "filter.name"]);
    /// ```
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Self::Pointer(elem) => elem.collect_keys(keys),
            Self::Nested(fields) => {
                for field in fields {
                    if field.nested {
                        field.node.collect_keys(keys);
                    } else {
                        keys.push(&field.rule.key);
                    }
                }
            }
            _ => {}
        }
    }
}

// -----------------------------------------------------------------------------
// FieldPlan

/// The plan of one struct field.
#[derive(Debug)]
pub struct FieldPlan {
    /// Position of the field in its struct's reflected fields.
    pub index: usize,
    /// Declared name of the field.
    pub name: &'static str,
    /// Key and empty-value policy. Unused when `nested` is set.
    pub rule: KeyRule,
    /// The field is a struct, directly or behind pointers, and has no key.
    pub nested: bool,
    pub node: PlanNode,
}

/// The key of a leaf and what to do with empty values.
///
/// `required` and `omit_empty` are never both set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRule {
    pub key: String,
    pub required: bool,
    pub omit_empty: bool,
}

impl KeyRule {
    /// The rule of a root pointer: no key, and a null pointer is an error.
    pub const ROOT: Self = Self {
        key: String::new(),
        required: true,
        omit_empty: false,
    };

    /// The rule of a nested field.
    pub const NESTED: Self = Self {
        key: String::new(),
        required: false,
        omit_empty: false,
    };
}
