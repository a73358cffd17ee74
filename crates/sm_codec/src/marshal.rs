use core::any::TypeId;
use core::fmt::Write;

use alloc::sync::Arc;
use sm_reflect::Reflect;
use sm_reflect::info::Typed;
use sm_reflect::ops::{List, ReflectRef, ScalarRef};

use crate::cache::PlanCache;
use crate::compile;
use crate::plan::{FieldPlan, KeyRule, PlanNode};
use crate::{Config, Direction, Error, FlatMap};

// -----------------------------------------------------------------------------
// Marshaler

/// Writes records into a [`FlatMap`].
///
/// Plans are compiled on first use of each root type and cached in the
/// engine, so one `Marshaler` should be kept and shared. It is `Send + Sync`.
///
/// ```
/// use std::collections::HashMap;
///
/// use sm_codec::{Config, Marshaler};
/// use sm_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Reflect)]
/// struct User {
///     #[reflect(map = "id,required")]
///     id: i64,
///     address: Address,
/// }
///
/// let marshaler = Marshaler::new(Config::new().with_delimiter("_"));
/// let mut dst: HashMap<String, Vec<String>> = HashMap::new();
///
/// let user = User { id: 7, address: Address { city: "Oslo".into() } };
/// marshaler.marshal(&user, &mut dst).unwrap();
///
/// assert_eq!(dst["id"], ["7"]);
/// assert_eq!(dst["address_city"], ["Oslo"]);
/// ```
pub struct Marshaler {
    config: Config,
    cache: PlanCache,
}

impl Default for Marshaler {
    #[inline]
    fn default() -> Self {
        Self::new(Config::new())
    }
}

impl Marshaler {
    /// Creates an engine with its own, empty plan cache.
    #[inline]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            cache: PlanCache::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes `src` into `dst`.
    ///
    /// Existing keys are overwritten, reusing their buffers; other keys are
    /// left alone. Conversion stops at the first error, and whatever was
    /// written before it stays in `dst`.
    pub fn marshal<T, M>(&self, src: &T, dst: &mut M) -> Result<(), Error>
    where
        T: Reflect + Typed,
        M: FlatMap + ?Sized,
    {
        let plan = self.plan::<T>()?;
        marshal_node(&plan, src.as_reflect(), &KeyRule::ROOT, dst)
    }

    /// Returns the plan of `T`, compiling it if needed.
    pub fn plan<T: Typed>(&self) -> Result<Arc<PlanNode>, Error> {
        self.cache.get_or_compile(TypeId::of::<T>(), || {
            compile::compile_logged(&self.config, Direction::Marshal, T::type_info())
        })
    }

    /// Returns the number of cached plans.
    #[inline]
    pub fn cached_plans(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached plan.
    #[inline]
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl core::fmt::Debug for Marshaler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Marshaler")
            .field("config", &self.config)
            .field("cached_plans", &self.cache.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Executor

fn marshal_node<M: FlatMap + ?Sized>(
    node: &PlanNode,
    value: &dyn Reflect,
    rule: &KeyRule,
    dst: &mut M,
) -> Result<(), Error> {
    match node {
        PlanNode::String => {
            let text = as_str(value)?;
            if text.is_empty() && skip_empty(rule)? {
                return Ok(());
            }
            dst.update_values(&rule.key, |values| {
                overwrite(values, [text], |slot, text| slot.push_str(text));
            });
            Ok(())
        }
        PlanNode::Integer { .. } => {
            let number = as_int(value)?;
            if number == 0 && skip_empty(rule)? {
                return Ok(());
            }
            dst.update_values(&rule.key, |values| overwrite(values, [number], push_int));
            Ok(())
        }
        PlanNode::StringSlice => {
            let list = as_list(value)?;
            if list.is_empty() && skip_empty(rule)? {
                return Ok(());
            }
            let items = (0..list.len())
                .map(|index| list_item(list, index).and_then(as_str))
                .collect::<Result<Vec<_>, _>>()?;
            dst.update_values(&rule.key, |values| {
                overwrite(values, items, |slot, text| slot.push_str(text));
            });
            Ok(())
        }
        PlanNode::IntegerSlice { .. } => {
            let list = as_list(value)?;
            if list.is_empty() && skip_empty(rule)? {
                return Ok(());
            }
            let items = (0..list.len())
                .map(|index| list_item(list, index).and_then(as_int))
                .collect::<Result<Vec<_>, _>>()?;
            dst.update_values(&rule.key, |values| overwrite(values, items, push_int));
            Ok(())
        }
        PlanNode::Custom(hooks) => {
            let hook = hooks.marshal().ok_or_else(|| Error::UnsupportedKind {
                op: Direction::Marshal,
                ty: value.reflect_type_info().type_name(),
            })?;
            let items = hook(value)?;
            if items.is_empty() && skip_empty(rule)? {
                return Ok(());
            }
            dst.update_values(&rule.key, |values| {
                values.clear();
                values.extend(items);
            });
            Ok(())
        }
        PlanNode::Pointer(elem) => {
            let ReflectRef::Pointer(pointer) = value.reflect_ref() else {
                return Err(mismatch("pointer", value));
            };
            match pointer.get() {
                Some(pointee) => marshal_node(elem, pointee, rule, dst),
                None if rule.required => Err(Error::MissingValue {
                    key: rule.key.clone(),
                }),
                None => Ok(()),
            }
        }
        PlanNode::Nested(fields) => {
            let ReflectRef::Struct(record) = value.reflect_ref() else {
                return Err(mismatch("struct", value));
            };
            fields.iter().try_for_each(|field| {
                let value = record
                    .field_at(field.index)
                    .ok_or_else(|| missing_field(field, value))?;
                marshal_node(&field.node, value, &field.rule, dst)
            })
        }
    }
}

/// Applies the empty-value policy: `Ok(true)` skips the key.
#[inline]
fn skip_empty(rule: &KeyRule) -> Result<bool, Error> {
    if rule.required {
        return Err(Error::MissingValue {
            key: rule.key.clone(),
        });
    }
    Ok(rule.omit_empty)
}

/// Replaces `values` with `items`, reusing the existing strings.
fn overwrite<T>(
    values: &mut Vec<String>,
    items: impl IntoIterator<Item = T>,
    write: impl Fn(&mut String, T),
) {
    let mut len = 0;
    for item in items {
        match values.as_mut_slice().get_mut(len) {
            Some(slot) => {
                slot.clear();
                write(slot, item);
            }
            None => {
                let mut slot = String::new();
                write(&mut slot, item);
                values.push(slot);
            }
        }
        len += 1;
    }
    values.truncate(len);
}

#[inline]
fn push_int(slot: &mut String, number: i64) {
    // Writing into a `String` cannot fail.
    let _ = write!(slot, "{number}");
}

fn as_str(value: &dyn Reflect) -> Result<&str, Error> {
    match value.reflect_ref() {
        ReflectRef::Scalar(ScalarRef::String(text)) => Ok(text),
        _ => Err(mismatch("string", value)),
    }
}

fn as_int(value: &dyn Reflect) -> Result<i64, Error> {
    match value.reflect_ref() {
        ReflectRef::Scalar(ScalarRef::Int(number)) => Ok(number),
        _ => Err(mismatch("signed integer", value)),
    }
}

fn as_list(value: &dyn Reflect) -> Result<&dyn List, Error> {
    match value.reflect_ref() {
        ReflectRef::List(list) => Ok(list),
        _ => Err(mismatch("list", value)),
    }
}

#[inline]
fn list_item(list: &dyn List, index: usize) -> Result<&dyn Reflect, Error> {
    list.get(index)
        .ok_or_else(|| mismatch("list item", list.as_reflect()))
}

#[cold]
pub(crate) fn mismatch(expected: &'static str, value: &dyn Reflect) -> Error {
    Error::KindMismatch {
        expected,
        found: value.reflect_type_info().type_name(),
    }
}

#[cold]
pub(crate) fn missing_field(field: &FieldPlan, record: &dyn Reflect) -> Error {
    Error::KindMismatch {
        expected: field.name,
        found: record.reflect_type_info().type_name(),
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use std::collections::HashMap;

    use sm_reflect::convert::{BoxError, ValueMarshaler};
    use sm_reflect::derive::Reflect;

    use super::Marshaler;
    use crate::{Config, Error};

    type Map = BTreeMap<String, Vec<String>>;

    fn map(entries: &[(&str, &[&str])]) -> Map {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[derive(Reflect, Default)]
    struct Person {
        #[reflect(map = "first_name")]
        first_name: String,
        #[reflect(map = "LastName,required")]
        last_name: String,
    }

    #[test]
    fn named_and_required_fields() {
        let mut dst = Map::new();
        let person = Person {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        };
        Marshaler::default().marshal(&person, &mut dst).unwrap();
        assert_eq!(
            dst,
            map(&[("first_name", &["Ada"]), ("LastName", &["Lovelace"])])
        );

        let mut dst = Map::new();
        let person = Person {
            first_name: "Ada".into(),
            last_name: String::new(),
        };
        let err = Marshaler::default().marshal(&person, &mut dst).unwrap_err();
        assert!(matches!(&err, Error::MissingValue { key } if key == "LastName"));
        assert_eq!(err.to_string(), "key LastName: missing required value");
    }

    #[derive(Reflect)]
    struct Optional {
        #[reflect(map = "name,omitempty")]
        name: String,
        #[reflect(map = "count,omitempty")]
        count: i32,
        #[reflect(map = "tags,omitempty")]
        tags: Vec<String>,
        plain: String,
    }

    #[test]
    fn omitempty_leaves_existing_entries() {
        let value = Optional {
            name: String::new(),
            count: 0,
            tags: Vec::new(),
            plain: String::new(),
        };

        let mut dst = Map::new();
        Marshaler::default().marshal(&value, &mut dst).unwrap();
        assert_eq!(dst, map(&[("plain", &[""])]));

        let mut dst = map(&[("name", &["kept"]), ("count", &["3"])]);
        Marshaler::default().marshal(&value, &mut dst).unwrap();
        assert_eq!(dst["name"], ["kept"]);
        assert_eq!(dst["count"], ["3"]);
    }

    #[derive(Reflect)]
    struct Lists {
        words: Vec<String>,
        numbers: Vec<i8>,
    }

    #[test]
    fn overwrite_is_idempotent() {
        let marshaler = Marshaler::default();
        let value = Lists {
            words: vec!["a".into(), "b".into()],
            numbers: vec![-1, 0, 127],
        };

        let mut dst = map(&[
            ("words", &["x", "y", "z"]),
            ("numbers", &["9"]),
            ("other", &["o"]),
        ]);
        marshaler.marshal(&value, &mut dst).unwrap();
        let first = dst.clone();
        marshaler.marshal(&value, &mut dst).unwrap();

        assert_eq!(dst, first);
        assert_eq!(dst["words"], ["a", "b"]);
        assert_eq!(dst["numbers"], ["-1", "0", "127"]);
        assert_eq!(dst["other"], ["o"]);
    }

    #[derive(Reflect, Default)]
    struct Inner {
        #[reflect(map = "v,required")]
        value: String,
    }

    #[derive(Reflect)]
    struct Outer {
        inner: Option<Inner>,
        boxed: Box<Inner>,
    }

    #[test]
    fn pointers() {
        let marshaler = Marshaler::default();

        let value = Outer {
            inner: None,
            boxed: Box::new(Inner { value: "b".into() }),
        };
        let mut dst = Map::new();
        marshaler.marshal(&value, &mut dst).unwrap();
        assert_eq!(dst, map(&[("boxed.v", &["b"])]));

        let mut dst = Map::new();
        let err = marshaler.marshal(&None::<Inner>, &mut dst).unwrap_err();
        assert_eq!(err.to_string(), "missing required value");

        marshaler
            .marshal(&Some(Inner { value: "x".into() }), &mut dst)
            .unwrap();
        assert_eq!(dst, map(&[("v", &["x"])]));
    }

    #[derive(Reflect, Default)]
    #[reflect(Opaque, marshal)]
    struct Csv(Vec<String>);

    impl ValueMarshaler for Csv {
        fn marshal_value(&self) -> Result<Vec<String>, BoxError> {
            if self.0.iter().any(|item| item.contains(',')) {
                return Err("item contains a comma".into());
            }
            Ok(if self.0.is_empty() {
                Vec::new()
            } else {
                vec![self.0.join(",")]
            })
        }
    }

    #[derive(Reflect)]
    struct Report {
        #[reflect(map = "cols,omitempty")]
        columns: Csv,
    }

    #[test]
    fn custom_hooks() {
        let marshaler = Marshaler::default();
        let mut dst: HashMap<String, Vec<String>> = HashMap::new();

        let report = Report {
            columns: Csv(vec!["a".into(), "b".into()]),
        };
        marshaler.marshal(&report, &mut dst).unwrap();
        assert_eq!(dst["cols"], ["a,b"]);

        marshaler
            .marshal(&Report { columns: Csv(Vec::new()) }, &mut dst)
            .unwrap();
        assert_eq!(dst["cols"], ["a,b"]);

        let err = marshaler
            .marshal(&Report { columns: Csv(vec!["x,y".into()]) }, &mut dst)
            .unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert_eq!(err.to_string(), "item contains a comma");
    }

    #[derive(Reflect)]
    struct Header {
        #[reflect(map = "content-type")]
        content_type: String,
        #[reflect(map = "accept")]
        accept: String,
    }

    fn canonical_header_key(key: &str) -> String {
        key.split('-')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_ascii_uppercase().to_string()
                            + &chars.as_str().to_ascii_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    #[test]
    fn header_style_keys() {
        let marshaler = Marshaler::new(Config::new().with_key_transform(canonical_header_key));
        let header = Header {
            content_type: "application/json".into(),
            accept: "application/xml".into(),
        };

        let mut dst = Map::new();
        marshaler.marshal(&header, &mut dst).unwrap();
        assert_eq!(
            dst,
            map(&[
                ("Accept", &["application/xml"]),
                ("Content-Type", &["application/json"]),
            ])
        );
    }

    #[derive(Reflect)]
    struct Broken {
        ratio: f32,
    }

    #[test]
    fn failed_compilation_is_retried() {
        let marshaler = Marshaler::default();
        let mut dst = Map::new();

        for _ in 0..2 {
            let err = marshaler.marshal(&Broken { ratio: 1.0 }, &mut dst).unwrap_err();
            assert_eq!(err.to_string(), "struct field ratio: cannot marshal from f32");
            assert_eq!(marshaler.cached_plans(), 0);
        }
        assert!(dst.is_empty());
    }

    #[test]
    fn concurrent_first_use_shares_one_plan() {
        let marshaler = Marshaler::default();

        std::thread::scope(|scope| {
            for i in 0..8 {
                let marshaler = &marshaler;
                scope.spawn(move || {
                    let person = Person {
                        first_name: format!("n{i}"),
                        last_name: "L".into(),
                    };
                    let mut dst = Map::new();
                    marshaler.marshal(&person, &mut dst).unwrap();
                    assert_eq!(dst["first_name"], [format!("n{i}")]);
                });
            }
        });

        assert_eq!(marshaler.cached_plans(), 1);

        marshaler.clear_cache();
        assert_eq!(marshaler.cached_plans(), 0);
    }
}
