use alloc::sync::Arc;
use core::any::TypeId;

use sm_reflect::Reflect;
use sm_reflect::info::Typed;
use sm_reflect::ops::{IntMut, ReflectMut, ScalarMut, Struct};

use crate::cache::PlanCache;
use crate::compile;
use crate::flat_map::lookup;
use crate::marshal::{mismatch, missing_field};
use crate::plan::{FieldPlan, PlanNode};
use crate::{Config, Direction, Error, FlatMap};

// -----------------------------------------------------------------------------
// Unmarshaler

/// Fills records from a [`FlatMap`].
///
/// Like [`Marshaler`](crate::Marshaler), it caches one plan per root type and
/// is meant to be kept and shared.
///
/// ```
/// use std::collections::HashMap;
///
/// use sm_codec::Unmarshaler;
/// use sm_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// struct Query {
///     #[reflect(map = "q,required")]
///     text: String,
///     #[reflect(map = "page")]
///     page: Option<i32>,
///     tags: Vec<String>,
/// }
///
/// let src = HashMap::from([
///     ("q".to_string(), vec!["rust".to_string()]),
///     ("page".to_string(), vec!["2".to_string()]),
/// ]);
///
/// let mut query = Query { tags: vec!["stale".into()], ..Query::default() };
/// Unmarshaler::default().unmarshal(&src, &mut query).unwrap();
///
/// assert_eq!(query.text, "rust");
/// assert_eq!(query.page, Some(2));
/// assert!(query.tags.is_empty());
/// ```
pub struct Unmarshaler {
    config: Config,
    cache: PlanCache,
}

impl Default for Unmarshaler {
    #[inline]
    fn default() -> Self {
        Self::new(Config::new())
    }
}

impl Unmarshaler {
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

    /// Fills `dst` from `src`.
    ///
    /// Keys that are missing, or present with no values, set their field to its
    /// zero value unless the field is `required`. Conversion stops at the first
    /// error, and fields converted before it keep their new values.
    pub fn unmarshal<M, T>(&self, src: &M, dst: &mut T) -> Result<(), Error>
    where
        M: FlatMap + ?Sized,
        T: Reflect + Typed,
    {
        let plan = self.plan::<T>()?;
        unmarshal_node(&plan, dst.as_reflect_mut(), &[], "", src)
    }

    /// Returns the plan of `T`, compiling it if needed.
    pub fn plan<T: Typed>(&self) -> Result<Arc<PlanNode>, Error> {
        self.cache.get_or_compile(TypeId::of::<T>(), || {
            compile::compile_logged(&self.config, Direction::Unmarshal, T::type_info())
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

impl core::fmt::Debug for Unmarshaler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Unmarshaler")
            .field("config", &self.config)
            .field("cached_plans", &self.cache.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Executor

/// Converts `values`, found under `key`, into `value`.
///
/// `values` is never empty for leaves; nested nodes ignore it and look up
/// their own fields.
fn unmarshal_node<M: FlatMap + ?Sized>(
    node: &PlanNode,
    value: &mut dyn Reflect,
    values: &[String],
    key: &str,
    src: &M,
) -> Result<(), Error> {
    match node {
        PlanNode::String => {
            let Some(text) = as_string(value) else {
                return Err(mismatch("string", value));
            };
            text.clear();
            text.push_str(first(values));
            Ok(())
        }
        PlanNode::Integer { .. } => {
            let Some(mut number) = as_int(value) else {
                return Err(mismatch("signed integer", value));
            };
            number
                .parse(first(values))
                .map_err(|source| Error::InvalidInt {
                    key: key.to_owned(),
                    source,
                })
        }
        PlanNode::StringSlice => {
            let ReflectMut::List(list) = value.reflect_mut() else {
                return Err(mismatch("list", value));
            };
            list.resize(values.len());
            for (index, item) in values.iter().enumerate() {
                let slot = list.get_mut(index).and_then(as_string);
                let Some(slot) = slot else {
                    return Err(mismatch("string", list.as_reflect()));
                };
                slot.clear();
                slot.push_str(item);
            }
            Ok(())
        }
        PlanNode::IntegerSlice { .. } => {
            let ReflectMut::List(list) = value.reflect_mut() else {
                return Err(mismatch("list", value));
            };
            list.resize(values.len());
            for (index, item) in values.iter().enumerate() {
                let slot = list.get_mut(index).and_then(as_int);
                let Some(mut slot) = slot else {
                    return Err(mismatch("signed integer", list.as_reflect()));
                };
                slot.parse(item)
                    .map_err(|source| Error::InvalidIntElement {
                        key: key.to_owned(),
                        index,
                        source,
                    })?;
            }
            Ok(())
        }
        PlanNode::Custom(hooks) => {
            let hook = hooks.unmarshal().ok_or_else(|| Error::UnsupportedKind {
                op: Direction::Unmarshal,
                ty: value.reflect_type_info().type_name(),
            })?;
            hook(value, values).map_err(Error::Custom)
        }
        PlanNode::Pointer(elem) => {
            let ReflectMut::Pointer(pointer) = value.reflect_mut() else {
                return Err(mismatch("pointer", value));
            };
            unmarshal_node(elem, pointer.ensure_allocated(), values, key, src)
        }
        PlanNode::Nested(fields) => {
            let ReflectMut::Struct(record) = value.reflect_mut() else {
                return Err(mismatch("struct", value));
            };
            fields
                .iter()
                .try_for_each(|field| unmarshal_field(field, record, src))
        }
    }
}

fn unmarshal_field<M: FlatMap + ?Sized>(
    field: &FieldPlan,
    record: &mut dyn Struct,
    src: &M,
) -> Result<(), Error> {
    let Some(value) = record.field_at_mut(field.index) else {
        return Err(missing_field(field, record.as_reflect()));
    };

    if field.nested {
        return unmarshal_node(&field.node, value, &[], "", src);
    }

    let key = field.rule.key.as_str();
    match lookup(src, key) {
        Some(values) => unmarshal_node(&field.node, value, values, key, src),
        None if field.rule.required => Err(Error::MissingKey {
            key: key.to_owned(),
        }),
        None => {
            value.set_zero();
            Ok(())
        }
    }
}

#[inline]
fn first(values: &[String]) -> &str {
    values.first().map_or("", String::as_str)
}

fn as_string(value: &mut dyn Reflect) -> Option<&mut String> {
    match value.reflect_mut() {
        ReflectMut::Scalar(ScalarMut::String(text)) => Some(text),
        _ => None,
    }
}

fn as_int(value: &mut dyn Reflect) -> Option<IntMut<'_>> {
    match value.reflect_mut() {
        ReflectMut::Scalar(ScalarMut::Int(number)) => Some(number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use sm_reflect::convert::{BoxError, ValueMarshaler, ValueUnmarshaler};
    use sm_reflect::derive::Reflect;

    use super::Unmarshaler;
    use crate::{Config, Error, Marshaler};

    type Map = BTreeMap<String, Vec<String>>;

    fn map(entries: &[(&str, &[&str])]) -> Map {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Person {
        #[reflect(map = "first_name")]
        first_name: String,
        #[reflect(map = "LastName,required")]
        last_name: String,
    }

    #[test]
    fn required_key() {
        let unmarshaler = Unmarshaler::default();

        let mut person = Person::default();
        unmarshaler
            .unmarshal(&map(&[("LastName", &["Hopper"])]), &mut person)
            .unwrap();
        assert_eq!(person.last_name, "Hopper");
        assert_eq!(person.first_name, "");

        let err = unmarshaler
            .unmarshal(&map(&[("LastName", &[])]), &mut person)
            .unwrap_err();
        assert_eq!(err.to_string(), "value not found for required key \"LastName\"");
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Names {
        #[reflect(map = "-")]
        ignored: String,
        #[reflect(map = "-,")]
        not_ignored: String,
        #[reflect(map = "message")]
        message: String,
    }

    #[test]
    fn dash_keys() {
        let src = map(&[
            ("ignored", &["valueThere"]),
            ("-", &["valueThere"]),
            ("Message", &["itsThere"]),
            ("message", &["itsHere"]),
        ]);
        let mut names = Names {
            ignored: "valueHere".into(),
            not_ignored: "valueHere".into(),
            message: String::new(),
        };

        Unmarshaler::default().unmarshal(&src, &mut names).unwrap();
        assert_eq!(
            names,
            Names {
                ignored: "valueHere".into(),
                not_ignored: "valueThere".into(),
                message: "itsHere".into(),
            }
        );
    }

    #[derive(Reflect, Default)]
    struct Numbers {
        #[reflect(map = "int_slice[]")]
        values: Vec<i32>,
        small: i8,
    }

    #[test]
    fn integers() {
        let unmarshaler = Unmarshaler::default();
        let mut numbers = Numbers::default();

        let err = unmarshaler
            .unmarshal(&map(&[("int_slice[]", &["1", "2", "x"])]), &mut numbers)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIntElement { ref key, index: 2, .. } if key == "int_slice[]"
        ));
        assert!(err.to_string().contains("int slice index #2: "));

        let err = unmarshaler
            .unmarshal(&map(&[("small", &["128"])]), &mut numbers)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInt { ref key, .. } if key == "small"));

        unmarshaler
            .unmarshal(
                &map(&[("int_slice[]", &["-3", "4"]), ("small", &["-128", "9"])]),
                &mut numbers,
            )
            .unwrap();
        assert_eq!(numbers.values, [-3, 4]);
        assert_eq!(numbers.small, -128);
    }

    #[derive(Reflect, Default)]
    struct Paging {
        page: i64,
        #[reflect(map = "per_page")]
        per_page: i64,
    }

    #[derive(Reflect, Default)]
    struct Search {
        #[reflect(embed)]
        paging: Paging,
        #[reflect(map = "filter")]
        filter: Option<Box<Filter>>,
        query: Option<String>,
    }

    #[derive(Reflect, Default)]
    struct Filter {
        owner: String,
    }

    #[test]
    fn embedded_and_pointers() {
        let src = map(&[
            ("page", &["3"]),
            ("per_page", &["50"]),
            ("query", &["text"]),
        ]);
        let mut search = Search::default();
        Unmarshaler::default().unmarshal(&src, &mut search).unwrap();

        assert_eq!(search.paging.page, 3);
        assert_eq!(search.paging.per_page, 50);
        assert_eq!(search.query.as_deref(), Some("text"));

        // A pointer to a struct is always allocated; its fields are zeroed.
        let filter = search.filter.as_deref().unwrap();
        assert_eq!(filter.owner, "");

        // Optional pointers to leaves are reset when the key is missing.
        Unmarshaler::default().unmarshal(&Map::new(), &mut search).unwrap();
        assert!(search.query.is_none());
    }

    #[derive(Reflect, Default)]
    struct Root {
        field: String,
    }

    #[test]
    fn pointer_roots() {
        let mut root: Option<Box<Root>> = None;
        Unmarshaler::default()
            .unmarshal(&map(&[("field", &["v"])]), &mut root)
            .unwrap();
        assert_eq!(root.unwrap().field, "v");

        let mut empty: Option<Root> = None;
        Unmarshaler::default().unmarshal(&Map::new(), &mut empty).unwrap();
        assert!(empty.is_some());
    }

    #[test]
    fn root_must_be_a_struct() {
        let mut text = String::new();
        let err = Unmarshaler::default()
            .unmarshal(&Map::new(), &mut text)
            .unwrap_err();
        assert!(err.to_string().starts_with("cannot unmarshal into "));
    }

    #[derive(Reflect, Default)]
    struct NoInto {
        ratio: f64,
    }

    #[derive(Reflect, Default)]
    struct NoIntoSlice {
        ratios: Vec<f64>,
    }

    #[test]
    fn unsupported_fields() {
        let unmarshaler = Unmarshaler::default();

        let err = unmarshaler
            .unmarshal(&Map::new(), &mut None::<NoInto>)
            .unwrap_err();
        assert!(err.to_string().contains("cannot unmarshal into f64"));

        let err = unmarshaler
            .unmarshal(&Map::new(), &mut NoIntoSlice::default())
            .unwrap_err();
        assert!(err.to_string().contains("cannot unmarshal into slice of f64"));
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(Opaque, marshal, unmarshal)]
    struct Flags(Vec<String>);

    impl ValueMarshaler for Flags {
        fn marshal_value(&self) -> Result<Vec<String>, BoxError> {
            Ok(self.0.iter().map(|flag| format!("+{flag}")).collect())
        }
    }

    impl ValueUnmarshaler for Flags {
        fn unmarshal_value(&mut self, values: &[String]) -> Result<(), BoxError> {
            self.0 = values
                .iter()
                .map(|value| value.strip_prefix('+').map(str::to_owned))
                .collect::<Option<_>>()
                .ok_or("flag without `+`")?;
            Ok(())
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Request {
        #[reflect(map = "flags")]
        flags: Flags,
        #[reflect(map = "id,required")]
        id: isize,
        #[reflect(ignore)]
        local: u8,
    }

    #[test]
    fn custom_hooks_round_trip() {
        let request = Request {
            flags: Flags(vec!["a".into(), "b".into()]),
            id: 9,
            local: 4,
        };

        let mut dst = Map::new();
        Marshaler::default().marshal(&request, &mut dst).unwrap();
        assert_eq!(dst, map(&[("flags", &["+a", "+b"]), ("id", &["9"])]));

        let mut back = Request::default();
        Unmarshaler::default().unmarshal(&dst, &mut back).unwrap();
        assert_eq!(back.flags, request.flags);
        assert_eq!(back.id, 9);
        assert_eq!(back.local, 0);

        let err = Unmarshaler::default()
            .unmarshal(&map(&[("flags", &["a"]), ("id", &["1"])]), &mut back)
            .unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert_eq!(err.to_string(), "flag without `+`");
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct OptionalFlags {
        #[reflect(map = "s,required")]
        s: Option<Flags>,
    }

    #[test]
    fn custom_hooks_behind_null_pointer() {
        let mut dst = OptionalFlags::default();
        Unmarshaler::default()
            .unmarshal(&map(&[("s", &["+x", "+y"])]), &mut dst)
            .unwrap();
        assert_eq!(dst.s, Some(Flags(vec!["x".into(), "y".into()])));

        let mut out = Map::new();
        Marshaler::default().marshal(&dst, &mut out).unwrap();
        assert_eq!(out, map(&[("s", &["+x", "+y"])]));

        let err = Marshaler::default()
            .marshal(&OptionalFlags::default(), &mut Map::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "key s: missing required value");
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Header {
        #[reflect(map = "x-request-id")]
        request_id: String,
    }

    #[test]
    fn key_transform_applies_when_reading() {
        let config = Config::new().with_key_transform(|key| key.to_ascii_uppercase());
        let mut header = Header::default();

        Unmarshaler::new(config)
            .unmarshal(&map(&[("X-REQUEST-ID", &["abc"])]), &mut header)
            .unwrap();
        assert_eq!(header.request_id, "abc");
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Profile {
        #[reflect(map = "name")]
        name: String,
        age: i16,
        emails: Vec<String>,
        scores: Vec<i64>,
        address: Address,
        manager: Option<Box<Address>>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Address {
        city: String,
        zip: i32,
    }

    #[test]
    fn round_trip() {
        let profile = Profile {
            name: "Grace".into(),
            age: 85,
            emails: vec!["g@navy.mil".into(), "grace@example.com".into()],
            scores: vec![10, -20],
            address: Address {
                city: "Arlington".into(),
                zip: 22201,
            },
            manager: Some(Box::new(Address {
                city: "Washington".into(),
                zip: 20001,
            })),
        };

        let config = Config::new().with_delimiter("/");
        let mut dst = Map::new();
        Marshaler::new(config.clone())
            .marshal(&profile, &mut dst)
            .unwrap();
        assert_eq!(dst["address/zip"], ["22201"]);
        assert_eq!(dst["manager/city"], ["Washington"]);

        let mut back = Profile::default();
        Unmarshaler::new(config).unmarshal(&dst, &mut back).unwrap();
        assert_eq!(back, profile);
    }
}
