use alloc::collections::BTreeMap;
use core::hash::BuildHasher;
use std::collections::HashMap;

use sm_utils::hash::{self, hashbrown};

/// A ready-made [`FlatMap`] with a fixed hash state.
///
/// Iteration order only depends on the stored keys, so marshaled output
/// stays the same between runs and processes.
///
/// ```
/// use sm_codec::{FlatMap, ValueMap};
///
/// let mut map = ValueMap::default();
/// map.update_values("tag", |values| values.push("x".into()));
/// assert_eq!(map.get_values("tag").unwrap(), ["x"]);
/// ```
pub type ValueMap = hash::HashMap<String, Vec<String>>;

/// A mapping from string keys to ordered sequences of strings.
///
/// This is the shape of URL query parameters, HTTP headers and form data.
///
/// An empty sequence is treated like a missing key when reading.
pub trait FlatMap {
    /// Returns the values stored under `key`.
    fn get_values(&self, key: &str) -> Option<&[String]>;

    /// Calls `update` with the values stored under `key`, inserting an empty
    /// sequence first if the key is missing.
    ///
    /// Existing sequences are passed as they are, so their buffers can be
    /// reused.
    fn update_values<R>(&mut self, key: &str, update: impl FnOnce(&mut Vec<String>) -> R) -> R;
}

impl<S: BuildHasher> FlatMap for HashMap<String, Vec<String>, S> {
    #[inline]
    fn get_values(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }

    fn update_values<R>(&mut self, key: &str, update: impl FnOnce(&mut Vec<String>) -> R) -> R {
        match self.get_mut(key) {
            Some(values) => update(values),
            None => {
                let mut values = Vec::new();
                let result = update(&mut values);
                self.insert(key.to_owned(), values);
                result
            }
        }
    }
}

impl<S: BuildHasher> FlatMap for hashbrown::HashMap<String, Vec<String>, S> {
    #[inline]
    fn get_values(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }

    #[inline]
    fn update_values<R>(&mut self, key: &str, update: impl FnOnce(&mut Vec<String>) -> R) -> R {
        update(self.entry_ref(key).or_default())
    }
}

impl FlatMap for BTreeMap<String, Vec<String>> {
    #[inline]
    fn get_values(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }

    fn update_values<R>(&mut self, key: &str, update: impl FnOnce(&mut Vec<String>) -> R) -> R {
        match self.get_mut(key) {
            Some(values) => update(values),
            None => {
                let mut values = Vec::new();
                let result = update(&mut values);
                self.insert(key.to_owned(), values);
                result
            }
        }
    }
}

impl<M: FlatMap + ?Sized> FlatMap for &mut M {
    #[inline]
    fn get_values(&self, key: &str) -> Option<&[String]> {
        M::get_values(self, key)
    }

    #[inline]
    fn update_values<R>(&mut self, key: &str, update: impl FnOnce(&mut Vec<String>) -> R) -> R {
        M::update_values(self, key, update)
    }
}

/// Returns the values under `key`, treating an empty sequence as missing.
#[inline]
pub(crate) fn lookup<'a, M: FlatMap + ?Sized>(src: &'a M, key: &str) -> Option<&'a [String]> {
    src.get_values(key).filter(|values| !values.is_empty())
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use std::collections::HashMap;

    use super::{FlatMap, ValueMap, lookup};

    fn write_twice<M: FlatMap>(map: &mut M) {
        map.update_values("k", |values| values.push("a".into()));
        map.update_values("k", |values| values.push("b".into()));
        assert_eq!(map.get_values("k").unwrap(), ["a", "b"]);
        assert!(map.get_values("missing").is_none());
    }

    #[test]
    fn implementations() {
        write_twice(&mut HashMap::new());
        write_twice(&mut ValueMap::default());
        write_twice(&mut BTreeMap::new());
    }

    #[test]
    fn empty_is_missing() {
        let mut map = BTreeMap::new();
        map.insert("empty".to_owned(), Vec::new());
        map.insert("full".to_owned(), vec!["x".to_owned()]);

        assert!(map.get_values("empty").is_some());
        assert!(lookup(&map, "empty").is_none());
        assert_eq!(lookup(&map, "full").unwrap(), ["x"]);
    }
}
