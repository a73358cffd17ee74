//! Hash states and hash containers, re-exports *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
///
/// The iteration order only depends on the inserted keys, which keeps
/// test output and debug logs stable between runs.
///
/// ```
/// use sm_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::default();
/// map.insert("a", 1);
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
