//! A hash-map with a fixed hashing state.
//!
//! The iteration order only depends on the sequence of insertions, not on a per-process seed.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] with a fixed [`foldhash`] state.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, foldhash::fast::FixedState>;

/// Creates an empty [`HashMap`] able to hold at least `capacity` elements.
pub fn hashmap_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, Default::default())
}
