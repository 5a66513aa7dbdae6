//! Hash-maps and hash-sets used for mesh adjacency.
//!
//! Iteration order of these containers is unspecified: code that needs a
//! deterministic result must sort what it collects from them.

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;

/// Hashset using [`hashbrown::HashSet`].
pub type HashSet<K> = hashbrown::HashSet<K>;
