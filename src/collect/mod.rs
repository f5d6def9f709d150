use std::hash::BuildHasherDefault;

use seahash::SeaHasher;

mod order_list;
pub mod ordered_map;
pub mod ordered_set;

pub use self::ordered_map::OrderedMap;
pub use self::ordered_set::OrderedSet;

pub type SeaHashBuildHasher = BuildHasherDefault<SeaHasher>;
pub type SeaHashOrderedMap<K, V> = OrderedMap<K, V, SeaHashBuildHasher>;
pub type SeaHashOrderedSet<T> = OrderedSet<T, SeaHashBuildHasher>;
