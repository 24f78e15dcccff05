#[macro_use]
pub(crate) mod macros;

pub mod error;
pub mod format;
pub mod ids;

use fxhash::FxBuildHasher;

pub type Map<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
pub type Set<T> = hashbrown::HashSet<T, FxBuildHasher>;
