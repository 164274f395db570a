pub mod cached;
pub mod singleton;

pub use cached::{Cached, CachedSpec};
pub use singleton::{Singleton, SingletonSpec};
