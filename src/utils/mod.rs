//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::hashmap::{hashmap_with_capacity, HashMap};

mod center;
pub mod hashmap;
