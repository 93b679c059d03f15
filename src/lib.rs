//! # bst-map
//!
//! An unbalanced binary search tree map with exact and lower-nearest lookups.
//!
//! ## Overview
//!
//! [`OrderedMap`] keeps its entries ordered by key, which lets it answer a
//! floor query ("the value of the greatest key not above `k`") that hash maps
//! cannot. It supports:
//!
//! - **Insert** with in-place overwrite of existing keys
//! - **Get** by exact key
//! - **Remove** covering the leaf, single-child and two-children cases
//! - **Lower-nearest** lookup for any `Ord` key type
//! - **Sanity checks** that audit the ordering invariant
//!
//! The tree is not self-balancing. Every walk is iterative, so skewed trees
//! cost linear time but never exhaust the stack.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`OrderedMap`]
//! - `invariant-checks`: audit the whole tree after every mutation (debugging aid)
//!
//! ## Example
//!
//! ```rust
//! use bst_map::prelude::*;
//!
//! let mut map = OrderedMap::new();
//! map.insert(8, 8);
//! map.insert(5, 5);
//! map.insert(10, 10);
//!
//! assert_eq!(map.get_or_default(&5), (5, true));
//! assert_eq!(map.get_or_default(&6), (0, false));
//! assert_eq!(map.lower_nearest_or_default(&9), 8);
//! assert!(map.check_sanity());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use bst_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::InvariantError;
    pub use crate::ordered_map::OrderedMap;
}

mod error;
mod ordered_map;

pub use error::InvariantError;
pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::Keys;
pub use ordered_map::OrderedMap;
pub use ordered_map::Values;
