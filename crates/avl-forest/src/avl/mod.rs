//! AVL layer: a balance factor per node plus the fix-up walks and
//! rotations that keep every factor in `-1..=1`.

pub mod map;
pub mod set;
pub mod types;
pub mod util;

pub use map::{AvlMap, KeyError};
pub use set::AvlSet;
pub use types::{AvlNode, AvlNodeLike};
