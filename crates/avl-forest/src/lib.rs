//! Arena-based ordered key/value trees.
//!
//! The crate is split into a plain binary-search-tree layer and the AVL
//! layer built on top of it:
//!
//! - **Position links** are `Option<u32>` indices into a `Vec`-backed
//!   arena owned by the map; there are no raw pointers and no
//!   `Rc<RefCell<_>>` cycles. Parent links are plain back-references used
//!   only for upward walks.
//! - [`bst`] provides the unbalanced primitives: comparator descent
//!   (`find`, `insert`), splice (`remove`), in-order traversal (`first`,
//!   `last`, `next`, `prev`, `for_each`) and the position-exchange
//!   primitive `node_swap`.
//! - [`avl`] adds a per-node balance factor (`height(left) -
//!   height(right)`, always in `-1..=1` at rest) and the fix-up walks
//!   that keep it there: rotations use closed-form O(1) balance updates
//!   rather than subtree height recounts.
//! - [`equal_paths`] is a standalone check that every leaf of a binary
//!   tree sits at the same depth.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`KvNode`] traits, comparator seam |
//! | [`bst`] | unbalanced tree primitives over a generic arena |
//! | [`avl`] | [`AvlMap`], [`AvlSet`], rotations and fix-ups |
//! | [`equal_paths`] | uniform leaf-depth check |

pub mod avl;
pub mod bst;
pub mod equal_paths;
pub mod types;

pub use avl::map::{AvlMap, KeyError};
pub use avl::set::AvlSet;
pub use avl::types::{AvlNode, AvlNodeLike};
pub use equal_paths::equal_paths;
pub use types::{KvNode, Node};
