//! Node trait definitions.
//!
//! Every tree function in this crate is generic over these traits and an
//! arena of nodes.  A "pointer" is an `Option<u32>` index into the arena;
//! the functions take the arena as a slice (or `&mut Vec`) plus the index
//! of the node they operate on.

/// Tree links (`p`, `l`, `r`).
///
/// The parent link is a non-owning back-reference; ownership of every
/// node lies with the arena that holds it.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Comparator used by map/tree structures.
///
/// Returns a negative value when `a < b`, zero when equal, positive when
/// `a > b`.
pub type Comparator<K> = dyn Fn(&K, &K) -> i32;

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_key(&mut self, key: K);
    fn set_value(&mut self, value: V);
}
