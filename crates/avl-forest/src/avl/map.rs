//! [`AvlMap`]: the public ordered-map surface over the AVL utilities.

use std::fmt::Debug;

use thiserror::Error;

use crate::bst;

use super::types::AvlNode;
use super::util;

/// Strict-lookup failure: the probed key is provably absent.
///
/// Only [`AvlMap::try_get`] raises this; insert of an existing key and
/// remove of an absent key are ordinary code paths, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("key not found")]
pub struct KeyError;

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Ordered key/value map backed by an AVL tree.
///
/// Nodes live in a `Vec` arena; `set` returns the arena index of the
/// entry, and indices stay valid until the entry is deleted (a deleted
/// slot goes on a free list and is recycled by a later insert).
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    pub root: Option<u32>,
    pub comparator: C,
    arena: Vec<AvlNode<K, V>>,
    free: Vec<u32>,
    len: usize,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    fn alloc(&mut self, key: K, value: V) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = AvlNode::new(key, value);
                idx
            }
            None => {
                self.arena.push(AvlNode::new(key, value));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Overwrite-or-create.  An existing key gets its value replaced in
    /// place with no structural or balance change; a new key becomes a
    /// leaf at its BST position followed by the insert fix-up walk.
    /// Returns the entry's arena index.
    pub fn set(&mut self, key: K, value: V) -> u32 {
        let Some(root) = self.root else {
            let idx = self.alloc(key, value);
            self.root = Some(idx);
            self.len = 1;
            return idx;
        };

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&key, &self.arena[curr as usize].k);
            if cmp == 0 {
                self.arena[curr as usize].v = value;
                return curr;
            }
            let child = if cmp < 0 {
                self.arena[curr as usize].l
            } else {
                self.arena[curr as usize].r
            };
            match child {
                Some(next) => curr = next,
                None => {
                    let idx = self.alloc(key, value);
                    self.root = if cmp < 0 {
                        util::insert_left(&mut self.arena, self.root, idx, curr)
                    } else {
                        util::insert_right(&mut self.arena, self.root, idx, curr)
                    };
                    self.len += 1;
                    return idx;
                }
            }
        }
    }

    /// Alias for [`AvlMap::set`].
    pub fn insert(&mut self, key: K, value: V) -> u32 {
        self.set(key, value)
    }

    /// No-op-or-delete.  Returns whether the key was present.  The
    /// entry's arena slot is reclaimed at the splice point and recycled
    /// by a later insert.
    pub fn del(&mut self, key: &K) -> bool {
        let Some(idx) = self.find(key) else {
            return false;
        };
        self.root = util::remove(&mut self.arena, self.root, idx);
        self.free.push(idx);
        self.len -= 1;
        true
    }

    /// Alias for [`AvlMap::del`].
    pub fn remove(&mut self, key: &K) -> bool {
        self.del(key)
    }

    /// Arena index of the entry holding `key`, if any.
    pub fn find(&self, key: &K) -> Option<u32> {
        bst::find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.arena[idx as usize].v)
    }

    /// Strict lookup: like [`AvlMap::get`] but absence is surfaced as
    /// [`KeyError`].
    pub fn try_get(&self, key: &K) -> Result<&V, KeyError> {
        self.get(key).ok_or(KeyError)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Entry with the largest key `<=` the probe, if any.
    pub fn get_or_next_lower(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        let mut res = None;
        while let Some(i) = curr {
            let cmp = (self.comparator)(key, &self.arena[i as usize].k);
            if cmp == 0 {
                return Some(i);
            }
            if cmp < 0 {
                curr = self.arena[i as usize].l;
            } else {
                res = Some(i);
                curr = self.arena[i as usize].r;
            }
        }
        res
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn first(&self) -> Option<u32> {
        bst::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        bst::last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        bst::next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        bst::prev(&self.arena, curr)
    }

    /// In-order iterator over arena indices; a direct composition of
    /// [`AvlMap::first`] and [`AvlMap::next`].
    pub fn iterator(&self) -> impl Iterator<Item = u32> + '_ {
        let mut curr = self.first();
        std::iter::from_fn(move || {
            let i = curr?;
            curr = self.next(i);
            Some(i)
        })
    }

    pub fn for_each<F: FnMut(u32, &AvlNode<K, V>)>(&self, mut f: F) {
        bst::for_each(&self.arena, self.root, |i| f(i, &self.arena[i as usize]));
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn value_mut_by_index(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx as usize].v
    }

    pub fn height(&self) -> usize {
        fn height<K, V>(arena: &[AvlNode<K, V>], node: Option<u32>) -> usize {
            let Some(i) = node else {
                return 0;
            };
            let n = &arena[i as usize];
            1 + height(arena, n.l).max(height(arena, n.r))
        }
        height(&self.arena, self.root)
    }

    /// Full invariant audit; see [`util::assert_avl_tree`].
    pub fn assert_valid(&self) -> Result<(), String> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        let mut count = 0usize;
        bst::for_each(&self.arena, self.root, |_| count += 1);
        if count != self.len {
            return Err(format!(
                "length mismatch: {} reachable nodes, len = {}",
                count, self.len
            ));
        }
        Ok(())
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Fn(&K, &K) -> i32,
{
    /// Render the tree for debugging.
    pub fn print(&self) -> String {
        util::print(&self.arena, self.root, "")
    }
}
