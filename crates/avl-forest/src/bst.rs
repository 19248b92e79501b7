//! Plain binary-search-tree primitives.
//!
//! Everything here is unbalanced: comparator descent, splice-out removal,
//! in-order traversal and the position-exchange primitive [`node_swap`].
//! The AVL layer builds on these and adds balance maintenance on top.

use crate::types::{KvNode, Node};

#[inline]
fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}
#[inline]
fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}
#[inline]
fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}
#[inline]
fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}
#[inline]
fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}
#[inline]
fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Rewire `parent`'s child link that currently points at `from` to `to`.
#[inline]
fn replace_child<N: Node>(arena: &mut [N], parent: u32, from: u32, to: Option<u32>) {
    if get_l(arena, parent) == Some(from) {
        set_l(arena, parent, to);
    } else {
        set_r(arena, parent, to);
    }
}

/// Leftmost node of the subtree under `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node of the subtree under `root`.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor of `node`.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor of `node`.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Visit every node in key order.
pub fn for_each<N: Node, F: FnMut(u32)>(arena: &[N], root: Option<u32>, mut f: F) {
    let mut curr = first(arena, root);
    while let Some(idx) = curr {
        f(idx);
        curr = next(arena, idx);
    }
}

/// Comparator descent for `key`.  Returns the arena index holding it, or
/// `None` when absent.
pub fn find<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(idx) = curr {
        let cmp = comparator(key, arena[idx as usize].key());
        if cmp == 0 {
            return Some(idx);
        }
        curr = if cmp < 0 {
            get_l(arena, idx)
        } else {
            get_r(arena, idx)
        };
    }
    None
}

/// Attach the pre-allocated node `n` at its BST position, with no
/// rebalancing.  The caller must ensure `n`'s key is not already present
/// (check with [`find`] first); equal keys would descend right and break
/// lookup.  Returns the new root.
pub fn insert<K, V, N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        return Some(n);
    };

    loop {
        let cmp = comparator(arena[n as usize].key(), arena[curr as usize].key());
        let child = if cmp < 0 {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(next) => curr = next,
            None => {
                if cmp < 0 {
                    set_l(arena, curr, Some(n));
                } else {
                    set_r(arena, curr, Some(n));
                }
                set_p(arena, n, Some(curr));
                return root;
            }
        }
    }
}

/// Splice `node` out of the tree, with no rebalancing.
///
/// A node with two children is replaced by its left subtree, with the
/// right subtree re-hung off the left subtree's rightmost node.  Returns
/// the new root; `node`'s links are cleared.
pub fn remove<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32> {
    let p = get_p(arena, node);
    let l = get_l(arena, node);
    let r = get_r(arena, node);
    set_p(arena, node, None);
    set_l(arena, node, None);
    set_r(arena, node, None);

    let replacement = match (l, r) {
        (Some(l), Some(r)) => {
            let mut hook = l;
            while let Some(hr) = get_r(arena, hook) {
                hook = hr;
            }
            set_r(arena, hook, Some(r));
            set_p(arena, r, Some(hook));
            Some(l)
        }
        (one, other) => one.or(other),
    };

    if let Some(c) = replacement {
        set_p(arena, c, p);
    }
    match p {
        Some(p) => {
            replace_child(arena, p, node, replacement);
            root
        }
        None => replacement,
    }
}

/// Exchange the tree positions of `a` and `b` by swapping their
/// parent/left/right links.  Contents stay with their nodes, so after the
/// swap each key sits where the other one was; the caller is responsible
/// for restoring the ordering invariant before the tree is observed
/// (remove does so by immediately splicing one of the two out).
///
/// Returns the new root.
pub fn node_swap<N: Node>(arena: &mut [N], root: Option<u32>, a: u32, b: u32) -> Option<u32> {
    if a == b {
        return root;
    }
    if get_p(arena, b) == Some(a) {
        return swap_with_child(arena, root, a, b);
    }
    if get_p(arena, a) == Some(b) {
        return swap_with_child(arena, root, b, a);
    }

    let (ap, al, ar) = (get_p(arena, a), get_l(arena, a), get_r(arena, a));
    let (bp, bl, br) = (get_p(arena, b), get_l(arena, b), get_r(arena, b));

    set_p(arena, a, bp);
    set_l(arena, a, bl);
    set_r(arena, a, br);
    set_p(arena, b, ap);
    set_l(arena, b, al);
    set_r(arena, b, ar);

    for c in [al, ar].into_iter().flatten() {
        set_p(arena, c, Some(b));
    }
    for c in [bl, br].into_iter().flatten() {
        set_p(arena, c, Some(a));
    }
    if let Some(ap) = ap {
        replace_child(arena, ap, a, Some(b));
    }
    if let Some(bp) = bp {
        replace_child(arena, bp, b, Some(a));
    }

    if ap.is_none() {
        Some(b)
    } else if bp.is_none() {
        Some(a)
    } else {
        root
    }
}

/// [`node_swap`] for the adjacent case where `child` hangs directly off
/// `parent`; the naive six-way link swap would create a self-loop here.
fn swap_with_child<N: Node>(
    arena: &mut [N],
    root: Option<u32>,
    parent: u32,
    child: u32,
) -> Option<u32> {
    let (pp, pl, pr) = (
        get_p(arena, parent),
        get_l(arena, parent),
        get_r(arena, parent),
    );
    let (cl, cr) = (get_l(arena, child), get_r(arena, child));
    let child_on_left = pl == Some(child);

    set_p(arena, child, pp);
    if child_on_left {
        set_l(arena, child, Some(parent));
        set_r(arena, child, pr);
        if let Some(pr) = pr {
            set_p(arena, pr, Some(child));
        }
    } else {
        set_r(arena, child, Some(parent));
        set_l(arena, child, pl);
        if let Some(pl) = pl {
            set_p(arena, pl, Some(child));
        }
    }

    set_p(arena, parent, Some(child));
    set_l(arena, parent, cl);
    set_r(arena, parent, cr);
    for c in [cl, cr].into_iter().flatten() {
        set_p(arena, c, Some(parent));
    }

    match pp {
        Some(pp) => {
            replace_child(arena, pp, parent, Some(child));
            root
        }
        None => Some(child),
    }
}
