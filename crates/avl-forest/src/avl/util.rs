//! AVL maintenance: rotations with closed-form balance updates, the
//! insert and remove fix-up walks, and the tree validator.
//!
//! Conventions shared by every function here:
//!
//! - `bf = height(left) - height(right)`; positive is left-heavy.
//! - Functions take the arena plus the current root and return the
//!   (possibly new) root, so callers never chase a stale root after a
//!   rotation promotes a different node to the top.

use std::fmt::Debug;

use crate::bst;

use super::types::AvlNodeLike;

#[inline]
fn get_p<K, V, N>(arena: &[N], idx: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].p()
}
#[inline]
fn get_l<K, V, N>(arena: &[N], idx: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].l()
}
#[inline]
fn get_r<K, V, N>(arena: &[N], idx: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].r()
}
#[inline]
fn set_p<K, V, N>(arena: &mut [N], idx: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].set_p(v);
}
#[inline]
fn set_l<K, V, N>(arena: &mut [N], idx: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].set_l(v);
}
#[inline]
fn set_r<K, V, N>(arena: &mut [N], idx: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].set_r(v);
}
#[inline]
fn bf<K, V, N>(arena: &[N], idx: u32) -> i32
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].bf()
}
#[inline]
fn set_bf<K, V, N>(arena: &mut [N], idx: u32, v: i32)
where
    N: AvlNodeLike<K, V>,
{
    arena[idx as usize].set_bf(v);
}

/// Promote `y` (the right child of `x`) into `x`'s position; `x` becomes
/// `y`'s left child and `y`'s former left subtree becomes `x`'s right
/// subtree.
///
/// Balance factors are updated in O(1) from the two pre-rotation factors
/// alone, no subtree height recount:
///
/// ```text
/// bf'(x) = bf(x) + 1 - min(bf(y), 0)
/// bf'(y) = bf(y) + 1 + max(bf'(x), 0)
/// ```
pub fn rotate_left<K, V, N>(arena: &mut [N], x: u32, y: u32)
where
    N: AvlNodeLike<K, V>,
{
    let p = get_p(arena, x);
    let t = get_l(arena, y);

    set_p(arena, y, p);
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    set_r(arena, x, t);
    if let Some(t) = t {
        set_p(arena, t, Some(x));
    }
    if let Some(p) = p {
        if get_l(arena, p) == Some(x) {
            set_l(arena, p, Some(y));
        } else {
            set_r(arena, p, Some(y));
        }
    }

    let xbf = bf(arena, x) + 1 - bf(arena, y).min(0);
    let ybf = bf(arena, y) + 1 + xbf.max(0);
    set_bf(arena, x, xbf);
    set_bf(arena, y, ybf);
}

/// Mirror of [`rotate_left`]: promote `y` (the left child of `x`), with
/// the closed-form updates sign-negated and min/max swapped.
pub fn rotate_right<K, V, N>(arena: &mut [N], x: u32, y: u32)
where
    N: AvlNodeLike<K, V>,
{
    let p = get_p(arena, x);
    let t = get_r(arena, y);

    set_p(arena, y, p);
    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));
    set_l(arena, x, t);
    if let Some(t) = t {
        set_p(arena, t, Some(x));
    }
    if let Some(p) = p {
        if get_l(arena, p) == Some(x) {
            set_l(arena, p, Some(y));
        } else {
            set_r(arena, p, Some(y));
        }
    }

    let xbf = bf(arena, x) - 1 - bf(arena, y).max(0);
    let ybf = bf(arena, y) - 1 + xbf.min(0);
    set_bf(arena, x, xbf);
    set_bf(arena, y, ybf);
}

/// Attach `n` as the left child of the leaf slot `p` and restore the
/// balance invariant.  Returns the new root.
pub fn insert_left<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let root = root.expect("attach requires a non-empty tree");
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) + 1;
    set_bf(arena, p, pbf);
    if get_r(arena, p).is_some() {
        // bf went -1 -> 0: the subtree height did not change
        Some(root)
    } else {
        Some(rebalance_after_insert(arena, root, p))
    }
}

/// Attach `n` as the right child of the leaf slot `p` and restore the
/// balance invariant.  Returns the new root.
pub fn insert_right<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let root = root.expect("attach requires a non-empty tree");
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) - 1;
    set_bf(arena, p, pbf);
    if get_l(arena, p).is_some() {
        Some(root)
    } else {
        Some(rebalance_after_insert(arena, root, p))
    }
}

/// `node`'s subtree just grew by one level; walk the ancestor chain
/// adjusting balance factors until the growth is absorbed.
///
/// At each ancestor: a factor of 0 means the insert fell on the shorter
/// side and nothing above can have changed; ±1 means the subtree grew, so
/// keep climbing; ±2 means one (single or double) rotation restores the
/// pre-insert height and the walk ends there.
fn rebalance_after_insert<K, V, N>(arena: &mut [N], root: u32, mut node: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    loop {
        let Some(p) = get_p(arena, node) else {
            return root;
        };
        let on_left = get_l(arena, p) == Some(node);
        let pbf = bf(arena, p) + if on_left { 1 } else { -1 };
        set_bf(arena, p, pbf);

        match pbf {
            0 => return root,
            1 | -1 => node = p,
            _ => {
                // `node` is the child on the heavy side; pick single vs
                // double by whether it leans the opposite way
                let sub = if pbf > 1 {
                    if bf(arena, node) < 0 {
                        let w = get_r(arena, node).expect("right-leaning child has right child");
                        rotate_left(arena, node, w);
                        rotate_right(arena, p, w);
                        w
                    } else {
                        rotate_right(arena, p, node);
                        node
                    }
                } else if bf(arena, node) > 0 {
                    let w = get_l(arena, node).expect("left-leaning child has left child");
                    rotate_right(arena, node, w);
                    rotate_left(arena, p, w);
                    w
                } else {
                    rotate_left(arena, p, node);
                    node
                };
                return if get_p(arena, sub).is_some() { root } else { sub };
            }
        }
    }
}

/// Exchange the tree positions of `a` and `b`.
///
/// On top of the base link swap, the balance factors are swapped too:
/// a factor describes a position in the tree, not the key/value riding
/// on it, so it must stay with the position.
pub fn node_swap<K, V, N>(arena: &mut [N], root: Option<u32>, a: u32, b: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let root = bst::node_swap(arena, root, a, b);
    let abf = bf(arena, a);
    set_bf(arena, a, bf(arena, b));
    set_bf(arena, b, abf);
    root
}

/// Detach `n` from the tree and restore the balance invariant.  Returns
/// the new root; `n`'s links and factor are cleared but its arena slot is
/// left for the caller to reclaim.
///
/// A node with two children is first position-swapped with its in-order
/// predecessor, which reduces the problem to splicing out a node with at
/// most one child.
pub fn remove<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;
    if get_l(arena, n).is_some() && get_r(arena, n).is_some() {
        let pred = bst::prev(arena, n).expect("two-child node has a predecessor");
        root = node_swap(arena, root, n, pred);
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    if let Some(c) = child {
        set_p(arena, c, p);
    }
    let Some(p) = p else {
        return child;
    };

    // the vacated side decides the sign of the first fix-up diff
    let diff = if get_l(arena, p) == Some(n) {
        set_l(arena, p, child);
        -1
    } else {
        set_r(arena, p, child);
        1
    };
    rebalance_after_remove(arena, root, p, diff)
}

/// Walk up from `node`, applying `diff` and rotating where a factor
/// reaches ±2.
///
/// The stop/continue rules are the inverse of the insert walk: a factor
/// of 0 means the subtree *shrank*, so the walk continues; ±1 means the
/// height is unchanged and the walk stops.  After a ±2 rotation the walk
/// continues only if the rotation actually shortened the subtree — a
/// single rotation around a balanced child (factor 0) does not, and ends
/// the walk.
fn rebalance_after_remove<K, V, N>(
    arena: &mut [N],
    root: Option<u32>,
    node: u32,
    diff: i32,
) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;
    let mut curr = Some(node);
    let mut diff = diff;

    while let Some(n) = curr {
        let p = get_p(arena, n);
        // computed before any rotation: the rotated-in subtree root takes
        // n's place under p, on the same side
        let next_diff = match p {
            Some(p) if get_l(arena, p) == Some(n) => -1,
            _ => 1,
        };

        let nbf = bf(arena, n) + diff;
        set_bf(arena, n, nbf);

        match nbf {
            1 | -1 => return root,
            2 => {
                let c = get_l(arena, n).expect("left-heavy node has a left child");
                let cbf = bf(arena, c);
                if cbf >= 0 {
                    rotate_right(arena, n, c);
                    if get_p(arena, c).is_none() {
                        root = Some(c);
                    }
                    if cbf == 0 {
                        return root;
                    }
                } else {
                    let w = get_r(arena, c).expect("right-leaning child has right child");
                    rotate_left(arena, c, w);
                    rotate_right(arena, n, w);
                    if get_p(arena, w).is_none() {
                        root = Some(w);
                    }
                }
            }
            -2 => {
                let c = get_r(arena, n).expect("right-heavy node has a right child");
                let cbf = bf(arena, c);
                if cbf <= 0 {
                    rotate_left(arena, n, c);
                    if get_p(arena, c).is_none() {
                        root = Some(c);
                    }
                    if cbf == 0 {
                        return root;
                    }
                } else {
                    let w = get_l(arena, c).expect("left-leaning child has left child");
                    rotate_right(arena, c, w);
                    rotate_left(arena, n, w);
                    if get_p(arena, w).is_none() {
                        root = Some(w);
                    }
                }
            }
            _ => {} // 0: subtree shrank, keep walking
        }

        curr = p;
        diff = next_diff;
    }
    root
}

fn tree_height<K, V, N>(arena: &[N], node: u32) -> usize
where
    N: AvlNodeLike<K, V>,
{
    let l = get_l(arena, node)
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    let r = get_r(arena, node)
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    1 + l.max(r)
}

/// Full structural audit: parent-link integrity, every balance factor
/// equal to an independently recomputed `height(l) - height(r)` and in
/// `-1..=1`, and strictly ascending key order.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err("root has a parent".to_string());
    }

    fn check_node<K, V, N>(arena: &[N], node: u32) -> Result<(), String>
    where
        N: AvlNodeLike<K, V>,
    {
        let l = get_l(arena, node);
        let r = get_r(arena, node);

        if let Some(l) = l {
            if get_p(arena, l) != Some(node) {
                return Err(format!("broken parent link on left child of {node}"));
            }
            check_node(arena, l)?;
        }
        if let Some(r) = r {
            if get_p(arena, r) != Some(node) {
                return Err(format!("broken parent link on right child of {node}"));
            }
            check_node(arena, r)?;
        }

        let lh = l.map(|i| tree_height(arena, i)).unwrap_or(0) as i32;
        let rh = r.map(|i| tree_height(arena, i)).unwrap_or(0) as i32;
        let expected = lh - rh;
        let actual = bf(arena, node);
        if actual != expected {
            return Err(format!(
                "balance factor mismatch at {node}: expected {expected}, got {actual}"
            ));
        }
        if !(-1..=1).contains(&actual) {
            return Err(format!("AVL balance violated at {node}"));
        }
        Ok(())
    }

    check_node(arena, root)?;

    let mut prev_node: Option<u32> = None;
    let mut curr = bst::first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(format!("key order violated between {prev} and {i}"));
            }
        }
        prev_node = Some(i);
        curr = bst::next(arena, i);
    }

    Ok(())
}

/// Debug printer.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
