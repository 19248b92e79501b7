//! Uniform leaf-depth check for general binary trees.

use crate::types::Node;

/// True iff every leaf reachable from `root` sits at the same depth.
/// An empty tree is trivially uniform, as is a single node.
///
/// The walk records the depth of the first leaf it reaches and compares
/// every later leaf against it.  A mismatch anywhere makes the whole
/// result false even when the sibling subtree is uniform, since both
/// subtrees' verdicts are combined.
pub fn equal_paths<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    let Some(root) = root else {
        return true;
    };
    let mut leaf_depth = None;
    walk(arena, root, 0, &mut leaf_depth)
}

fn walk<N: Node>(arena: &[N], node: u32, depth: usize, leaf_depth: &mut Option<usize>) -> bool {
    let l = arena[node as usize].l();
    let r = arena[node as usize].r();

    if l.is_none() && r.is_none() {
        return match *leaf_depth {
            None => {
                *leaf_depth = Some(depth);
                true
            }
            Some(d) => d == depth,
        };
    }

    let left_ok = l.map_or(true, |i| walk(arena, i, depth + 1, leaf_depth));
    let right_ok = r.map_or(true, |i| walk(arena, i, depth + 1, leaf_depth));
    left_ok && right_ok
}
