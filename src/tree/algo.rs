//! Red-black tree link algorithms.
//!
//! Every function here works on node indices inside one arena and never
//! looks at stored values. The root is reached through the header
//! (`header.parent`), so rotations that move the root reseat it there.
//!
//! Only this module rewrites links and colors of linked nodes; the
//! container reaches it through insert and erase.

use log::trace;

use super::node::{Color, Node};
use crate::arena::Arena;
use crate::constants::{HEADER, NIL};

type Nodes<T> = Arena<Node<T>>;

/// Current root index (`NIL` when empty).
#[inline(always)]
pub(crate) fn root<T>(nodes: &Nodes<T>) -> u32 {
    nodes.parent(HEADER)
}

/// Leftmost node of the subtree rooted at `x`.
///
/// # Performance
/// O(height)
#[inline]
pub(crate) fn minimum<T>(nodes: &Nodes<T>, mut x: u32) -> u32 {
    while nodes.left(x) != NIL {
        x = nodes.left(x);
    }
    x
}

/// Rightmost node of the subtree rooted at `x`.
///
/// # Performance
/// O(height)
#[inline]
pub(crate) fn maximum<T>(nodes: &Nodes<T>, mut x: u32) -> u32 {
    while nodes.right(x) != NIL {
        x = nodes.right(x);
    }
    x
}

/// `true` if `x` is the header sentinel.
///
/// The header is the only node without a payload. Structurally it is
/// also the only Red node whose grandparent is itself (when the tree is
/// non-empty); debug builds check that the two views agree.
#[inline(always)]
pub(crate) fn is_header<T>(nodes: &Nodes<T>, x: u32) -> bool {
    let header = nodes.get(x).is_header();
    debug_assert!(
        !header
            || (nodes.color(x) == Color::Red
                && (nodes.parent(x) == NIL || nodes.parent(nodes.parent(x)) == x)),
        "header sentinel lost its structural shape"
    );
    header
}

/// In-order successor of a value node.
///
/// Returns `HEADER` after the rightmost node.
///
/// # Performance
/// O(height) worst case, O(1) amortized over a full traversal
pub(crate) fn successor<T>(nodes: &Nodes<T>, mut x: u32) -> u32 {
    if nodes.right(x) != NIL {
        return minimum(nodes, nodes.right(x));
    }
    let mut y = nodes.parent(x);
    while nodes.right(y) == x {
        x = y;
        y = nodes.parent(y);
    }
    // Climbing from the maximum when the root has no right child stops
    // on the header with y == root; x is already the header then.
    if nodes.right(x) != y {
        x = y;
    }
    x
}

/// In-order predecessor.
///
/// From the header this lands on the rightmost node, which is how a
/// reverse traversal starts from `end()`. The leftmost node has no
/// predecessor; callers check for it before stepping.
///
/// # Performance
/// O(height) worst case, O(1) amortized over a full traversal
pub(crate) fn predecessor<T>(nodes: &Nodes<T>, mut x: u32) -> u32 {
    if is_header(nodes, x) {
        return nodes.right(x);
    }
    if nodes.left(x) != NIL {
        return maximum(nodes, nodes.left(x));
    }
    let mut y = nodes.parent(x);
    while nodes.left(y) == x {
        x = y;
        y = nodes.parent(y);
    }
    y
}

/// Point `parent`'s link that referenced `old` at `new`.
///
/// When `parent` is the header, `old` was the root and the root link is
/// replaced; the header's leftmost/rightmost caches are not touched.
#[inline]
fn replace_child<T>(nodes: &mut Nodes<T>, parent: u32, old: u32, new: u32) {
    if parent == HEADER {
        nodes.set_parent(HEADER, new);
    } else if nodes.left(parent) == old {
        nodes.set_left(parent, new);
    } else {
        nodes.set_right(parent, new);
    }
}

/// Rotate left around `x`; `x`'s right child takes its place.
///
/// ```text
///     x                y
///    / \              / \
///   a   y     =>     x   c
///      / \          / \
///     b   c        a   b
/// ```
pub(crate) fn rotate_left<T>(nodes: &mut Nodes<T>, x: u32) {
    let y = nodes.right(x);
    let b = nodes.left(y);

    nodes.set_right(x, b);
    if b != NIL {
        nodes.set_parent(b, x);
    }

    let p = nodes.parent(x);
    nodes.set_parent(y, p);
    replace_child(nodes, p, x, y);

    nodes.set_left(y, x);
    nodes.set_parent(x, y);
}

/// Rotate right around `x`; `x`'s left child takes its place.
///
/// ```text
///       x            y
///      / \          / \
///     y   c   =>   a   x
///    / \              / \
///   a   b            b   c
/// ```
pub(crate) fn rotate_right<T>(nodes: &mut Nodes<T>, x: u32) {
    let y = nodes.left(x);
    let b = nodes.right(y);

    nodes.set_left(x, b);
    if b != NIL {
        nodes.set_parent(b, x);
    }

    let p = nodes.parent(x);
    nodes.set_parent(y, p);
    replace_child(nodes, p, x, y);

    nodes.set_right(y, x);
    nodes.set_parent(x, y);
}

/// Link the detached node `z` as a child of `parent` and rebalance.
///
/// `parent == HEADER` means the tree is empty and `z` becomes the root.
/// Keeps the header's leftmost/rightmost caches current.
pub(crate) fn link_and_rebalance<T>(nodes: &mut Nodes<T>, z: u32, parent: u32, as_left: bool) {
    nodes.set_parent(z, parent);
    nodes.set_left(z, NIL);
    nodes.set_right(z, NIL);

    if parent == HEADER {
        nodes.set_parent(HEADER, z);
        nodes.set_left(HEADER, z);
        nodes.set_right(HEADER, z);
    } else if as_left {
        debug_assert_eq!(nodes.left(parent), NIL, "left slot already taken");
        nodes.set_left(parent, z);
        if nodes.left(HEADER) == parent {
            nodes.set_left(HEADER, z);
        }
    } else {
        debug_assert_eq!(nodes.right(parent), NIL, "right slot already taken");
        nodes.set_right(parent, z);
        if nodes.right(HEADER) == parent {
            nodes.set_right(HEADER, z);
        }
    }

    insert_rebalance(nodes, z);
}

/// Restore the red-black invariants after linking the new leaf `x`.
///
/// # Algorithm
/// While `x`'s parent is Red:
/// 1. Red uncle: recolor parent and uncle Black, grandparent Red,
///    continue from the grandparent
/// 2. Black uncle, `x` on the inner side: rotate at the parent so `x`
///    is on the outer side
/// 3. Black uncle, outer side: recolor parent Black, grandparent Red,
///    rotate at the grandparent; done
///
/// The root is colored Black on exit.
///
/// # Performance
/// O(log n) recolorings, at most 2 rotations
pub(crate) fn insert_rebalance<T>(nodes: &mut Nodes<T>, mut x: u32) {
    nodes.set_color(x, Color::Red);

    while x != root(nodes) && nodes.is_red(nodes.parent(x)) {
        let p = nodes.parent(x);
        let g = nodes.parent(p);

        if p == nodes.left(g) {
            let uncle = nodes.right(g);
            if nodes.is_red(uncle) {
                trace!("insert rebalance: recolor at {g}");
                nodes.set_color(p, Color::Black);
                nodes.set_color(uncle, Color::Black);
                nodes.set_color(g, Color::Red);
                x = g;
            } else {
                if x == nodes.right(p) {
                    trace!("insert rebalance: straighten at {p}");
                    x = p;
                    rotate_left(nodes, x);
                }
                let p = nodes.parent(x);
                let g = nodes.parent(p);
                trace!("insert rebalance: rotate right at {g}");
                nodes.set_color(p, Color::Black);
                nodes.set_color(g, Color::Red);
                rotate_right(nodes, g);
                break;
            }
        } else {
            let uncle = nodes.left(g);
            if nodes.is_red(uncle) {
                trace!("insert rebalance: recolor at {g}");
                nodes.set_color(p, Color::Black);
                nodes.set_color(uncle, Color::Black);
                nodes.set_color(g, Color::Red);
                x = g;
            } else {
                if x == nodes.left(p) {
                    trace!("insert rebalance: straighten at {p}");
                    x = p;
                    rotate_right(nodes, x);
                }
                let p = nodes.parent(x);
                let g = nodes.parent(p);
                trace!("insert rebalance: rotate left at {g}");
                nodes.set_color(p, Color::Black);
                nodes.set_color(g, Color::Red);
                rotate_left(nodes, g);
                break;
            }
        }
    }

    let r = root(nodes);
    nodes.set_color(r, Color::Black);
}

/// Unlink `z` from the tree and restore the red-black invariants.
///
/// Returns the index of the node that left the tree, which is always
/// `z`: when `z` has two children its in-order successor `y` is moved
/// into `z`'s place (links and color), so every other node keeps its
/// index and outstanding positions stay valid.
///
/// # Algorithm
/// 1. `y` = `z` if it has at most one child, else the successor of `z`
/// 2. Splice `y` out, putting its only child `x` (maybe `NIL`) in its slot
/// 3. If `y != z`, transplant `y` into `z`'s slot and swap their colors
/// 4. Refresh the cached leftmost/rightmost
/// 5. If a Black node left the tree, walk up from `x` fixing the deficit:
///    - Red sibling: rotate it above the parent
///    - Black sibling, Black children: recolor sibling Red, move up
///    - Black sibling, Red near child only: rotate at the sibling
///    - Black sibling, Red far child: rotate at the parent; done
/// 6. Color `x` Black
///
/// # Performance
/// O(log n) recolorings, at most 3 rotations
pub(crate) fn erase_rebalance<T>(nodes: &mut Nodes<T>, z: u32) -> u32 {
    let y = if nodes.left(z) == NIL || nodes.right(z) == NIL {
        z
    } else {
        minimum(nodes, nodes.right(z))
    };
    let mut x = if nodes.left(y) != NIL {
        nodes.left(y)
    } else {
        nodes.right(y)
    };
    let mut x_parent;

    if y != z {
        // z has two children; y is the leftmost node of z's right subtree
        let zl = nodes.left(z);
        nodes.set_parent(zl, y);
        nodes.set_left(y, zl);

        if y != nodes.right(z) {
            x_parent = nodes.parent(y);
            if x != NIL {
                nodes.set_parent(x, x_parent);
            }
            nodes.set_left(x_parent, x);

            let zr = nodes.right(z);
            nodes.set_right(y, zr);
            nodes.set_parent(zr, y);
        } else {
            x_parent = y;
        }

        let zp = nodes.parent(z);
        replace_child(nodes, zp, z, y);
        nodes.set_parent(y, zp);

        let y_color = nodes.color(y);
        nodes.set_color(y, nodes.color(z));
        nodes.set_color(z, y_color);
        // A node with two children is never an extremity.
    } else {
        x_parent = nodes.parent(z);
        if x != NIL {
            nodes.set_parent(x, x_parent);
        }
        replace_child(nodes, x_parent, z, x);

        if nodes.left(HEADER) == z {
            let leftmost = if x == NIL { x_parent } else { minimum(nodes, x) };
            nodes.set_left(HEADER, leftmost);
        }
        if nodes.right(HEADER) == z {
            let rightmost = if x == NIL { x_parent } else { maximum(nodes, x) };
            nodes.set_right(HEADER, rightmost);
        }
    }

    // z now carries the color that left the tree
    if nodes.color(z) == Color::Black {
        while x != root(nodes) && !nodes.is_red(x) {
            if x == nodes.left(x_parent) {
                let mut w = nodes.right(x_parent);
                if nodes.is_red(w) {
                    trace!("erase rebalance: red sibling {w}");
                    nodes.set_color(w, Color::Black);
                    nodes.set_color(x_parent, Color::Red);
                    rotate_left(nodes, x_parent);
                    w = nodes.right(x_parent);
                }
                if !nodes.is_red(nodes.left(w)) && !nodes.is_red(nodes.right(w)) {
                    trace!("erase rebalance: push deficit up from {x_parent}");
                    nodes.set_color(w, Color::Red);
                    x = x_parent;
                    x_parent = nodes.parent(x_parent);
                } else {
                    if !nodes.is_red(nodes.right(w)) {
                        trace!("erase rebalance: rotate near child at {w}");
                        let wl = nodes.left(w);
                        nodes.set_color(wl, Color::Black);
                        nodes.set_color(w, Color::Red);
                        rotate_right(nodes, w);
                        w = nodes.right(x_parent);
                    }
                    trace!("erase rebalance: rotate left at {x_parent}");
                    nodes.set_color(w, nodes.color(x_parent));
                    nodes.set_color(x_parent, Color::Black);
                    let wr = nodes.right(w);
                    if wr != NIL {
                        nodes.set_color(wr, Color::Black);
                    }
                    rotate_left(nodes, x_parent);
                    break;
                }
            } else {
                let mut w = nodes.left(x_parent);
                if nodes.is_red(w) {
                    trace!("erase rebalance: red sibling {w}");
                    nodes.set_color(w, Color::Black);
                    nodes.set_color(x_parent, Color::Red);
                    rotate_right(nodes, x_parent);
                    w = nodes.left(x_parent);
                }
                if !nodes.is_red(nodes.left(w)) && !nodes.is_red(nodes.right(w)) {
                    trace!("erase rebalance: push deficit up from {x_parent}");
                    nodes.set_color(w, Color::Red);
                    x = x_parent;
                    x_parent = nodes.parent(x_parent);
                } else {
                    if !nodes.is_red(nodes.left(w)) {
                        trace!("erase rebalance: rotate near child at {w}");
                        let wr = nodes.right(w);
                        nodes.set_color(wr, Color::Black);
                        nodes.set_color(w, Color::Red);
                        rotate_left(nodes, w);
                        w = nodes.left(x_parent);
                    }
                    trace!("erase rebalance: rotate right at {x_parent}");
                    nodes.set_color(w, nodes.color(x_parent));
                    nodes.set_color(x_parent, Color::Black);
                    let wl = nodes.left(w);
                    if wl != NIL {
                        nodes.set_color(wl, Color::Black);
                    }
                    rotate_right(nodes, x_parent);
                    break;
                }
            }
        }
        if x != NIL {
            nodes.set_color(x, Color::Black);
        }
    }

    z
}
