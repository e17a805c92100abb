//! Node structure and link accessors for the red-black tree.

use crate::arena::Arena;
use crate::constants::NIL;

/// Node color.
///
/// Absent children (`NIL`) count as Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Tree node: links, color and an optional payload.
///
/// The payload is `None` for the header sentinel only. Every other node
/// owns exactly one value for as long as it is linked into the tree.
///
/// # Links
/// - `parent`: non-owning back-reference (`HEADER` for the root)
/// - `left`, `right`: children, `NIL` when absent
///
/// For the header the links are reinterpreted:
/// - `parent`: the root (`NIL` when empty)
/// - `left`: leftmost node (header itself when empty)
/// - `right`: rightmost node (header itself when empty)
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) parent: u32,
    pub(crate) left: u32,
    pub(crate) right: u32,
    pub(crate) color: Color,
    pub(crate) value: Option<T>,
}

impl<T> Node<T> {
    /// Create the header sentinel for an empty tree at index `header`.
    ///
    /// The header is Red so it can never be mistaken for a Black root.
    #[inline]
    pub fn header(header: u32) -> Self {
        Node {
            parent: NIL,
            left: header,
            right: header,
            color: Color::Red,
            value: None,
        }
    }

    /// Create an unlinked Red leaf holding `value` below `parent`.
    #[inline]
    pub fn leaf(value: T, parent: u32) -> Self {
        Node {
            parent,
            left: NIL,
            right: NIL,
            color: Color::Red,
            value: Some(value),
        }
    }

    /// `true` for the header sentinel.
    #[inline(always)]
    pub fn is_header(&self) -> bool {
        self.value.is_none()
    }
}

/// Link and color accessors.
///
/// These are the only primitives the tree algorithms use to read and
/// rewrite the structure.
impl<T> Arena<Node<T>> {
    #[inline(always)]
    pub(crate) fn parent(&self, x: u32) -> u32 {
        self.get(x).parent
    }

    #[inline(always)]
    pub(crate) fn left(&self, x: u32) -> u32 {
        self.get(x).left
    }

    #[inline(always)]
    pub(crate) fn right(&self, x: u32) -> u32 {
        self.get(x).right
    }

    #[inline(always)]
    pub(crate) fn color(&self, x: u32) -> Color {
        self.get(x).color
    }

    /// Red test that treats `NIL` as Black.
    #[inline(always)]
    pub(crate) fn is_red(&self, x: u32) -> bool {
        x != NIL && self.get(x).color == Color::Red
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, x: u32, parent: u32) {
        self.get_mut(x).parent = parent;
    }

    #[inline(always)]
    pub(crate) fn set_left(&mut self, x: u32, left: u32) {
        self.get_mut(x).left = left;
    }

    #[inline(always)]
    pub(crate) fn set_right(&mut self, x: u32, right: u32) {
        self.get_mut(x).right = right;
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, x: u32, color: Color) {
        self.get_mut(x).color = color;
    }

    /// Stored value of a non-header node.
    ///
    /// # Panics
    /// Panics if `x` is the header
    #[inline(always)]
    pub(crate) fn value(&self, x: u32) -> &T {
        match &self.get(x).value {
            Some(value) => value,
            None => panic!("header node {x} holds no value"),
        }
    }
}
