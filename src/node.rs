use std::ops::Not;

use crate::slab::Ix;

/// Side selects one of the two directions of a sequence.
///
/// `Smaller` is toward the front (lower ranks), `Greater` toward the
/// back (higher ranks). The same vocabulary names child slots inside
/// the tree, so every symmetric algorithm is written once over a
/// `side` variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    Smaller,
    Greater,
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::Smaller => Side::Greater,
            Side::Greater => Side::Smaller,
        }
    }
}

impl Side {
    #[inline]
    pub(crate) fn as_index(self) -> usize {
        match self {
            Side::Smaller => 0,
            Side::Greater => 1,
        }
    }
}

// Node corresponds to a single entry in OSeq instance.
//
// Links are arena indices rather than owning references, so the
// parent back-reference does not create an ownership cycle. A `None`
// parent means the node hangs off the origin, in other words it is
// the root. A `None` child is the absent sentinel and counts as black
// with subtree-size 0.
pub struct Node<V> {
    pub value: V,
    pub black: bool,               // store: black or red
    pub parent: Option<Ix>,        // store: None means root
    pub children: [Option<Ix>; 2], // store: indexed by Side
    pub size: usize,               // store: 1 + left-size + right-size
}

impl<V> Node<V> {
    pub fn new(value: V) -> Node<V> {
        Node {
            value,
            black: false, // new nodes join the tree red
            parent: None,
            children: [None, None],
            size: 1,
        }
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<Ix> {
        self.children[side.as_index()]
    }

    #[inline]
    pub fn set_child(&mut self, side: Side, child: Option<Ix>) {
        self.children[side.as_index()] = child
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.black = true
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
