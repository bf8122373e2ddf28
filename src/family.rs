//! Family views over the tree links.
//!
//! Both fixup state machines reason about a node's relatives. The views
//! here are projections computed from the links on demand, they are never
//! stored, so there is no second source of truth to drift from the link
//! structure across a rotation.

use crate::{
    node::{Node, Side},
    slab::{Ix, Slab},
};

// Older family of a node, consumed by the insertion fixup.
pub struct OlderFamily {
    pub parent: Ix,
    pub side: Side, // the node's side under parent
    pub elder: Option<Elder>,
}

// Present when the parent is not the root.
pub struct Elder {
    pub grandparent: Ix,
    pub parent_side: Side, // the parent's side under grandparent
    pub uncle: Option<Ix>,
}

// Younger family of a (possibly absent) child slot, consumed by the
// removal fixup. The close nephew sits on the slot's own side, the
// distant nephew on the far side.
pub struct YoungerFamily {
    pub sibling: Ix,
    pub close: Option<Ix>,
    pub distant: Option<Ix>,
}

// Which side of `parent` holds `child`.
pub fn side_of<V>(slab: &Slab<Node<V>>, parent: Ix, child: Ix) -> Side {
    let node = slab.get(parent);
    if node.child(Side::Smaller) == Some(child) {
        Side::Smaller
    } else if node.child(Side::Greater) == Some(child) {
        Side::Greater
    } else {
        panic!("side_of({}, {}): broken parent link ? call the programmer", parent, child)
    }
}

// View up from `n`: parent, grandparent and uncle. None when `n` is
// the root.
pub fn older_family<V>(slab: &Slab<Node<V>>, n: Ix) -> Option<OlderFamily> {
    let parent = slab.get(n).parent?;
    let side = side_of(slab, parent, n);
    let elder = slab.get(parent).parent.map(|grandparent| {
        let parent_side = side_of(slab, grandparent, parent);
        Elder {
            grandparent,
            parent_side,
            uncle: slab.get(grandparent).child(!parent_side),
        }
    });
    Some(OlderFamily { parent, side, elder })
}

// View across from the `side` child slot of `parent`. A deficient slot
// always has a proper sibling, one black level cannot fit in an absent
// child, so a missing sibling is a logic error.
pub fn younger_family<V>(slab: &Slab<Node<V>>, parent: Ix, side: Side) -> YoungerFamily {
    let sibling = match slab.get(parent).child(!side) {
        Some(sibling) => sibling,
        None => panic!("younger_family({}): no sibling ? call the programmer", parent),
    };
    let node = slab.get(sibling);
    YoungerFamily {
        sibling,
        close: node.child(side),
        distant: node.child(!side),
    }
}
