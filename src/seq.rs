//! Module provide handle-addressed sequence implemented by [OSeq] type.
//!
//! OSeq is a [red-black tree][wiki-rbt] whose order is positional, not
//! key-comparison based. Callers say where a value goes, at one of the
//! two ends or next to an element they hold a [Handle] for, and the tree
//! keeps O(log n) height plus a cached subtree-size per node for
//! O(log n) [rank][OSeq::rank] and [select][OSeq::select].
//!
//! - Each entry in OSeq instance correspond to one value and one handle.
//! - Parametrised over `value-type`.
//! - Insertion via insert_extremal(), insert_adjacent() api.
//! - Mutation via remove(), set() api, lookup via get().
//! - Full table scan, to iterate over all values in sequence order.
//! - Not thread safe.
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{cmp::Ordering, mem};

use crate::{
    family::{older_family, side_of, younger_family},
    node::{Node, Side},
    slab::{Handle, Ix, Slab},
    Error, Result,
};

/// OSeq manage a single instance of in-memory positionally-ordered
/// sequence using a [red-black tree][rbt] with subtree-size caching.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct OSeq<V> {
    slab: Slab<Node<V>>,
    root: Option<Ix>, // the origin, parent slot of the root node.
}

impl<V> OSeq<V> {
    /// Create an empty instance of OSeq.
    pub fn new() -> OSeq<V> {
        OSeq {
            slab: Slab::new(),
            root: None,
        }
    }
}

/// Maintenance API.
impl<V> OSeq<V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Check whether this instance is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slab.len() == 0
    }

    /// Check whether `handle` still references a live entry.
    #[inline]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.slab.is_live(handle)
    }
}

impl<V> OSeq<V> {
    /// Insert value as the new extremum, `Side::Smaller` makes it the
    /// global minimum of the sequence, `Side::Greater` the global
    /// maximum. Return the handle for the new entry.
    pub fn insert_extremal(&mut self, value: V, side: Side) -> Handle {
        let new = self.slab.insert(Node::new(value));
        match self.root {
            None => self.root = Some(new),
            Some(root) => {
                let mut cursor = root;
                while let Some(next) = self.node(cursor).child(side) {
                    cursor = next;
                }
                self.attach(cursor, side, new);
            }
        }
        self.fixup_insert(new);
        self.slab.handle(new)
    }

    /// Insert value immediately before (`Side::Smaller`) or after
    /// (`Side::Greater`) the entry referenced by `handle`, leaving the
    /// relative order of all other entries untouched. Return the handle
    /// for the new entry.
    pub fn insert_adjacent(&mut self, handle: Handle, value: V, side: Side) -> Result<Handle> {
        let at = self.slab.resolve(handle)?;
        let new = self.slab.insert(Node::new(value));
        match self.node(at).child(side) {
            None => self.attach(at, side, new),
            Some(child) => {
                // the slot is taken, descend along the opposite side of
                // the existing child to the nearest free slot.
                let mut cursor = child;
                while let Some(next) = self.node(cursor).child(!side) {
                    cursor = next;
                }
                self.attach(cursor, !side, new);
            }
        }
        self.fixup_insert(new);
        Ok(self.slab.handle(new))
    }

    /// Remove the entry referenced by `handle` and return its value.
    /// The handle, and every copy of it, is invalid from here on.
    pub fn remove(&mut self, handle: Handle) -> Result<V> {
        let ix = self.slab.resolve(handle)?;

        let node = self.node(ix);
        if node.child(Side::Smaller).is_some() && node.child(Side::Greater).is_some() {
            // Two proper children. Trade places with the in-order
            // successor, which has no smaller child, so the node to die
            // ends up with at most one child. Swapping positions rather
            // than payloads keeps the successor's own handle alive.
            let mut succ = node.child(Side::Greater).unwrap();
            while let Some(next) = self.node(succ).child(Side::Smaller) {
                succ = next;
            }
            self.swap_positions(ix, succ);
        }

        let slot = self.node(ix).parent.map(|p| (p, side_of(&self.slab, p, ix)));
        let child = {
            let node = self.node(ix);
            node.child(Side::Smaller).or_else(|| node.child(Side::Greater))
        };
        let black = self.node(ix).is_black();

        // splice out, adjusting subtree-sizes on the ancestor path.
        match slot {
            None => self.root = child,
            Some((parent, side)) => {
                self.node_mut(parent).set_child(side, child);
                let mut cursor = Some(parent);
                while let Some(up) = cursor {
                    let node = self.node_mut(up);
                    node.size -= 1;
                    cursor = node.parent;
                }
            }
        }
        if let Some(child) = child {
            self.node_mut(child).parent = slot.map(|(p, _)| p);
        }

        let node = self.slab.remove(ix); // invalidates the handle

        if black {
            match (child, slot) {
                // a black node with a single child implies a red child,
                // repainting it black restores every invariant.
                (Some(child), _) => self.node_mut(child).set_black(),
                // black leaf: its old slot is one black level short.
                (None, Some((parent, side))) => self.fixup_remove(parent, side),
                // black root leaf: the tree got uniformly shallower.
                (None, None) => (),
            }
        }
        Ok(node.value)
    }

    /// Get a reference to the value of the entry referenced by `handle`.
    pub fn get(&self, handle: Handle) -> Result<&V> {
        let ix = self.slab.resolve(handle)?;
        Ok(&self.slab.get(ix).value)
    }

    /// Replace the value of the entry referenced by `handle`, in place,
    /// without rebalancing. Return the old value.
    pub fn set(&mut self, handle: Handle, value: V) -> Result<V> {
        let ix = self.slab.resolve(handle)?;
        Ok(mem::replace(&mut self.slab.get_mut(ix).value, value))
    }

    /// Return the 0-based in-order position of the entry referenced by
    /// `handle`, in O(log n) via the cached subtree-sizes.
    pub fn rank(&self, handle: Handle) -> Result<usize> {
        let ix = self.slab.resolve(handle)?;
        let mut rank = self.size_of(self.node(ix).child(Side::Smaller));
        let mut cursor = ix;
        while let Some(parent) = self.node(cursor).parent {
            if side_of(&self.slab, parent, cursor) == Side::Greater {
                rank += self.size_of(self.node(parent).child(Side::Smaller)) + 1;
            }
            cursor = parent;
        }
        Ok(rank)
    }

    /// Return the handle of the entry at in-order position `index`, in
    /// O(log n) via the cached subtree-sizes.
    pub fn select(&self, index: usize) -> Result<Handle> {
        if index >= self.len() {
            return err_at!(IndexOutOfBounds, msg: "index {} >= len {}", index, self.len());
        }
        let mut cursor = self.root.unwrap();
        let mut index = index;
        loop {
            let smaller = self.size_of(self.node(cursor).child(Side::Smaller));
            cursor = match index.cmp(&smaller) {
                Ordering::Equal => break Ok(self.slab.handle(cursor)),
                Ordering::Less => self.node(cursor).child(Side::Smaller).unwrap(),
                Ordering::Greater => {
                    index -= smaller + 1;
                    self.node(cursor).child(Side::Greater).unwrap()
                }
            };
        }
    }

    /// Return the handle of the first (`Side::Smaller`) or last
    /// (`Side::Greater`) entry, None on an empty instance.
    pub fn extremal(&self, side: Side) -> Option<Handle> {
        let mut cursor = self.root?;
        while let Some(next) = self.node(cursor).child(side) {
            cursor = next;
        }
        Some(self.slab.handle(cursor))
    }

    /// Return the handle of the neighbour of `handle` on `side`, None
    /// when `handle` references the extremum on that side.
    pub fn adjacent(&self, handle: Handle, side: Side) -> Result<Option<Handle>> {
        let ix = self.slab.resolve(handle)?;
        Ok(self.adjacent_ix(ix, side).map(|ix| self.slab.handle(ix)))
    }

    /// Return an iterator over all values, in sequence order.
    pub fn iter(&self) -> Iter<V> {
        let mut next = self.root;
        while let Some(ix) = next {
            match self.node(ix).child(Side::Smaller) {
                Some(smaller) => next = Some(smaller),
                None => break,
            }
        }
        Iter { seq: self, next }
    }

    /// Validate tree with following rules:
    ///
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Cached subtree-size equals 1 + left-size + right-size.
    /// * Parent back-references agree with the child links.
    pub fn validate(&self) -> Result<()> {
        let (_, size) = self.validate_tree(self.root, None, false)?;
        if size != self.len() {
            return err_at!(Fatal, msg: "tree count {} != len {}", size, self.len());
        }
        Ok(())
    }
}

impl<V> OSeq<V> {
    #[inline]
    fn node(&self, ix: Ix) -> &Node<V> {
        self.slab.get(ix)
    }

    #[inline]
    fn node_mut(&mut self, ix: Ix) -> &mut Node<V> {
        self.slab.get_mut(ix)
    }

    fn is_red(&self, node: Option<Ix>) -> bool {
        node.map_or(false, |ix| !self.slab.get(ix).is_black())
    }

    // absent children contribute 0.
    fn size_of(&self, node: Option<Ix>) -> usize {
        node.map_or(0, |ix| self.slab.get(ix).size)
    }

    // Link `new` into the free `side` slot of `parent` and bump the
    // subtree-sizes on the ancestor path.
    fn attach(&mut self, parent: Ix, side: Side, new: Ix) {
        debug_assert!(self.node(parent).child(side).is_none());
        self.node_mut(parent).set_child(side, Some(new));
        self.node_mut(new).parent = Some(parent);
        let mut cursor = Some(parent);
        while let Some(up) = cursor {
            let node = self.node_mut(up);
            node.size += 1;
            cursor = node.parent;
        }
    }

    // Rotate `pivot` so that its `side` child ascends into its place.
    // Preserves the in-order sequence, never touches colors, patches the
    // two cached subtree-sizes in O(1). Return the new subtree root.
    fn rotate(&mut self, pivot: Ix, side: Side) -> Ix {
        let up = match self.node(pivot).child(side) {
            Some(up) => up,
            None => panic!("rotate({:?}): no child to ascend ? call the programmer", side),
        };
        let slot = self.node(pivot).parent.map(|p| (p, side_of(&self.slab, p, pivot)));
        let inner = self.node(up).child(!side);

        // the crossing grandchild changes sides.
        self.node_mut(pivot).set_child(side, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(pivot);
        }

        // pivot descends under `up`.
        self.node_mut(up).set_child(!side, Some(pivot));
        self.node_mut(pivot).parent = Some(up);

        // `up` takes pivot's old slot.
        self.node_mut(up).parent = slot.map(|(p, _)| p);
        match slot {
            None => self.root = Some(up),
            Some((parent, pside)) => self.node_mut(parent).set_child(pside, Some(up)),
        }

        // `up` now counts what pivot counted, pivot recounts its children.
        let up_size = self.node(pivot).size;
        let pivot_size = 1
            + self.size_of(self.node(pivot).child(Side::Smaller))
            + self.size_of(self.node(pivot).child(Side::Greater));
        self.node_mut(up).size = up_size;
        self.node_mut(pivot).size = pivot_size;
        up
    }

    // Restore the no-red-red invariant after inserting the red node `n`.
    fn fixup_insert(&mut self, mut n: Ix) {
        loop {
            let fam = match older_family(&self.slab, n) {
                // n is the root, it has no parent to conflict with.
                None => break,
                Some(fam) => fam,
            };
            if self.node(fam.parent).is_black() {
                break;
            }
            let elder = match fam.elder {
                None => {
                    // red parent is the root, blackening the root never
                    // disturbs black-height parity elsewhere.
                    self.node_mut(fam.parent).set_black();
                    break;
                }
                Some(elder) => elder,
            };
            match elder.uncle {
                Some(uncle) if self.is_red(Some(uncle)) => {
                    // red uncle: push the grandparent's black one level
                    // down and retry from the grandparent.
                    self.node_mut(fam.parent).set_black();
                    self.node_mut(uncle).set_black();
                    self.node_mut(elder.grandparent).set_red();
                    n = elder.grandparent;
                }
                _ => {
                    // black uncle: straighten a zig-zag first, then one
                    // rotation at the grandparent terminates.
                    if fam.side != elder.parent_side {
                        self.rotate(fam.parent, fam.side);
                    }
                    let top = self.rotate(elder.grandparent, elder.parent_side);
                    self.node_mut(top).set_black();
                    self.node_mut(elder.grandparent).set_red();
                    break;
                }
            }
        }
    }

    // Restore equal black-heights after the `side` child slot of
    // `parent` lost one black level.
    fn fixup_remove(&mut self, mut parent: Ix, mut side: Side) {
        // the deficiency climbs at most one level per iteration.
        let mut budget = self.height_bound();
        loop {
            debug_assert!(budget > 0, "removal fixup exceeded height bound");
            budget = budget.saturating_sub(1);

            let mut fam = younger_family(&self.slab, parent, side);
            if self.is_red(Some(fam.sibling)) {
                // red sibling: rotate it above the parent, the slot's
                // new sibling is black and the cases below apply.
                self.rotate(parent, !side);
                self.node_mut(fam.sibling).set_black();
                self.node_mut(parent).set_red();
                fam = younger_family(&self.slab, parent, side);
            }

            if !self.is_red(fam.close) && !self.is_red(fam.distant) {
                if self.is_red(Some(parent)) {
                    // red parent absorbs the missing black level.
                    self.node_mut(parent).set_black();
                    self.node_mut(fam.sibling).set_red();
                    return;
                }
                // all-black family: shorten the sibling side to match
                // and climb, the deficiency moved one level up.
                self.node_mut(fam.sibling).set_red();
                match older_family(&self.slab, parent) {
                    Some(up) => {
                        side = up.side;
                        parent = up.parent;
                    }
                    // the whole tree is now uniformly one level shallower.
                    None => return,
                }
                continue;
            }

            let sibling = if self.is_red(fam.distant) {
                fam.sibling
            } else {
                // red close nephew only: rotate it over the sibling,
                // turning it into a black sibling with a red distant
                // nephew.
                let close = fam.close.unwrap();
                self.rotate(fam.sibling, side);
                self.node_mut(close).set_black();
                self.node_mut(fam.sibling).set_red();
                close
            };

            // red distant nephew: terminal rotation at the parent. The
            // sibling inherits the parent's color so paths outside the
            // deficient slot keep their black count.
            let distant = self.node(sibling).child(!side).unwrap();
            let parent_black = self.node(parent).is_black();
            self.rotate(parent, !side);
            self.node_mut(sibling).black = parent_black;
            self.node_mut(parent).set_black();
            self.node_mut(distant).set_black();
            return;
        }
    }

    // Exchange the tree positions of `a` and its in-order successor `s`,
    // colors and cached sizes included. Payloads and handles stay put.
    // Requires `a` to have two proper children.
    fn swap_positions(&mut self, a: Ix, s: Ix) {
        let a_black = self.node(a).black;
        let s_black = self.node(s).black;
        self.node_mut(a).black = s_black;
        self.node_mut(s).black = a_black;
        let a_size = self.node(a).size;
        let s_size = self.node(s).size;
        self.node_mut(a).size = s_size;
        self.node_mut(s).size = a_size;

        let a_slot = self.node(a).parent.map(|p| (p, side_of(&self.slab, p, a)));
        let a_left = self.node(a).child(Side::Smaller);
        let a_right = self.node(a).child(Side::Greater).unwrap();
        let s_parent = self.node(s).parent.unwrap();
        let s_right = self.node(s).child(Side::Greater);

        // a's smaller subtree hangs under s in every configuration; the
        // successor never has a smaller child of its own.
        self.node_mut(s).set_child(Side::Smaller, a_left);
        if let Some(left) = a_left {
            self.node_mut(left).parent = Some(s);
        }

        // a picks up s's greater child and drops to leaf-or-one-child.
        self.node_mut(a).set_child(Side::Smaller, None);
        self.node_mut(a).set_child(Side::Greater, s_right);
        if let Some(right) = s_right {
            self.node_mut(right).parent = Some(a);
        }

        if s == a_right {
            // successor is a's own greater child, they swap directly.
            self.node_mut(s).set_child(Side::Greater, Some(a));
            self.node_mut(a).parent = Some(s);
        } else {
            // successor is the smaller-most node of a's greater subtree.
            self.node_mut(s).set_child(Side::Greater, Some(a_right));
            self.node_mut(a_right).parent = Some(s);
            self.node_mut(s_parent).set_child(Side::Smaller, Some(a));
            self.node_mut(a).parent = Some(s_parent);
        }

        // s takes a's slot in a's old parent, or under the origin.
        self.node_mut(s).parent = a_slot.map(|(p, _)| p);
        match a_slot {
            None => self.root = Some(s),
            Some((parent, side)) => self.node_mut(parent).set_child(side, Some(s)),
        }
    }

    fn adjacent_ix(&self, ix: Ix, side: Side) -> Option<Ix> {
        match self.node(ix).child(side) {
            Some(mut cursor) => {
                while let Some(next) = self.node(cursor).child(!side) {
                    cursor = next;
                }
                Some(cursor)
            }
            None => {
                let mut cursor = ix;
                while let Some(parent) = self.node(cursor).parent {
                    if side_of(&self.slab, parent, cursor) != side {
                        return Some(parent);
                    }
                    cursor = parent;
                }
                None
            }
        }
    }

    // a red-black tree of n nodes is at most 2*lg(n+1) levels deep.
    fn height_bound(&self) -> usize {
        let n = self.slab.len() + 1;
        2 * (usize::BITS as usize - n.leading_zeros() as usize) + 1
    }

    fn validate_tree(
        &self,
        node: Option<Ix>,
        parent: Option<Ix>,
        fromred: bool,
    ) -> Result<(usize, usize)> {
        let ix = match node {
            Some(ix) => ix,
            None => return Ok((0, 0)),
        };
        let node = self.node(ix);

        if node.parent != parent {
            return err_at!(Fatal, msg: "broken parent link at node {}", ix);
        }
        let red = !node.is_black();
        if fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at node {}", ix);
        }

        let (lblacks, lsize) = self.validate_tree(node.child(Side::Smaller), Some(ix), red)?;
        let (rblacks, rsize) = self.validate_tree(node.child(Side::Greater), Some(ix), red)?;
        if lblacks != rblacks {
            return err_at!(Fatal, msg: "unbalanced blacks {} {} at node {}", lblacks, rblacks, ix);
        }

        let size = 1 + lsize + rsize;
        if node.size != size {
            return err_at!(Fatal, msg: "subtree-size {} expected {} at node {}", node.size, size, ix);
        }

        Ok((lblacks + if red { 0 } else { 1 }, size))
    }
}

/// Iterator type, returned by [OSeq::iter], yields values in sequence
/// order. Lazy and restartable, `iter()` can be called any number of
/// times.
pub struct Iter<'a, V> {
    seq: &'a OSeq<V>,
    next: Option<Ix>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let ix = self.next?;
        self.next = self.seq.adjacent_ix(ix, Side::Greater);
        Some(&self.seq.node(ix).value)
    }
}

#[cfg(test)]
#[path = "seq_test.rs"]
mod seq_test;
