use std::fmt;

use crate::{Error, Result};

// Arena index, links inside the tree are stored in this form.
pub(crate) type Ix = u32;

/// Handle is an opaque capability referencing exactly one entry in an
/// [OSeq][crate::OSeq] instance.
///
/// A handle is minted when its entry is inserted and becomes permanently
/// invalid the moment the entry is removed. The slot index is paired
/// with a generation stamp, so a stale handle is detected cheaply and
/// deterministically instead of silently reading whatever value reuses
/// the slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Handle {
    pub(crate) ix: Ix,
    pub(crate) gen: u32,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle<{},{}>", self.ix, self.gen)
    }
}

// Generation-stamped slot. `item` is None while the slot sits in the
// free-list; the generation is bumped on every removal so handles to
// the old occupant can never resolve again.
struct Slot<T> {
    gen: u32,
    item: Option<T>,
}

// Slab is the arena backing one tree instance. Entries are addressed
// internally by raw `Ix` and externally by generation-checked
// [Handle]. Removed slots are recycled through a free-list.
pub(crate) struct Slab<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Ix>,
    n_count: usize, // number of live entries.
}

impl<T> Slab<T> {
    pub fn new() -> Slab<T> {
        Slab {
            slots: Vec::default(),
            free: Vec::default(),
            n_count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    pub fn insert(&mut self, item: T) -> Ix {
        self.n_count += 1;
        match self.free.pop() {
            Some(ix) => {
                let slot = &mut self.slots[ix as usize];
                slot.item = Some(item);
                ix
            }
            None => {
                let ix = self.slots.len() as Ix;
                self.slots.push(Slot { gen: 0, item: Some(item) });
                ix
            }
        }
    }

    pub fn remove(&mut self, ix: Ix) -> T {
        let slot = &mut self.slots[ix as usize];
        match slot.item.take() {
            Some(item) => {
                slot.gen = slot.gen.wrapping_add(1);
                self.free.push(ix);
                self.n_count -= 1;
                item
            }
            None => panic!("slab.remove({}): free slot ? call the programmer", ix),
        }
    }

    pub fn get(&self, ix: Ix) -> &T {
        match self.slots[ix as usize].item.as_ref() {
            Some(item) => item,
            None => panic!("slab.get({}): free slot ? call the programmer", ix),
        }
    }

    pub fn get_mut(&mut self, ix: Ix) -> &mut T {
        match self.slots[ix as usize].item.as_mut() {
            Some(item) => item,
            None => panic!("slab.get_mut({}): free slot ? call the programmer", ix),
        }
    }

    // Mint the current handle for a live slot.
    pub fn handle(&self, ix: Ix) -> Handle {
        Handle {
            ix,
            gen: self.slots[ix as usize].gen,
        }
    }

    // Fail-fast gate every public handle-taking operation goes through.
    pub fn resolve(&self, handle: Handle) -> Result<Ix> {
        match self.slots.get(handle.ix as usize) {
            Some(slot) if slot.gen == handle.gen && slot.item.is_some() => Ok(handle.ix),
            Some(_) => err_at!(InvalidHandle, msg: "stale handle {:?}", handle),
            None => err_at!(InvalidHandle, msg: "foreign handle {:?}", handle),
        }
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }
}

#[cfg(test)]
#[path = "slab_test.rs"]
mod slab_test;
