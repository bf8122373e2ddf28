//! Module provide sorted-set implemented by [OSet] type.
//!
//! OSet pairs an [OSeq] with a value→handle index. The index decides
//! where a value belongs, the sequence keeps the order statistics, so
//! membership, [rank][OSet::rank] and [select][OSet::select] are all
//! O(log n).

use std::{borrow::Borrow, collections::BTreeMap, ops::Bound};

use crate::{seq::Iter, Error, Handle, OSeq, Result, Side};

/// OSet manage a sorted-set of unique values with O(log n) rank and
/// select, on top of [OSeq].
///
/// ```
/// use oseq::OSet;
///
/// let mut index: OSet<u64> = OSet::new();
/// assert!(index.insert(20));
/// assert!(index.insert(10));
/// assert!(!index.insert(10)); // already a member
///
/// assert_eq!(index.rank(&20), Some(1));
/// assert_eq!(index.select(0), Some(&10));
/// assert_eq!(index.remove(&10), true);
/// assert_eq!(index.len(), 1);
/// ```
pub struct OSet<T> {
    index: BTreeMap<T, Handle>,
    seq: OSeq<T>,
}

impl<T> OSet<T> {
    /// Create an empty instance of OSet.
    pub fn new() -> OSet<T> {
        OSet {
            index: BTreeMap::new(),
            seq: OSeq::new(),
        }
    }

    /// Return number of values in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Check whether this instance is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Return an iterator over all values in sorted order.
    pub fn iter(&self) -> Iter<T> {
        self.seq.iter()
    }
}

impl<T> OSet<T>
where
    T: Ord + Clone,
{
    /// Insert value into the set. Return false, without touching the
    /// set, if the value is already a member.
    pub fn insert(&mut self, value: T) -> bool {
        if self.index.contains_key(&value) {
            return false;
        }
        let below = (Bound::Unbounded, Bound::Excluded(&value));
        let handle = match self.index.range::<T, _>(below).next_back() {
            Some((_, &prev)) => {
                match self.seq.insert_adjacent(prev, value.clone(), Side::Greater) {
                    Ok(handle) => handle,
                    Err(err) => panic!("oset index out of sync: {} ? call the programmer", err),
                }
            }
            None => self.seq.insert_extremal(value.clone(), Side::Smaller),
        };
        self.index.insert(value, handle);
        true
    }

    /// Remove value from the set. Return false if the value was not a
    /// member.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index.remove(value) {
            Some(handle) => match self.seq.remove(handle) {
                Ok(_) => true,
                Err(err) => panic!("oset index out of sync: {} ? call the programmer", err),
            },
            None => false,
        }
    }

    /// Check whether value is a member of the set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(value)
    }

    /// Return the 0-based position of value in sorted order, None if
    /// the value is not a member.
    pub fn rank<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = *self.index.get(value)?;
        match self.seq.rank(handle) {
            Ok(rank) => Some(rank),
            Err(err) => panic!("oset index out of sync: {} ? call the programmer", err),
        }
    }

    /// Return the value at 0-based position `index` in sorted order,
    /// None past the end.
    pub fn select(&self, index: usize) -> Option<&T> {
        let handle = self.seq.select(index).ok()?;
        match self.seq.get(handle) {
            Ok(value) => Some(value),
            Err(err) => panic!("oset index out of sync: {} ? call the programmer", err),
        }
    }

    /// Validate the underlying tree and the value→handle index against
    /// each other.
    pub fn validate(&self) -> Result<()>
    where
        T: std::fmt::Debug,
    {
        self.seq.validate()?;
        if self.index.len() != self.seq.len() {
            return err_at!(Fatal, msg: "index {} != seq {}", self.index.len(), self.seq.len());
        }
        for (value, &handle) in self.index.iter() {
            if self.seq.get(handle)? != value {
                return err_at!(Fatal, msg: "index out of sync at {:?}", value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "oset_test.rs"]
mod oset_test;
