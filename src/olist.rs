//! Module provide ordered-unique-list implemented by [OList] type.
//!
//! OList keeps unique values in caller-chosen order, like a list, while
//! a value→handle index makes position lookup and removal by value
//! O(log n) instead of O(n).

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use crate::{seq::Iter, Error, Handle, OSeq, Result, Side};

/// OList manage a list of unique values, in whatever order the caller
/// builds, with O(log n) position lookup, on top of [OSeq].
///
/// ```
/// use oseq::{OList, Side};
///
/// let mut index: OList<&str> = OList::new();
/// index.push("b", Side::Greater);
/// index.push("a", Side::Smaller);
/// index.push("c", Side::Greater);
/// index.insert_beside(&"b", "x", Side::Greater);
///
/// let values: Vec<&str> = index.iter().cloned().collect();
/// assert_eq!(values, vec!["a", "b", "x", "c"]);
/// assert_eq!(index.index_of(&"x"), Some(2));
/// ```
pub struct OList<T> {
    index: HashMap<T, Handle>,
    seq: OSeq<T>,
}

impl<T> OList<T> {
    /// Create an empty instance of OList.
    pub fn new() -> OList<T> {
        OList {
            index: HashMap::new(),
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

    /// Return an iterator over all values in list order.
    pub fn iter(&self) -> Iter<T> {
        self.seq.iter()
    }
}

impl<T> OList<T>
where
    T: Hash + Eq + Clone,
{
    /// Append value at the front (`Side::Smaller`) or back
    /// (`Side::Greater`) of the list. Return false, without touching
    /// the list, if the value is already present.
    pub fn push(&mut self, value: T, side: Side) -> bool {
        if self.index.contains_key(&value) {
            return false;
        }
        let handle = self.seq.insert_extremal(value.clone(), side);
        self.index.insert(value, handle);
        true
    }

    /// Insert value immediately before or after `anchor`. Return false
    /// if `anchor` is not in the list or value already is.
    pub fn insert_beside<Q>(&mut self, anchor: &Q, value: T, side: Side) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.index.contains_key::<T>(&value) {
            return false;
        }
        let at = match self.index.get(anchor) {
            Some(&at) => at,
            None => return false,
        };
        let handle = match self.seq.insert_adjacent(at, value.clone(), side) {
            Ok(handle) => handle,
            Err(err) => panic!("olist index out of sync: {} ? call the programmer", err),
        };
        self.index.insert(value, handle);
        true
    }

    /// Remove value from the list. Return false if it was not present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(value) {
            Some(handle) => match self.seq.remove(handle) {
                Ok(_) => true,
                Err(err) => panic!("olist index out of sync: {} ? call the programmer", err),
            },
            None => false,
        }
    }

    /// Check whether value is in the list.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(value)
    }

    /// Return the 0-based position of value in the list, None if the
    /// value is not present.
    pub fn index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(value)?;
        match self.seq.rank(handle) {
            Ok(rank) => Some(rank),
            Err(err) => panic!("olist index out of sync: {} ? call the programmer", err),
        }
    }

    /// Return the value at 0-based position `index`, None past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        let handle = self.seq.select(index).ok()?;
        match self.seq.get(handle) {
            Ok(value) => Some(value),
            Err(err) => panic!("olist index out of sync: {} ? call the programmer", err),
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
#[path = "olist_test.rs"]
mod olist_test;
