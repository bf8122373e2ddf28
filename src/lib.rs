//! Package implement an Order-statistic Sequence.
//!
//! Unlike an ordered-map, an [OSeq] instance does not compare values to
//! decide where they go. Callers pick the position explicitly, either at
//! one of the two ends or next to an element they already hold a [Handle]
//! for. Behind the scene the sequence is a red-black tree with parent
//! back-references and a cached subtree-size on every node, giving
//! O(log n) insertion, removal, [rank][OSeq::rank] and
//! [select][OSeq::select].
//!
//! Following types are implemented for specific use cases:
//!
//! * [OSeq] implements the core handle-addressed sequence.
//! * [OSet] implements a sorted-set with O(log n) rank queries, by pairing
//!   an [OSeq] with a value→handle index.
//! * [OList] implements an ordered-unique-list, caller-chosen order with
//!   O(log n) position lookup.
//!
//! Handle-addressed sequence for single threaded use case
//! ------------------------------------------------------
//!
//! - Each entry in OSeq instance correspond to one value and one [Handle].
//! - Parametrised over `value-type`.
//! - Insertion via insert_extremal(), insert_adjacent() api.
//! - Mutation via remove(), set() api, lookup via get().
//! - Order statistics via rank(), select() api.
//! - Full table scan, to iterate over all values in sequence order.
//! - Handles are invalidated when their node is removed, every later
//!   use of a stale handle fail with [Error::InvalidHandle].
//! - Uses ownership model and borrow semantics to ensure safety.
//! - Not thread safe.
//!
//! Constructing a new [OSeq] instance and sequence operations:
//!
//! ```
//! use oseq::{OSeq, Side};
//!
//! let mut index: OSeq<&str> = OSeq::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! let a = index.insert_extremal("a", Side::Greater);
//! let c = index.insert_extremal("c", Side::Greater);
//! let b = index.insert_adjacent(c, "b", Side::Smaller).unwrap();
//!
//! let values: Vec<&str> = index.iter().cloned().collect();
//! assert_eq!(values, vec!["a", "b", "c"]);
//!
//! assert_eq!(index.rank(b).unwrap(), 1);
//! assert_eq!(index.select(0).unwrap(), a);
//!
//! let old = index.remove(b).unwrap();
//! assert_eq!(old, "b");
//! assert!(index.get(b).is_err());
//! ```
//!
//! Sorted-set on top of the sequence:
//!
//! ```
//! use oseq::OSet;
//!
//! let mut index: OSet<u64> = OSet::new();
//! index.insert(30);
//! index.insert(10);
//! index.insert(20);
//!
//! assert_eq!(index.rank(&20), Some(1));
//! assert_eq!(index.select(2), Some(&30));
//! ```

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(InvalidHandle, msg: format!("stale handle"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, msg: format!("unbalanced blacks {}", n));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
}

mod family;
mod node;
mod olist;
mod oset;
mod seq;
mod slab;

pub use node::Side;
pub use olist::OList;
pub use oset::OSet;
pub use seq::{Iter, OSeq};
pub use slab::Handle;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    InvalidHandle(String, String),
    IndexOutOfBounds(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            InvalidHandle(p, msg) => write!(f, "{} InvalidHandle: {}", p, msg),
            IndexOutOfBounds(p, msg) => write!(f, "{} IndexOutOfBounds: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
