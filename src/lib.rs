//! lazyseg - Range-aggregate indexes for in-memory sequences.
//!
//! # Quick Start
//!
//! ```
//! use lazyseg::RangeIndex;
//!
//! // Build an index over a fixed sequence
//! let mut index = RangeIndex::new(&[5i64, 3, 8, 1, 9, 2]);
//!
//! // Query and mutate ranges
//! assert_eq!(index.range_min(1..4), Some(1));
//! index.range_add(0..3, 10);
//! assert_eq!(index.range_sum(0..3), 46);
//! ```
//!
//! # Contents
//!
//! - `RangeIndex`: lazy-propagation segment tree with range sum, range min,
//!   range add, range assign and a leftmost-at-most search
//! - `AvlMap`: ordered map with inclusive predecessor/successor lookups
//! - `Element`: the numeric trait a `RangeIndex` is generic over
//! - `RangeError`: returned by strict range validation

pub mod avl;
pub mod element;
#[cfg(feature = "oracle")]
pub mod oracle;
pub mod range;
pub mod segment;

pub use avl::AvlMap;
pub use element::Element;
pub use range::RangeError;
pub use segment::RangeIndex;
