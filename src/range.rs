//! Half-open range normalization.
//!
//! Every public operation on a `RangeIndex` accepts any `RangeBounds<usize>`.
//! The bounds are clamped to `[0, len)` before the tree is touched, so a range
//! that runs past the end (or is inverted) simply covers fewer elements.

use std::fmt;
use std::ops::Bound;
use std::ops::Range;
use std::ops::RangeBounds;

/// A non-empty half-open interval `[start, end)` inside the data domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Clamp `bounds` to `[0, len)`. Returns `None` if nothing remains.
    pub fn clamp(bounds: impl RangeBounds<usize>, len: usize) -> Option<Span> {
        let (start, end) = resolve(&bounds, len);
        let end = end.min(len);
        if start >= end {
            return None;
        }
        return Some(Span { start, end });
    }

    /// Whether `[lo, hi)` shares no index with this span.
    #[inline(always)]
    pub fn disjoint(&self, lo: usize, hi: usize) -> bool {
        return lo >= self.end || hi <= self.start;
    }

    /// Whether `[lo, hi)` lies entirely inside this span.
    #[inline(always)]
    pub fn contains(&self, lo: usize, hi: usize) -> bool {
        return lo >= self.start && hi <= self.end;
    }
}

/// Resolve bounds into raw `(start, end)` without clamping to `len`.
/// An unbounded end resolves to `len`.
fn resolve(bounds: &impl RangeBounds<usize>, len: usize) -> (usize, usize) {
    let start = match bounds.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match bounds.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    return (start, end);
}

/// Error returned by strict range validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The range starts after it ends.
    Inverted { start: usize, end: usize },
    /// The range ends past the last element.
    OutOfBounds { end: usize, len: usize },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Inverted { start, end } => {
                write!(f, "range start {} is greater than end {}", start, end)
            }
            RangeError::OutOfBounds { end, len } => {
                write!(f, "range end {} is out of bounds for length {}", end, len)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Validate `bounds` against `len` without clamping.
pub(crate) fn check(bounds: impl RangeBounds<usize>, len: usize) -> Result<Range<usize>, RangeError> {
    let (start, end) = resolve(&bounds, len);
    if start > end {
        return Err(RangeError::Inverted { start, end });
    }
    if end > len {
        return Err(RangeError::OutOfBounds { end, len });
    }
    return Ok(start..end);
}
