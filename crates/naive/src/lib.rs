//! Linear-scan reference models for differential testing.
//!
//! Every operation here is the obvious O(n) loop over a `Vec`. The models
//! are slow on purpose: they are the oracle that the tree-based structures
//! are checked against by the property tests, the fuzz harness and the
//! crash reproducer.
//!
//! # Contents
//!
//! - `NaiveArray`: a plain `Vec<i64>` with the range-index operations
//! - `script`: decodes raw bytes into a sequence of range operations

pub mod script;

use std::ops::Range;

/// A sequence of numbers with range operations done by scanning.
///
/// Ranges follow the same rules as the real index: half-open, clamped to
/// `[0, len)`, and an empty or inverted range touches nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NaiveArray {
    values: Vec<i64>,
}

impl NaiveArray {
    pub fn new(values: &[i64]) -> NaiveArray {
        return NaiveArray {
            values: values.to_vec(),
        };
    }

    pub fn len(&self) -> usize {
        return self.values.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.values.is_empty();
    }

    pub fn values(&self) -> &[i64] {
        return &self.values;
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.values.len());
        let start = range.start.min(end);
        return start..end;
    }

    pub fn range_sum(&self, range: Range<usize>) -> i64 {
        return self.values[self.clamp(range)].iter().sum();
    }

    pub fn range_min(&self, range: Range<usize>) -> Option<i64> {
        return self.values[self.clamp(range)].iter().copied().min();
    }

    pub fn range_add(&mut self, range: Range<usize>, delta: i64) {
        let range = self.clamp(range);
        for value in &mut self.values[range] {
            *value += delta;
        }
    }

    pub fn range_assign(&mut self, range: Range<usize>, value: i64) {
        let range = self.clamp(range);
        for slot in &mut self.values[range] {
            *slot = value;
        }
    }

    pub fn lower_bound_not_exceeding(&self, range: Range<usize>, threshold: i64) -> Option<usize> {
        let range = self.clamp(range);
        let start = range.start;
        return self.values[range]
            .iter()
            .position(|&value| value <= threshold)
            .map(|offset| start + offset);
    }
}
