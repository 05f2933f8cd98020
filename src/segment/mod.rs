//! Lazy-propagation segment tree.
//!
//! A `RangeIndex` is a complete binary tree over a fixed-length sequence,
//! stored in one `Vec` and addressed implicitly: the root is slot 1, the
//! children of slot `i` are `2i` and `2i + 1`, and leaves occupy
//! `size..2·size` where `size` is the input length rounded up to a power of
//! two. Each node keeps the sum and minimum of its covered range and at most
//! one pending range mutation (add or assign).
//!
//! Operations (`n` = input length):
//! - range_sum / range_min: O(log n)
//! - range_add / range_assign: O(log n)
//! - lower_bound_not_exceeding: O(log n)
//!
//! Every descent discharges a node's pending mutation before looking past it,
//! so a node's minimum is always exact by the time the search compares it
//! against a threshold.
//!
//! Ranges are half-open and clamped to `[0, len)`. Padding leaves past `len`
//! are never written, and a range that covers no data yields the identity
//! (`0` for sums, `None` for minimums and searches).

mod node;

use std::ops::Range;
use std::ops::RangeBounds;

use node::Aggregate;
use node::Node;
use node::Pending;

use crate::element::Element;
use crate::range;
use crate::range::RangeError;
use crate::range::Span;

/// Debug builds audit the whole tree after each mutation up to this many
/// slots.
#[cfg(debug_assertions)]
const AUDIT_LIMIT: usize = 1 << 12;

const ROOT: usize = 1;

/// An array of numbers with logarithmic range sums, minimums, adds and
/// assigns.
///
/// Queries take `&mut self` because they discharge pending mutations on the
/// way down.
///
/// ```
/// use lazyseg::RangeIndex;
///
/// let mut index = RangeIndex::new(&[5i64, 3, 8, 1, 9, 2]);
/// assert_eq!(index.range_sum(1..4), 12);
/// index.range_add(0..3, 10);
/// index.range_assign(2..5, 0);
/// assert_eq!(index.to_vec(), vec![15, 13, 0, 0, 0, 2]);
/// assert_eq!(index.lower_bound_not_exceeding(.., 0), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct RangeIndex<K> {
    /// Slot 0 is unused.
    nodes: Vec<Node<K>>,
    /// Number of leaves, a power of two.
    size: usize,
    /// Number of real (non-padding) leaves.
    len: usize,
}

impl<K: Element> RangeIndex<K> {
    /// Build an index over `data`.
    pub fn new(data: &[K]) -> RangeIndex<K> {
        let size = data.len().next_power_of_two();
        let mut nodes = vec![Node::EMPTY; 2 * size];
        for (i, &value) in data.iter().enumerate() {
            nodes[size + i].agg = Aggregate::leaf(value);
        }
        for i in (ROOT..size).rev() {
            nodes[i].agg = nodes[2 * i].agg.join(&nodes[2 * i + 1].agg);
        }
        return RangeIndex {
            nodes,
            size,
            len: data.len(),
        };
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        return self.len;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Number of leaves including padding.
    #[inline]
    pub fn capacity(&self) -> usize {
        return self.size;
    }

    /// Validate `bounds` strictly: no inverted ranges and nothing past `len`.
    ///
    /// The range operations themselves clamp instead of failing; use this when
    /// an out-of-domain range should be reported to the caller.
    pub fn check_range(&self, bounds: impl RangeBounds<usize>) -> Result<Range<usize>, RangeError> {
        return range::check(bounds, self.len);
    }

    /// Sum of the elements in `bounds`.
    pub fn range_sum(&mut self, bounds: impl RangeBounds<usize>) -> K {
        return match Span::clamp(bounds, self.len) {
            Some(span) => self.query(ROOT, 0, self.size, span).sum,
            None => K::ZERO,
        };
    }

    /// Minimum of the elements in `bounds`, or `None` if the range is empty.
    pub fn range_min(&mut self, bounds: impl RangeBounds<usize>) -> Option<K> {
        let span = Span::clamp(bounds, self.len)?;
        return Some(self.query(ROOT, 0, self.size, span).min);
    }

    /// Add `delta` to every element in `bounds`.
    pub fn range_add(&mut self, bounds: impl RangeBounds<usize>, delta: K) {
        if let Some(span) = Span::clamp(bounds, self.len) {
            self.update(ROOT, 0, self.size, span, Pending::Add(delta));
            self.check_invariants();
        }
    }

    /// Set every element in `bounds` to `value`.
    pub fn range_assign(&mut self, bounds: impl RangeBounds<usize>, value: K) {
        if let Some(span) = Span::clamp(bounds, self.len) {
            self.update(ROOT, 0, self.size, span, Pending::Assign(value));
            self.check_invariants();
        }
    }

    /// Index of the leftmost element in `bounds` that is `<= threshold`.
    pub fn lower_bound_not_exceeding(&mut self, bounds: impl RangeBounds<usize>, threshold: K) -> Option<usize> {
        let span = Span::clamp(bounds, self.len)?;
        return self.search(ROOT, 0, self.size, span, threshold);
    }

    /// The element at `index`.
    pub fn get(&mut self, index: usize) -> Option<K> {
        if index >= self.len {
            return None;
        }
        return self.range_min(index..index + 1);
    }

    /// Overwrite the element at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: K) {
        if index < self.len {
            self.range_assign(index..index + 1, value);
        }
    }

    /// The current sequence, with every pending mutation flushed to the
    /// leaves.
    pub fn to_vec(&mut self) -> Vec<K> {
        self.flush(ROOT, 0, self.size);
        return self.nodes[self.size..self.size + self.len]
            .iter()
            .map(|leaf| leaf.agg.sum)
            .collect();
    }

    // --- Descent ---

    #[inline(always)]
    fn is_leaf(&self, node: usize) -> bool {
        return node >= self.size;
    }

    /// Apply the node's pending mutation to its own aggregate and hand it to
    /// its children.
    #[inline]
    fn discharge(&mut self, node: usize, width: usize) {
        let pending = self.nodes[node].pending;
        if pending.is_none() {
            return;
        }
        self.nodes[node].agg = pending.apply(self.nodes[node].agg, width);
        if !self.is_leaf(node) {
            for child in [2 * node, 2 * node + 1] {
                let slot = &mut self.nodes[child].pending;
                *slot = slot.then(pending);
            }
        }
        self.nodes[node].pending = Pending::None;
    }

    fn query(&mut self, node: usize, lo: usize, hi: usize, span: Span) -> Aggregate<K> {
        self.discharge(node, hi - lo);

        if span.disjoint(lo, hi) {
            return Aggregate::EMPTY;
        }
        if span.contains(lo, hi) {
            return self.nodes[node].agg;
        }

        let mid = (lo + hi) / 2;
        let left = self.query(2 * node, lo, mid, span);
        let right = self.query(2 * node + 1, mid, hi, span);
        return left.join(&right);
    }

    fn update(&mut self, node: usize, lo: usize, hi: usize, span: Span, mutation: Pending<K>) {
        self.discharge(node, hi - lo);

        if span.disjoint(lo, hi) {
            return;
        }
        if span.contains(lo, hi) {
            // Staging on an already-discharged node and discharging again
            // updates this aggregate now and leaves the children pending.
            self.nodes[node].pending = mutation;
            self.discharge(node, hi - lo);
            return;
        }

        let mid = (lo + hi) / 2;
        self.update(2 * node, lo, mid, span, mutation);
        self.update(2 * node + 1, mid, hi, span, mutation);
        self.nodes[node].agg = self.nodes[2 * node].agg.join(&self.nodes[2 * node + 1].agg);
    }

    fn search(&mut self, node: usize, lo: usize, hi: usize, span: Span, threshold: K) -> Option<usize> {
        self.discharge(node, hi - lo);

        if span.disjoint(lo, hi) {
            return None;
        }
        // The minimum is exact here, so nothing below can qualify.
        if self.nodes[node].agg.min > threshold {
            return None;
        }
        if self.is_leaf(node) {
            return Some(lo);
        }

        let mid = (lo + hi) / 2;
        if let Some(found) = self.search(2 * node, lo, mid, span, threshold) {
            return Some(found);
        }
        return self.search(2 * node + 1, mid, hi, span, threshold);
    }

    fn flush(&mut self, node: usize, lo: usize, hi: usize) {
        self.discharge(node, hi - lo);
        if self.is_leaf(node) {
            return;
        }
        let mid = (lo + hi) / 2;
        self.flush(2 * node, lo, mid);
        self.flush(2 * node + 1, mid, hi);
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        if self.nodes.len() > AUDIT_LIMIT {
            return;
        }

        // Padding leaves are never touched.
        for leaf in &self.nodes[self.size + self.len..] {
            assert!(
                leaf.pending.is_none() && leaf.agg == Aggregate::EMPTY,
                "INVARIANT VIOLATED: padding leaf modified: {:?}",
                leaf
            );
        }

        self.audit(ROOT, self.size);
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}

    /// Effective aggregate of the subtree at `node`, asserting along the way
    /// that every internal node's stored aggregate matches its children.
    #[cfg(debug_assertions)]
    fn audit(&self, node: usize, width: usize) -> Aggregate<K> {
        let current = &self.nodes[node];
        if !self.is_leaf(node) {
            let left = self.audit(2 * node, width / 2);
            let right = self.audit(2 * node + 1, width / 2);
            let joined = left.join(&right);
            assert_eq!(
                current.agg, joined,
                "INVARIANT VIOLATED: node {} stores {:?} but children join to {:?}",
                node, current.agg, joined
            );
        }
        return current.effective(width);
    }
}

impl<K: Element> From<Vec<K>> for RangeIndex<K> {
    fn from(data: Vec<K>) -> Self {
        return RangeIndex::new(&data);
    }
}

impl<K: Element> FromIterator<K> for RangeIndex<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let data: Vec<K> = iter.into_iter().collect();
        return RangeIndex::new(&data);
    }
}
