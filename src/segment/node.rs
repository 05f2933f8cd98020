//! Per-node records of the range index: the aggregate and the pending
//! mutation.

use crate::element::Element;

/// Sum and minimum over a node's covered leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aggregate<K> {
    pub sum: K,
    pub min: K,
}

impl<K: Element> Aggregate<K> {
    /// Aggregate of no leaves.
    pub const EMPTY: Aggregate<K> = Aggregate { sum: K::ZERO, min: K::MAX };

    /// Aggregate of a single leaf.
    #[inline(always)]
    pub fn leaf(value: K) -> Aggregate<K> {
        return Aggregate { sum: value, min: value };
    }

    /// Combine two adjacent ranges.
    #[inline(always)]
    pub fn join(&self, other: &Self) -> Self {
        return Aggregate {
            sum: self.sum + other.sum,
            min: self.min.min(other.min),
        };
    }
}

/// A range mutation that has been accepted by a node but not yet applied to
/// its aggregate or handed to its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pending<K> {
    None,
    /// Shift every covered value by the delta.
    Add(K),
    /// Overwrite every covered value.
    Assign(K),
}

impl<K: Element> Pending<K> {
    /// The single mutation equivalent to applying `self`, then `later`.
    #[inline]
    pub fn then(self, later: Pending<K>) -> Pending<K> {
        return match (self, later) {
            (earlier, Pending::None) => earlier,
            (_, Pending::Assign(value)) => Pending::Assign(value),
            (Pending::None, Pending::Add(delta)) => Pending::Add(delta),
            (Pending::Add(a), Pending::Add(b)) => Pending::Add(a + b),
            // The add lands on top of the assigned value.
            (Pending::Assign(value), Pending::Add(delta)) => Pending::Assign(value + delta),
        };
    }

    /// Apply this mutation to the aggregate of `width` leaves.
    #[inline]
    pub fn apply(self, agg: Aggregate<K>, width: usize) -> Aggregate<K> {
        return match self {
            Pending::None => agg,
            Pending::Add(delta) => Aggregate {
                sum: agg.sum + delta.times(width),
                min: agg.min + delta,
            },
            Pending::Assign(value) => Aggregate {
                sum: value.times(width),
                min: value,
            },
        };
    }

    #[inline(always)]
    pub fn is_none(&self) -> bool {
        return matches!(self, Pending::None);
    }
}

/// One slot of the tree array.
#[derive(Clone, Copy, Debug)]
pub struct Node<K> {
    /// Aggregate of the covered range, not counting `pending`.
    pub agg: Aggregate<K>,
    pub pending: Pending<K>,
}

impl<K: Element> Node<K> {
    pub const EMPTY: Node<K> = Node {
        agg: Aggregate::<K>::EMPTY,
        pending: Pending::None,
    };

    /// The aggregate this node reports once `pending` is applied.
    #[inline]
    pub fn effective(&self, width: usize) -> Aggregate<K> {
        return self.pending.apply(self.agg, width);
    }
}
