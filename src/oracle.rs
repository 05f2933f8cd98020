//! Runs `naive` byte-script operations against a `RangeIndex`, so the fuzz
//! harness and the crash reproducer share one driver.

use naive::script::Op;
use naive::script::Outcome;

use crate::RangeIndex;

/// Run one script operation against the index and report what it returned.
pub fn run_op(op: &Op, index: &mut RangeIndex<i64>) -> Outcome {
    let range = op.range();
    return match *op {
        Op::Sum { .. } => Outcome::Sum(index.range_sum(range)),
        Op::Min { .. } => Outcome::Min(index.range_min(range)),
        Op::Add { delta, .. } => {
            index.range_add(range, delta as i64);
            Outcome::Done
        }
        Op::Assign { value, .. } => {
            index.range_assign(range, value as i64);
            Outcome::Done
        }
        Op::Search { threshold, .. } => {
            Outcome::Index(index.lower_bound_not_exceeding(range, threshold as i64))
        }
    };
}
