//! AFL Fuzz harness for RangeIndex
//!
//! Decodes the input into an initial sequence plus a script of range
//! operations, runs the script against both the tree and the linear-scan
//! model, and checks:
//! 1. Every query answer matches the model
//! 2. After every mutation, the materialized sequence matches the model

use afl::fuzz;
use lazyseg::RangeIndex;
use lazyseg::oracle::run_op;
use naive::NaiveArray;
use naive::script::Outcome;
use naive::script::Script;

fn main() {
    fuzz!(|data: &[u8]| {
        let script = Script::from_bytes(data);
        let mut index = RangeIndex::new(&script.initial);
        let mut model = NaiveArray::new(&script.initial);

        for (i, op) in script.ops.iter().enumerate() {
            let got = run_op(op, &mut index);
            let want = op.run_naive(&mut model);
            assert_eq!(got, want, "Op {} {:?} disagrees with the model", i, op);

            if want == Outcome::Done {
                assert_eq!(index.to_vec(), model.values(), "Sequence diverged after op {} {:?}", i, op);
            }
        }

        assert_eq!(index.len(), model.len(), "Length mismatch");
    });
}
