//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --features oracle --bin repro_crash -- <crash_file>

use std::fs;

use lazyseg::RangeIndex;
use lazyseg::oracle::run_op;
use naive::NaiveArray;
use naive::script::Outcome;
use naive::script::Script;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }
    let data = fs::read(&args[1]).expect("Failed to read file");

    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let script = Script::from_bytes(&data);
    eprintln!("Initial: len={} {:?}", script.initial.len(), script.initial);

    let mut index = RangeIndex::new(&script.initial);
    let mut model = NaiveArray::new(&script.initial);

    for (i, op) in script.ops.iter().enumerate() {
        eprintln!("Op {}: {:?} on {:?}", i + 1, op, op.range());

        let got = run_op(op, &mut index);
        let want = op.run_naive(&mut model);
        if got != want {
            eprintln!("  MISMATCH: tree={:?} model={:?}", got, want);
            eprintln!("  Model: {:?}", model.values());
            eprintln!("  Tree:  {:?}", index.to_vec());
            std::process::exit(1);
        }

        match want {
            Outcome::Done => {
                let tree = index.to_vec();
                eprintln!("  After: {:?}", tree);
                if tree != model.values() {
                    eprintln!("  DIVERGED: model={:?}", model.values());
                    std::process::exit(1);
                }
            }
            answer => eprintln!("  Answer: {:?}", answer),
        }
    }

    eprintln!("\nAll checks passed!");
}
