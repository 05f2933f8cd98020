//! Byte scripts: a compact encoding of an initial sequence plus a list of
//! range operations, shared by the fuzz harness and the crash reproducer.
//!
//! Layout:
//! - byte 0: initial length (mod 65)
//! - next `len` bytes: initial values, each read as an `i8`
//! - then operations, each an opcode byte followed by its operands
//!
//! Range endpoints are raw bytes, so scripts routinely produce ranges that
//! run past the end or are inverted. Values are `i8`, which keeps sums far
//! from overflow.

use std::ops::Range;

use crate::NaiveArray;

const MAX_LEN: u8 = 64;

/// One range operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Sum { start: u8, end: u8 },
    Min { start: u8, end: u8 },
    Add { start: u8, end: u8, delta: i8 },
    Assign { start: u8, end: u8, value: i8 },
    Search { start: u8, end: u8, threshold: i8 },
}

/// What an operation reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sum(i64),
    Min(Option<i64>),
    Index(Option<usize>),
    Done,
}

impl Op {
    /// Decode one operation, returning it and the unread bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<(Op, &[u8])> {
        if bytes.len() < 3 {
            return None;
        }

        let op_type = bytes[0] % 5;
        let (start, end) = (bytes[1], bytes[2]);
        let rest = &bytes[3..];

        match op_type {
            0 => Some((Op::Sum { start, end }, rest)),
            1 => Some((Op::Min { start, end }, rest)),
            2 if !rest.is_empty() => Some((Op::Add { start, end, delta: rest[0] as i8 }, &rest[1..])),
            3 if !rest.is_empty() => Some((Op::Assign { start, end, value: rest[0] as i8 }, &rest[1..])),
            4 if !rest.is_empty() => Some((Op::Search { start, end, threshold: rest[0] as i8 }, &rest[1..])),
            _ => None,
        }
    }

    /// The half-open range this operation targets.
    pub fn range(&self) -> Range<usize> {
        let (start, end) = match *self {
            Op::Sum { start, end } => (start, end),
            Op::Min { start, end } => (start, end),
            Op::Add { start, end, .. } => (start, end),
            Op::Assign { start, end, .. } => (start, end),
            Op::Search { start, end, .. } => (start, end),
        };
        return start as usize..end as usize;
    }

    /// Run this operation against the reference model.
    pub fn run_naive(&self, array: &mut NaiveArray) -> Outcome {
        let range = self.range();
        return match *self {
            Op::Sum { .. } => Outcome::Sum(array.range_sum(range)),
            Op::Min { .. } => Outcome::Min(array.range_min(range)),
            Op::Add { delta, .. } => {
                array.range_add(range, delta as i64);
                Outcome::Done
            }
            Op::Assign { value, .. } => {
                array.range_assign(range, value as i64);
                Outcome::Done
            }
            Op::Search { threshold, .. } => {
                Outcome::Index(array.lower_bound_not_exceeding(range, threshold as i64))
            }
        };
    }
}

/// An initial sequence and the operations to run over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub initial: Vec<i64>,
    pub ops: Vec<Op>,
}

impl Script {
    /// Decode a whole script. Trailing bytes that do not form a complete
    /// operation are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Script {
        let Some((&header, body)) = bytes.split_first() else {
            return Script { initial: Vec::new(), ops: Vec::new() };
        };
        let len = ((header % (MAX_LEN + 1)) as usize).min(body.len());
        let initial = body[..len].iter().map(|&b| b as i8 as i64).collect();

        let mut ops = Vec::new();
        let mut remaining = &body[len..];
        while let Some((op, rest)) = Op::from_bytes(remaining) {
            ops.push(op);
            remaining = rest;
        }
        return Script { initial, ops };
    }
}
