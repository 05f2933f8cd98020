//! Numeric element types a `RangeIndex` can aggregate.
//!
//! An element needs a total order (for the minimum), addition (for sums and
//! range adds), and a way to scale by a leaf count (a range assign of `v`
//! over `w` leaves contributes `w·v` to the sum).

use std::fmt::Debug;
use std::ops::Add;

/// A numeric value stored in a range index.
///
/// `MAX` doubles as the identity of `min` for padding leaves. Because pending
/// mutations are tracked as an explicit enum, no value of the type is reserved:
/// `MIN` and `MAX` are both legal data.
pub trait Element: Copy + Ord + Debug + Add<Output = Self> {
    /// Additive identity.
    const ZERO: Self;
    /// Greatest value; identity of `min`.
    const MAX: Self;

    /// `count` copies of `self` added together.
    ///
    /// Double-and-add, so no intermediate exceeds the final result: a count
    /// wider than the element type still works whenever the product fits.
    fn times(self, count: usize) -> Self {
        let mut total = Self::ZERO;
        let mut base = self;
        let mut count = count;
        loop {
            if count & 1 == 1 {
                total = total + base;
            }
            count >>= 1;
            if count == 0 {
                return total;
            }
            base = base + base;
        }
    }
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;
            }
        )*
    };
}

impl_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
