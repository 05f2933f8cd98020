//! Tests for the range index API: construction, range queries, the two
//! mutation kinds and the leftmost search.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use lazyseg::RangeError;
use lazyseg::RangeIndex;
use naive::NaiveArray;

// =============================================================================
// Helper functions
// =============================================================================

fn sample() -> RangeIndex<i64> {
    return RangeIndex::new(&[5, 3, 8, 1, 9, 2]);
}

fn random_range(rng: &mut StdRng, len: usize) -> (usize, usize) {
    let a = rng.gen_range(0..=len);
    let b = rng.gen_range(0..=len);
    return (a.min(b), a.max(b));
}

// =============================================================================
// Worked scenario
// =============================================================================

#[test]
fn scenario_step_by_step() {
    let mut index = sample();
    assert_eq!(index.capacity(), 8);

    assert_eq!(index.range_sum(1..4), 12);
    assert_eq!(index.range_min(1..4), Some(1));

    index.range_add(0..3, 10);
    assert_eq!(index.to_vec(), vec![15, 13, 18, 1, 9, 2]);
    assert_eq!(index.range_sum(0..3), 46);

    index.range_assign(2..5, 0);
    assert_eq!(index.to_vec(), vec![15, 13, 0, 0, 0, 2]);
    assert_eq!(index.range_min(0..6), Some(0));
    assert_eq!(index.lower_bound_not_exceeding(0..6, 0), Some(2));
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn build_matches_totals() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in [1usize, 2, 3, 7, 8, 9, 31, 100] {
        let data: Vec<i64> = (0..len).map(|_| rng.gen_range(-1000..1000)).collect();
        let mut index = RangeIndex::new(&data);
        assert_eq!(index.range_sum(0..len), data.iter().sum::<i64>());
        assert_eq!(index.range_min(0..len), data.iter().copied().min());
        assert_eq!(index.capacity(), len.next_power_of_two());
    }
}

#[test]
fn build_from_vec_and_iter() {
    let mut a = RangeIndex::from(vec![1i64, 2, 3]);
    let mut b: RangeIndex<i64> = (1..=3).collect();
    assert_eq!(a.to_vec(), b.to_vec());
}

#[test]
fn empty_index_answers_identity() {
    let mut index: RangeIndex<i64> = RangeIndex::new(&[]);
    assert_eq!(index.len(), 0);
    assert_eq!(index.range_sum(0..0), 0);
    assert_eq!(index.range_sum(0..10), 0);
    assert_eq!(index.range_min(..), None);
    assert_eq!(index.lower_bound_not_exceeding(.., 0), None);
}

// =============================================================================
// Range add / range assign
// =============================================================================

#[test]
fn add_shifts_sum_linearly() {
    let mut index = sample();
    let before_inside = index.range_sum(1..5);
    let before_left = index.range_sum(0..1);
    let before_right = index.range_sum(5..6);

    index.range_add(1..5, 7);

    assert_eq!(index.range_sum(1..5), before_inside + 7 * 4);
    assert_eq!(index.range_sum(0..1), before_left);
    assert_eq!(index.range_sum(5..6), before_right);
}

#[test]
fn assign_is_idempotent() {
    let mut once = sample();
    once.range_assign(1..5, 4);

    let mut twice = sample();
    twice.range_assign(1..5, 4);
    twice.range_assign(1..5, 4);

    assert_eq!(once.to_vec(), twice.to_vec());
    assert_eq!(twice.range_min(1..5), Some(4));
    assert_eq!(twice.range_sum(1..5), 16);
}

#[test]
fn assign_then_add() {
    let mut index = sample();
    index.range_assign(0..6, 5);
    index.range_add(0..6, 3);
    assert_eq!(index.range_min(0..6), Some(8));
    assert_eq!(index.range_sum(0..6), 48);
}

#[test]
fn add_then_assign() {
    let mut index = sample();
    index.range_add(0..6, 3);
    index.range_assign(0..6, 5);
    assert_eq!(index.range_min(0..6), Some(5));
    assert_eq!(index.range_sum(0..6), 30);
}

#[test]
fn overlapping_mutations_compose() {
    let mut index = RangeIndex::new(&[0i64; 10]);
    index.range_assign(0..8, 2);
    index.range_add(4..10, 1);
    index.range_assign(6..7, -3);
    index.range_add(0..10, 10);
    assert_eq!(index.to_vec(), vec![12, 12, 12, 12, 13, 13, 7, 13, 11, 11]);
}

#[test]
fn mutations_below_pending_ancestors() {
    // A deep point write under a pending assign must see the assign first.
    let mut index = RangeIndex::new(&[1i64; 16]);
    index.range_assign(0..16, 4);
    index.set(9, -1);
    index.range_add(8..16, 2);
    assert_eq!(index.get(9), Some(1));
    assert_eq!(index.get(8), Some(6));
    assert_eq!(index.range_sum(..), 4 * 8 + 6 * 7 + 1);
}

// =============================================================================
// Leftmost search
// =============================================================================

#[test]
fn search_finds_leftmost() {
    let mut index = RangeIndex::new(&[7i64, 2, 9, 2, 5, 1]);
    assert_eq!(index.lower_bound_not_exceeding(.., 2), Some(1));
    assert_eq!(index.lower_bound_not_exceeding(2.., 2), Some(3));
    assert_eq!(index.lower_bound_not_exceeding(4.., 4), Some(5));
    assert_eq!(index.lower_bound_not_exceeding(.., 0), None);
    assert_eq!(index.lower_bound_not_exceeding(2..3, 8), None);
}

#[test]
fn search_sees_pending_mutations() {
    let mut index = RangeIndex::new(&[10i64; 12]);
    index.range_add(3..9, -6);
    assert_eq!(index.lower_bound_not_exceeding(.., 4), Some(3));
    index.range_assign(0..5, 20);
    assert_eq!(index.lower_bound_not_exceeding(.., 4), Some(5));
}

// =============================================================================
// Out-of-domain ranges
// =============================================================================

#[test]
fn padding_isolation() {
    let mut index = sample();
    index.range_add(0..8, 100);
    index.range_assign(5..8, -50);
    index.range_add(6..1000, 1);
    assert_eq!(index.to_vec(), vec![105, 103, 108, 101, 109, -50]);
    assert_eq!(index.range_sum(0..6), 105 + 103 + 108 + 101 + 109 - 50);
    assert_eq!(index.range_min(6..8), None);
    assert_eq!(index.lower_bound_not_exceeding(0..8, i64::MAX), Some(0));
    assert_eq!(index.lower_bound_not_exceeding(6..8, i64::MAX), None);
}

#[test]
fn inverted_ranges_touch_nothing() {
    let mut index = sample();
    #[allow(clippy::reversed_empty_ranges)]
    let inverted = 4..2;
    index.range_add(inverted.clone(), 100);
    assert_eq!(index.range_sum(inverted.clone()), 0);
    assert_eq!(index.range_min(inverted.clone()), None);
    assert_eq!(index.to_vec(), vec![5, 3, 8, 1, 9, 2]);
    assert_eq!(index.check_range(inverted), Err(RangeError::Inverted { start: 4, end: 2 }));
}

#[test]
fn check_range_is_strict() {
    let index = sample();
    assert_eq!(index.check_range(..), Ok(0..6));
    assert_eq!(index.check_range(2..=5), Ok(2..6));
    let err = index.check_range(0..7).unwrap_err();
    assert_eq!(err, RangeError::OutOfBounds { end: 7, len: 6 });
    assert_eq!(err.to_string(), "range end 7 is out of bounds for length 6");
}

// =============================================================================
// Narrow element types
// =============================================================================

#[test]
fn i8_add_across_more_leaves_than_i8_can_count() {
    let mut index = RangeIndex::new(&[0i8; 128]);
    index.range_add(.., -1);
    assert_eq!(index.range_sum(..), i8::MIN);
    assert_eq!(index.range_sum(0..64), -64);
    assert_eq!(index.range_min(..), Some(-1));
    assert_eq!(index.to_vec(), vec![-1i8; 128]);

    index.range_add(1.., 1);
    assert_eq!(index.range_sum(..), -1);
    assert_eq!(index.lower_bound_not_exceeding(.., -1), Some(0));
    assert_eq!(index.lower_bound_not_exceeding(1.., -1), None);
}

#[test]
fn i8_assign_across_full_width() {
    let mut index = RangeIndex::new(&[0i8; 128]);
    index.range_assign(..64, 1);
    assert_eq!(index.range_sum(..), 64);
    index.range_assign(.., -1);
    assert_eq!(index.range_sum(..), i8::MIN);
    index.range_assign(..64, 1);
    assert_eq!(index.range_sum(..), 0);
}

#[test]
fn i16_assign_across_more_leaves_than_i16_can_count() {
    let mut index = RangeIndex::new(&vec![0i16; 32768]);
    index.range_assign(.., -1);
    assert_eq!(index.range_sum(..), i16::MIN);
    assert_eq!(index.range_min(..), Some(-1));
    assert_eq!(index.lower_bound_not_exceeding(.., -1), Some(0));

    index.range_add(16384.., 1);
    assert_eq!(index.range_sum(..), -16384);
    assert_eq!(index.lower_bound_not_exceeding(16384.., -1), None);
}

#[test]
fn u8_sum_up_to_max() {
    let mut index = RangeIndex::new(&[0u8; 255]);
    index.range_assign(.., 1);
    assert_eq!(index.capacity(), 256);
    assert_eq!(index.range_sum(..), u8::MAX);
    assert_eq!(index.range_sum(..128), 128);
}

// =============================================================================
// Randomized cross-check
// =============================================================================

#[test]
fn random_ops_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for len in [1usize, 5, 16, 33, 200] {
        let data: Vec<i64> = (0..len).map(|_| rng.gen_range(-50..50)).collect();
        let mut index = RangeIndex::new(&data);
        let mut model = NaiveArray::new(&data);

        for _ in 0..500 {
            let (l, r) = random_range(&mut rng, len);
            let x = rng.gen_range(-50..50);
            match rng.gen_range(0..5) {
                0 => assert_eq!(index.range_sum(l..r), model.range_sum(l..r)),
                1 => assert_eq!(index.range_min(l..r), model.range_min(l..r)),
                2 => {
                    index.range_add(l..r, x);
                    model.range_add(l..r, x);
                }
                3 => {
                    index.range_assign(l..r, x);
                    model.range_assign(l..r, x);
                }
                _ => assert_eq!(
                    index.lower_bound_not_exceeding(l..r, x),
                    model.lower_bound_not_exceeding(l..r, x)
                ),
            }
        }
        assert_eq!(index.to_vec(), model.values());
    }
}

#[test]
fn large_index_stays_logarithmic_in_shape() {
    let len = 100_000;
    let mut index = RangeIndex::new(&vec![1i64; len]);
    index.range_add(10..len - 10, 2);
    index.range_assign(50_000..50_001, -5);
    assert_eq!(index.range_sum(..), 20 + 3 * (len as i64 - 21) - 5);
    assert_eq!(index.range_min(..), Some(-5));
    assert_eq!(index.lower_bound_not_exceeding(.., 0), Some(50_000));
    assert_eq!(index.capacity(), 131_072);
}
