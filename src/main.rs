use lazyseg::AvlMap;
use lazyseg::RangeIndex;

fn main() {
    let mut index = RangeIndex::new(&[5i64, 3, 8, 1, 9, 2]);

    println!("sum[1, 4) = {}", index.range_sum(1..4));
    println!("min[1, 4) = {:?}", index.range_min(1..4));

    index.range_add(0..3, 10);
    println!("after add:    {:?}", index.to_vec());

    index.range_assign(2..5, 0);
    println!("after assign: {:?}", index.to_vec());
    println!("first <= 0:   {:?}", index.lower_bound_not_exceeding(.., 0));

    let map: AvlMap<i64, usize> = index
        .to_vec()
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();

    println!("{:#?}", map);
}
