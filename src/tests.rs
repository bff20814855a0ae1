use std::{fmt, ops::Range, rc::Rc};

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{model, AvlTreeList, Error};

fn assert_matches<V: PartialEq + fmt::Debug>(list: &AvlTreeList<V>, expected: &[V]) {
    list.assert_invariants();
    assert_eq!(list.len(), expected.len());
    assert!(
        list.iter().eq(expected.iter()),
        "{list:?} != {expected:?}"
    );
    assert_eq!(list.first(), expected.first());
    assert_eq!(list.last(), expected.last());

    for (i, value) in expected.iter().enumerate() {
        assert_eq!(list.retrieve(i), Some(value));
    }
    assert_eq!(list.retrieve(expected.len()), None);
}

fn pushed(range: Range<u32>) -> AvlTreeList<u32> {
    let mut list = AvlTreeList::new();
    for value in range {
        list.push_back(value);
    }
    list
}

// Calls `f` with every sequence of `n` insertion positions valid for a list growing from empty.
fn for_each_position_sequence(n: usize, f: &mut impl FnMut(&[usize])) {
    fn go(seq: &mut Vec<usize>, n: usize, f: &mut impl FnMut(&[usize])) {
        if seq.len() == n {
            f(seq);
            return;
        }

        for pos in 0..=seq.len() {
            seq.push(pos);
            go(seq, n, f);
            seq.pop();
        }
    }

    go(&mut Vec::with_capacity(n), n, f);
}

fn insert_all(positions: &[usize]) {
    let mut list = AvlTreeList::new();
    let mut vec = Vec::new();

    for (value, &pos) in positions.iter().enumerate() {
        list.insert(pos, value);
        vec.insert(pos, value);
        assert_matches(&list, &vec);
    }
}

#[test]
fn zero_elems_insert() {
    for_each_position_sequence(0, &mut |seq| insert_all(seq));
}

#[test]
fn one_to_six_elems_insert() {
    for n in 1..=6 {
        for_each_position_sequence(n, &mut |seq| insert_all(seq));
    }
}

fn insert_delete_all(n: u32, delete_positions: &[usize]) {
    let mut list = pushed(0..n);
    let mut vec: Vec<u32> = (0..n).collect();

    for &pos in delete_positions {
        assert!(list.delete(pos).is_ok());
        vec.remove(pos);
        assert_matches(&list, &vec);
    }

    assert!(list.is_empty());
    assert_eq!(list.delete(0), Err(Error::Empty));
}

// Calls `insert_delete_all` with every sequence of deletion positions that empties a list of `n`
// elements.
fn delete_in_every_order_of(n: u32) {
    fn go(remaining: usize, seq: &mut Vec<usize>, n: u32) {
        if remaining == 0 {
            insert_delete_all(n, seq);
            return;
        }

        for pos in 0..remaining {
            seq.push(pos);
            go(remaining - 1, seq, n);
            seq.pop();
        }
    }

    go(n as usize, &mut Vec::new(), n);
}

#[test]
fn remove_one() {
    delete_in_every_order_of(1);
}

#[test]
fn remove_two_to_six() {
    for n in 2..=6 {
        delete_in_every_order_of(n);
    }
}

#[test]
fn insert_then_delete_restores_sequence() {
    let original: Vec<u32> = (0..40).collect();

    for i in 0..=original.len() {
        let mut list = pushed(0..40);
        list.insert(i, 1000);
        assert_eq!(list.retrieve(i), Some(&1000));

        list.delete(i).unwrap();
        assert_matches(&list, &original);
    }
}

#[test]
fn insert_concat_delete_sequence() {
    let mut list = AvlTreeList::new();
    list.insert(0, "a");
    list.insert(1, "b");
    list.insert(2, "c");
    assert_eq!(list.to_vec(), ["a", "b", "c"]);

    list.delete(1).unwrap();
    assert_eq!(list.to_vec(), ["a", "c"]);

    let mut left: AvlTreeList<_> = ["a"].into_iter().collect();
    let right: AvlTreeList<_> = ["b", "c"].into_iter().collect();
    assert_eq!(left.concat(right), 1);
    assert_matches(&left, &["a", "b", "c"]);
}

#[test]
fn insert_rotation_counts() {
    let mut list = AvlTreeList::new();
    assert_eq!(list.push_back(1), 0);
    assert_eq!(list.push_back(2), 0);
    assert_eq!(list.push_back(3), 1);
    assert_matches(&list, &[1, 2, 3]);

    // Right-left case.
    let mut list = AvlTreeList::new();
    assert_eq!(list.push_back('a'), 0);
    assert_eq!(list.push_back('b'), 0);
    assert_eq!(list.insert(1, 'c'), 2);
    assert_matches(&list, &['a', 'c', 'b']);

    // Left-right case.
    let mut list = AvlTreeList::new();
    assert_eq!(list.push_back('a'), 0);
    assert_eq!(list.push_front('b'), 0);
    assert_eq!(list.insert(1, 'c'), 2);
    assert_matches(&list, &['b', 'c', 'a']);
}

#[test]
fn delete_rotation_counts() {
    let mut list = pushed(0..4);
    assert_eq!(list.delete(0), Ok(1));
    assert_matches(&list, &[1, 2, 3]);

    let mut single = pushed(0..1);
    assert_eq!(single.delete(0), Ok(0));
    assert!(single.is_empty());
    assert_eq!(single.first(), None);
    assert_eq!(single.last(), None);
}

#[test]
fn delete_empty_is_error() {
    let mut list: AvlTreeList<u32> = AvlTreeList::new();
    assert_eq!(list.delete(0), Err(Error::Empty));
    assert_eq!(Error::Empty.to_string(), "list is empty");
}

#[test]
#[should_panic(expected = "insertion index")]
fn insert_out_of_bounds_panics() {
    let mut list = pushed(0..3);
    list.insert(4, 0);
}

#[test]
#[should_panic(expected = "removal index")]
fn delete_out_of_bounds_panics() {
    let mut list = pushed(0..3);
    let _ = list.delete(3);
}

#[test]
fn retrieve_out_of_bounds() {
    let list = pushed(0..10);
    assert_eq!(list.retrieve(10), None);
    assert_eq!(list.retrieve(usize::MAX), None);

    let empty: AvlTreeList<u32> = AvlTreeList::new();
    assert_eq!(empty.retrieve(0), None);
    assert_eq!(empty.first(), None);
    assert_eq!(empty.last(), None);
    assert_eq!(empty.height(), -1);
}

#[test]
fn height_stays_logarithmic() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let mut list = AvlTreeList::new();

    for value in 0..2000u32 {
        let pos = rng.gen_range(0..=list.len());
        list.insert(pos, value);

        let bound = 1.44 * ((list.len() + 2) as f64).log2();
        assert!(f64::from(list.height()) <= bound);
    }
    list.assert_invariants();

    while list.len() > 1 {
        let pos = rng.gen_range(0..list.len());
        list.delete(pos).unwrap();

        let bound = 1.44 * ((list.len() + 2) as f64).log2();
        assert!(f64::from(list.height()) <= bound);
    }
    list.assert_invariants();
}

#[test]
fn concat_empty_lists() {
    let mut list: AvlTreeList<u32> = AvlTreeList::new();
    assert_eq!(list.concat(AvlTreeList::new()), 0);
    assert_matches(&list, &[]);

    assert_eq!(list.concat(pushed(0..2)), 2);
    assert_matches(&list, &[0, 1]);

    assert_eq!(list.concat(AvlTreeList::new()), 2);
    assert_matches(&list, &[0, 1]);

    let mut single = pushed(0..1);
    assert_eq!(single.concat(AvlTreeList::new()), 1);
    assert_matches(&single, &[0]);
}

#[test]
fn concat_single_elements() {
    let mut list = pushed(0..1);
    assert_eq!(list.concat(pushed(1..2)), 0);
    assert_matches(&list, &[0, 1]);

    let mut list = pushed(0..10);
    let height = list.height();
    assert_eq!(list.concat(pushed(10..11)), height as usize);
    assert_matches(&list, &(0..11).collect::<Vec<_>>());

    let mut list = pushed(0..1);
    let other = pushed(1..10);
    let height = other.height();
    assert_eq!(list.concat(other), height as usize);
    assert_matches(&list, &(0..10).collect::<Vec<_>>());
}

#[test]
fn concat_all_small_sizes() {
    for a in 0..24u32 {
        for b in 0..24u32 {
            let mut list = pushed(0..a);
            let other = model::scattered(&(a..a + b).collect::<Vec<_>>());
            let expected_cost = match (a, b) {
                (0, 0) => 0,
                (0, _) => (other.height() + 1) as usize,
                (_, 0) => (list.height() + 1) as usize,
                _ => usize::from((list.height() - other.height()).unsigned_abs()),
            };

            assert_eq!(list.concat(other), expected_cost, "{a} ++ {b}");
            assert_matches(&list, &(0..a + b).collect::<Vec<_>>());
        }
    }
}

#[test]
fn concat_uneven_heights() {
    let mut tall = pushed(0..1000);
    tall.concat(pushed(1000..1003));
    assert_matches(&tall, &(0..1003).collect::<Vec<_>>());

    let mut short = pushed(0..2);
    short.concat(pushed(2..1000));
    assert_matches(&short, &(0..1000).collect::<Vec<_>>());

    let mut short = pushed(0..3);
    short.concat(pushed(3..700));
    assert_matches(&short, &(0..700).collect::<Vec<_>>());

    // The result remains editable.
    short.insert(350, 10_000);
    short.delete(0).unwrap();
    short.assert_invariants();
    assert_eq!(short.retrieve(349), Some(&10_000));
}

#[test]
fn build_balanced_has_minimum_height() {
    for n in 0..300usize {
        let list: AvlTreeList<usize> = (0..n).collect();
        let min_height = (usize::BITS - n.leading_zeros()) as i8 - 1;

        assert_eq!(list.height(), min_height, "n = {n}");
        assert_matches(&list, &(0..n).collect::<Vec<_>>());
    }
}

#[test]
fn sort_is_stable_and_non_mutating() {
    let list: AvlTreeList<u32> = [3, 1, 2, 1, 0].into_iter().collect();
    let sorted = list.sort();

    assert_matches(&sorted, &[0, 1, 1, 2, 3]);
    assert_matches(&list, &[3, 1, 2, 1, 0]);

    let pairs: AvlTreeList<(u32, char)> = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]
        .into_iter()
        .collect();
    let by_key = pairs.sort_by(|x, y| x.0.cmp(&y.0));
    assert_matches(&by_key, &[(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
}

#[test]
fn sort_absent_values_last() {
    let list: AvlTreeList<Option<u32>> = [Some(3), None, Some(1), None, Some(2)]
        .into_iter()
        .collect();

    assert_matches(
        &list.sort_absent_last(),
        &[Some(1), Some(2), Some(3), None, None],
    );

    let empty: AvlTreeList<Option<u32>> = AvlTreeList::new();
    assert!(empty.sort_absent_last().is_empty());
}

#[test]
fn permutation_is_a_bijection() {
    let list = pushed(0..100);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let permuted = list.permutation_with(&mut rng);
    permuted.assert_invariants();

    let mut values = permuted.to_vec();
    values.sort_unstable();
    assert_eq!(values, (0..100).collect::<Vec<_>>());
    assert_matches(&list, &(0..100).collect::<Vec<_>>());

    // The same seed yields the same permutation.
    let again = list.permutation_with(&mut Xoshiro256PlusPlus::seed_from_u64(42));
    assert_eq!(permuted, again);

    let shuffled = list.permutation();
    assert_eq!(shuffled.len(), 100);
    assert_eq!(shuffled.sort(), list);

    let empty: AvlTreeList<u32> = AvlTreeList::new();
    assert!(empty.permutation().is_empty());
}

#[test]
fn search_finds_first_match() {
    let list: AvlTreeList<&str> = ["a", "b", "a", "c"].into_iter().collect();

    assert_eq!(list.search(&"a"), Some(0));
    assert_eq!(list.search(&"c"), Some(3));
    assert_eq!(list.search(&"z"), None);
}

#[test]
fn iter_both_ends() {
    let list = pushed(0..10);

    assert_eq!(list.iter().len(), 10);
    assert!(list.iter().rev().copied().eq((0..10).rev()));

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&9));
    assert_eq!(iter.len(), 8);
    assert!(iter.copied().eq(1..9));

    let mut total = 0;
    for value in &list {
        total += value;
    }
    assert_eq!(total, 45);
}

#[test]
fn cursor_moves_through_ghost() {
    let list = pushed(0..5);

    let mut curs = list.cursor_first();
    assert_eq!(curs.get(), Some(&0));
    assert_eq!(curs.peek_prev(), None);

    curs.move_prev();
    assert_eq!(curs.get(), None);
    assert_eq!(curs.peek_next(), Some(&0));
    assert_eq!(curs.peek_prev(), Some(&4));

    curs.move_prev();
    assert_eq!(curs.get(), Some(&4));

    let mut curs = list.cursor_at(2);
    assert_eq!(curs.get(), Some(&2));
    assert_eq!(curs.peek_next(), Some(&3));
    assert_eq!(curs.peek_prev(), Some(&1));
    curs.move_next();
    curs.move_next();
    assert_eq!(curs.get(), Some(&4));
    curs.move_next();
    assert_eq!(curs.get(), None);

    assert_eq!(list.cursor_at(5).get(), None);
    assert_eq!(list.cursor_last().get(), Some(&4));
}

#[test]
fn dotgraph_renders_shape() {
    let list: AvlTreeList<u32> = [1, 2, 3].into_iter().collect();
    let mut out = String::new();
    list.dotgraph("g", &mut out).unwrap();

    assert!(out.starts_with("digraph \"graph-g\""));
    assert!(out.contains("\"graphg-0\" [label=\"2:1/3\"];"));
    assert!(out.contains("\"graphg-1\" [label=\"1:0/1\"];"));
    assert!(out.contains("\"graphg-0\" -> \"graphg-2\";"));
    assert!(out.contains("\"graphg-1\" -> \"graphg-missing0\";"));

    let empty: AvlTreeList<u32> = AvlTreeList::new();
    let mut out = String::new();
    empty.dotgraph("e", &mut out).unwrap();
    assert_eq!(out, "digraph \"graph-e\" {}");
}

#[test]
fn drops_every_value() {
    let token = Rc::new(());

    let mut list = AvlTreeList::new();
    for i in 0..50 {
        list.insert(i / 2, Rc::clone(&token));
    }
    assert_eq!(Rc::strong_count(&token), 51);

    list.delete(10).unwrap();
    assert_eq!(Rc::strong_count(&token), 50);

    let mut other = AvlTreeList::new();
    other.extend((0..20).map(|_| Rc::clone(&token)));
    list.concat(other);
    assert_eq!(Rc::strong_count(&token), 70);
    assert_eq!(list.len(), 69);

    list.clear();
    assert_eq!(Rc::strong_count(&token), 1);
    assert!(list.is_empty());

    list.push_back(Rc::clone(&token));
    drop(list);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn clone_and_eq() {
    let list = pushed(0..33);
    let cloned = list.clone();

    cloned.assert_invariants();
    assert_eq!(list, cloned);
    assert_ne!(list, pushed(0..32));
    assert_eq!(format!("{:?}", pushed(0..3)), "[0, 1, 2]");
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..500;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn vec_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_vec_equivalence(ops);
    }

    #[test]
    fn concat_equivalence(
        left in proptest::collection::vec(0u32..1000, FUZZ_RANGE),
        right in proptest::collection::vec(0u32..1000, FUZZ_RANGE),
    ) {
        model::run_concat_equivalence(left, right);
    }
}
