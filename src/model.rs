//! Model-based equivalence checks between [`AvlTreeList`] and `Vec`.
//!
//! Used by the property tests and the fuzz targets.

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};
use rand::{rngs::StdRng, SeedableRng};

use crate::{AvlTreeList, Error};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Position {
    /// Reduced modulo the number of valid positions.
    Index(usize),
    /// Used as is, and thus possibly out of bounds.
    Raw(usize),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> Position {
        Position::Index(index)
    }
}

proptest::prop_compose! {
    fn raw_strategy()(
        raw in 0usize..64,
    ) -> Position {
        Position::Raw(raw)
    }
}

fn position_strategy() -> impl Strategy<Value = Position> {
    proptest::prop_oneof![4 => index_strategy(), 1 => raw_strategy()]
}

#[derive(Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(Position, u32),
    Delete(Position),
    Retrieve(Position),
    Search(u32),
    First,
    Last,
    Concat(Vec<u32>),
    Sort,
    Permute(u64),
}

impl Op {
    // Resolves positions against a list of length `len`. Insert and delete positions are always
    // made valid; delete on an empty list is kept to exercise the error path.
    fn finalize(self, len: usize) -> FinalOp {
        fn resolve(pos: Position, bound: usize) -> usize {
            match pos {
                Position::Index(idx) => idx % bound.max(1),
                Position::Raw(raw) => raw,
            }
        }

        match self {
            Op::Insert(pos, value) => FinalOp::Insert(resolve(pos, len + 1).min(len), value),
            Op::Delete(pos) => FinalOp::Delete(resolve(pos, len).min(len.saturating_sub(1))),
            Op::Retrieve(pos) => FinalOp::Retrieve(resolve(pos, len)),
            Op::Search(value) => FinalOp::Search(value),
            Op::First => FinalOp::First,
            Op::Last => FinalOp::Last,
            Op::Concat(values) => FinalOp::Concat(values),
            Op::Sort => FinalOp::Sort,
            Op::Permute(seed) => FinalOp::Permute(seed),
        }
    }
}

#[derive(Clone, Debug)]
enum FinalOp {
    Insert(usize, u32),
    Delete(usize),
    Retrieve(usize),
    Search(u32),
    First,
    Last,
    Concat(Vec<u32>),
    Sort,
    Permute(u64),
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        4 => (position_strategy(), 0u32..100).prop_map(|(pos, v)| Op::Insert(pos, v)),
        2 => position_strategy().prop_map(Op::Delete),
        1 => position_strategy().prop_map(Op::Retrieve),
        1 => (0u32..100).prop_map(Op::Search),
        1 => Just(Op::First),
        1 => Just(Op::Last),
        1 => proptest::collection::vec(0u32..100, 0..40).prop_map(Op::Concat),
        1 => Just(Op::Sort),
        1 => proptest::num::u64::ANY.prop_map(Op::Permute),
    ]
}

/// Builds a list holding `values` in order, inserting every other element into the middle so that
/// the shape is the product of rebalancing rather than of a bulk rebuild.
pub fn scattered(values: &[u32]) -> AvlTreeList<u32> {
    let mut list = AvlTreeList::new();

    for &value in values.iter().step_by(2) {
        list.push_back(value);
    }

    for (index, &value) in values.iter().enumerate().skip(1).step_by(2) {
        list.insert(index, value);
    }

    list
}

fn assert_same(vec: &[u32], list: &AvlTreeList<u32>, context: &str) {
    list.assert_invariants();
    assert_eq!(vec.len(), list.len(), "{context}");
    assert!(vec.iter().eq(list.iter()), "{context}");
    assert_eq!(vec.first(), list.first(), "{context}");
    assert_eq!(vec.last(), list.last(), "{context}");
}

pub fn run_vec_equivalence(ops: Vec<Op>) {
    let mut vec: Vec<u32> = Vec::with_capacity(ops.len());
    let mut list: AvlTreeList<u32> = AvlTreeList::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.clone().finalize(vec.len());
        let context = format!("FinalOp #{op_id}: {final_op:?} (from {op:?})");

        match final_op {
            FinalOp::Insert(index, value) => {
                vec.insert(index, value);
                list.insert(index, value);
            }

            FinalOp::Delete(index) => {
                let from_list = list.delete(index);

                if vec.is_empty() {
                    assert_eq!(from_list, Err(Error::Empty), "{context}");
                } else {
                    vec.remove(index);
                    assert!(from_list.is_ok(), "{context}");
                }
            }

            FinalOp::Retrieve(index) => {
                assert_eq!(vec.get(index), list.retrieve(index), "{context}");
            }

            FinalOp::Search(value) => {
                let from_vec = vec.iter().position(|&v| v == value);
                assert_eq!(from_vec, list.search(&value), "{context}");
            }

            FinalOp::First => {
                assert_eq!(vec.first(), list.first(), "{context}");
            }

            FinalOp::Last => {
                assert_eq!(vec.last(), list.last(), "{context}");
            }

            FinalOp::Concat(values) => {
                vec.extend_from_slice(&values);
                list.concat(scattered(&values));
            }

            FinalOp::Sort => {
                vec.sort();
                let sorted = list.sort();
                sorted.assert_invariants();
                list = sorted;
            }

            FinalOp::Permute(seed) => {
                let permuted = list.permutation_with(&mut StdRng::seed_from_u64(seed));
                permuted.assert_invariants();

                let mut expected = vec.clone();
                let mut actual = permuted.to_vec();
                expected.sort_unstable();
                actual.sort_unstable();
                assert_eq!(expected, actual, "{context}");

                vec = permuted.to_vec();
                list = permuted;
            }
        }

        assert_same(&vec, &list, &context);
    }
}

#[derive(Clone, Debug)]
pub struct ConcatEquivalenceInput {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
}

impl<'a> arbitrary::Arbitrary<'a> for ConcatEquivalenceInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        fn value(u: &mut arbitrary::Unstructured<'_>) -> u32 {
            u32::arbitrary(u).unwrap_or(0)
        }

        let num_left = u16::arbitrary(u)? % 1000;
        let num_right = u16::arbitrary(u)? % 1000;

        let left = core::iter::repeat_with(|| value(u))
            .take(num_left.into())
            .collect();

        let right = core::iter::repeat_with(|| value(u))
            .take(num_right.into())
            .collect();

        Ok(ConcatEquivalenceInput { left, right })
    }
}

pub fn run_concat_equivalence(left: Vec<u32>, right: Vec<u32>) {
    let mut list = scattered(&left);
    let other = scattered(&right);

    let (left_height, right_height) = (list.height(), other.height());
    let cost = list.concat(other);

    let expected_cost = if left.is_empty() && right.is_empty() {
        0
    } else if left.is_empty() {
        (right_height + 1) as usize
    } else if right.is_empty() {
        (left_height + 1) as usize
    } else {
        usize::from((left_height - right_height).unsigned_abs())
    };
    assert_eq!(expected_cost, cost);

    let mut expected = left;
    expected.extend_from_slice(&right);
    assert_same(&expected, &list, "concat");
}
