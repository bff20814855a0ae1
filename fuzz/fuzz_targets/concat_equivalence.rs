#![no_main]

use avl_tree_list::model::ConcatEquivalenceInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: ConcatEquivalenceInput| {
    avl_tree_list::model::run_concat_equivalence(input.left, input.right);
});
