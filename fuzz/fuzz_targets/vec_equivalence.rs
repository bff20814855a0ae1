#![no_main]
use libfuzzer_sys::fuzz_target;

use avl_tree_list::model::{run_vec_equivalence, Op};

fuzz_target!(|ops: Vec<Op>| { run_vec_equivalence(ops) });
