use avl_tree_list::AvlTreeList;

fn main() {
    let mut list: AvlTreeList<u32> = AvlTreeList::new();

    for value in [2, 0, 3, 4, 5, 1, 6] {
        let rotations = list.push_back(value);
        list.assert_invariants();
        println!("{:?} ({rotations} rotations)", list.iter().collect::<Vec<_>>());
    }

    let rotations = list.insert(3, 10);
    list.assert_invariants();
    println!("{list:?} ({rotations} rotations)");

    let rotations = list.delete(0).expect("list is not empty");
    list.assert_invariants();
    println!("{list:?} ({rotations} rotations)");

    let tail: AvlTreeList<u32> = (100..120).collect();
    let cost = list.concat(tail);
    list.assert_invariants();
    println!("{list:?} (height difference {cost})");

    let sorted = list.sort();
    println!("sorted: {sorted:?}");
    println!("permuted: {:?}", sorted.permutation());
    println!("10 is at {:?}", sorted.search(&10));

    let mut graph = String::new();
    if list.dotgraph("demo", &mut graph).is_ok() {
        println!("{graph}");
    }

    drop(list);
}
