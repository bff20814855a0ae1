use core::ptr::NonNull;
use std::{collections::VecDeque, fmt};

use crate::{links, AvlTreeList, Node};

impl<V> AvlTreeList<V> {
    /// Writes the shape of the tree to `w` as a Graphviz digraph.
    ///
    /// Each node is labeled `value:height/size`; absent children are drawn as points. Nodes of the
    /// same depth are placed on the same rank.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
        V: fmt::Display,
    {
        let root = match self.root {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item<V> {
            Node(NonNull<Node<V>>, usize),
            Missing(usize),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root, 0));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut next_id = 1;
        let mut missing = 0;
        let mut edges = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let (node, id) = match queue.pop_front() {
                    Some(Item::Node(node, id)) => (node, id),
                    Some(Item::Missing(id)) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                    None => break,
                };

                let (value, height, size) = unsafe {
                    (
                        Node::value(node),
                        links(node).height(),
                        links(node).size(),
                    )
                };
                write!(w, "\"graph{name}-{id}\" [label=\"{value}:{height}/{size}\"]; ")?;

                for child in unsafe { [links(node).left(), links(node).right()] } {
                    match child {
                        Some(child) => {
                            queue.push_back(Item::Node(child, next_id));
                            writeln!(edges, "\"graph{name}-{id}\" -> \"graph{name}-{next_id}\";")?;
                            next_id += 1;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                edges,
                                "\"graph{name}-{id}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&edges)?;

        w.write_str(" }\n}")
    }
}
