use core::ptr::NonNull;

use log::debug;

use crate::{links, links_mut, AvlTreeList, Dir, Link, Node};

impl<V> AvlTreeList<V> {
    /// Moves every element of `other` to the end of `self`.
    ///
    /// Returns the absolute difference between the heights of the two trees, which bounds the
    /// work done by the join. If either list is empty, returns the height of the resulting tree
    /// plus one instead (or 0 if both are empty).
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn concat(&mut self, mut other: AvlTreeList<V>) -> usize {
        if self.is_empty() || other.is_empty() {
            if self.is_empty() {
                if other.is_empty() {
                    return 0;
                }

                let (root, first, last) = other.take_tree();
                self.set_tree(root, first, last);
            }

            let cost = (self.height() + 1) as usize;
            debug!("concat with an empty list, cost {cost}");
            return cost;
        }

        let cost = usize::from((self.height() - other.height()).unsigned_abs());

        if other.len() == 1 {
            debug!("concat: appending a single element, cost {cost}");
            self.append_single(other);
        } else if self.len() == 1 {
            debug!("concat: prepending a single element, cost {cost}");
            self.prepend_single(other);
        } else {
            debug!("concat: joining {} and {} elements, cost {cost}", self.len(), other.len());
            self.join(other);
        }

        cost
    }

    // Hangs the only node of `other` off the current last node.
    fn append_single(&mut self, mut other: AvlTreeList<V>) {
        let (root, _, _) = other.take_tree();
        let node = root.expect("appended list has one element");
        let last = self.last.expect("list is not empty");

        unsafe { Node::attach(last, Dir::Right, Some(node)) };
        self.last = Some(node);
        self.fix_the_tree(Some(last), false);
    }

    // Hangs the only node of `self` off the first node of `other`, then adopts `other`'s tree.
    fn prepend_single(&mut self, mut other: AvlTreeList<V>) {
        let (single, _, _) = self.take_tree();
        let node = single.expect("list has one element");

        let (root, first, last) = other.take_tree();
        self.set_tree(root, first, last);

        let first = self.first.expect("prepended-to list is not empty");
        unsafe { Node::attach(first, Dir::Left, Some(node)) };
        self.first = Some(node);
        self.fix_the_tree(Some(first), false);
    }

    // Joins two lists of at least two elements each, using the last node of `self` as the bridge
    // between the two trees.
    fn join(&mut self, mut other: AvlTreeList<V>) {
        let (bridge, _) = self.unlink(self.len() - 1);
        unsafe { links_mut(bridge).reset() };

        let (other_root, _, other_last) = other.take_tree();
        let other_root = other_root.expect("joined list is not empty");
        let self_root = self.root.expect("list keeps a node after losing its last one");
        let first = self.first;

        unsafe {
            let self_height = links(self_root).height();
            let other_height = links(other_root).height();

            if (self_height - other_height).abs() <= 1 {
                Node::set_children(bridge, Some(self_root), Some(other_root));
                Node::fix_height_and_size(bridge);
                self.set_tree(Some(bridge), first, other_last);
            } else if self_height > other_height {
                // Splice the bridge into the right spine of `self` at the height of `other`.
                let (parent, node) = Self::frontier(self_root, Dir::Right, other_height);

                Node::attach(parent, Dir::Right, Some(bridge));
                Node::set_children(bridge, node, Some(other_root));
                Node::fix_height_and_size(bridge);

                self.last = other_last;
                self.fix_the_tree(Some(parent), true);
            } else {
                // Splice the bridge into the left spine of `other` at the height of `self`.
                let (parent, node) = Self::frontier(other_root, Dir::Left, self_height);

                Node::attach(parent, Dir::Left, Some(bridge));
                Node::set_children(bridge, Some(self_root), node);
                Node::fix_height_and_size(bridge);

                self.set_tree(Some(other_root), first, other_last);
                self.fix_the_tree(Some(parent), true);
            }
        }
    }

    // Descends from `root` along `dir` links to the first position whose subtree height is at most
    // `height`.
    //
    // Returns that position as its parent and the (possibly absent) subtree found there. `root`
    // must be taller than `height`.
    unsafe fn frontier(
        root: NonNull<Node<V>>,
        dir: Dir,
        height: i8,
    ) -> (NonNull<Node<V>>, Link<Node<V>>) {
        let mut parent = root;

        unsafe {
            debug_assert!(links(root).height() > height);

            let mut opt_cur = links(root).child(dir);
            while Node::subtree_height(opt_cur) > height {
                let cur = opt_cur.expect("taller than an empty subtree");
                parent = cur;
                opt_cur = links(cur).child(dir);
            }

            (parent, opt_cur)
        }
    }
}
