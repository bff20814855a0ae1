use core::cmp::Ordering;

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{AvlTreeList, Link, Node};

impl<V> AvlTreeList<V> {
    // Builds a list holding `values` in order, shaped as a tree of minimum height.
    //
    // No rotations are needed: every subtree root is the median of its range.
    pub(crate) fn build_balanced(values: Vec<V>) -> AvlTreeList<V> {
        let len = values.len();
        let mut values = values.into_iter();
        let root = Self::build_subtree(&mut values, len);

        let mut list = AvlTreeList::new();
        unsafe {
            let first = root.map(|r| Node::first_in_subtree(r));
            let last = root.map(|r| Node::last_in_subtree(r));
            list.set_tree(root, first, last);
        }

        debug!("built balanced list of {len} elements, height {}", list.height());
        list
    }

    // Builds a subtree from the next `len` values, with the median as its root.
    fn build_subtree(values: &mut impl Iterator<Item = V>, len: usize) -> Link<Node<V>> {
        if len == 0 {
            return None;
        }

        let left_len = len / 2;
        let left = Self::build_subtree(values, left_len);

        let value = values.next().expect("iterator yields exactly `len` values");
        let node = Node::new(value);

        let right = Self::build_subtree(values, len - left_len - 1);

        unsafe {
            Node::set_children(node, left, right);
            Node::fix_height_and_size(node);
        }

        Some(node)
    }

    /// Returns the elements of the list, in order, as a `Vec`.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns the position of the first element equal to `value`.
    ///
    /// This operation completes in _O(n)_ time.
    pub fn search(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Returns a new list holding the elements of `self` in non-decreasing order.
    ///
    /// The sort is stable. `self` is left unchanged.
    pub fn sort(&self) -> AvlTreeList<V>
    where
        V: Ord + Clone,
    {
        self.sort_by(Ord::cmp)
    }

    /// Returns a new list holding the elements of `self` ordered by `compare`.
    ///
    /// The sort is stable. `self` is left unchanged.
    pub fn sort_by<F>(&self, compare: F) -> AvlTreeList<V>
    where
        V: Clone,
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut values = self.to_vec();
        values.sort_by(compare);
        Self::build_balanced(values)
    }

    /// Returns a new list holding the elements of `self` in uniformly random order.
    pub fn permutation(&self) -> AvlTreeList<V>
    where
        V: Clone,
    {
        self.permutation_with(&mut rand::thread_rng())
    }

    /// Returns a new list holding the elements of `self` shuffled with `rng`.
    pub fn permutation_with<R>(&self, rng: &mut R) -> AvlTreeList<V>
    where
        V: Clone,
        R: Rng + ?Sized,
    {
        let mut values = self.to_vec();
        values.shuffle(rng);
        Self::build_balanced(values)
    }
}

impl<T: Ord + Clone> AvlTreeList<Option<T>> {
    /// Returns a new list holding the present values of `self` in non-decreasing order, followed
    /// by every absent value.
    pub fn sort_absent_last(&self) -> AvlTreeList<Option<T>> {
        self.sort_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    }
}

impl<V> FromIterator<V> for AvlTreeList<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::build_balanced(iter.into_iter().collect())
    }
}

impl<V> Extend<V> for AvlTreeList<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<V: Clone> Clone for AvlTreeList<V> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}
