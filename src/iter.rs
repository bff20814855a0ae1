use core::{iter::FusedIterator, marker::PhantomData};

use crate::{AvlTreeList, Link, Node};

/// An in-order iterator over the elements of an [`AvlTreeList`].
///
/// Each step follows the successor (or predecessor) link of the previous element, so a full
/// traversal visits every edge of the tree at most twice.
pub struct Iter<'list, V> {
    front: Link<Node<V>>,
    back: Link<Node<V>>,
    len: usize,
    _list: PhantomData<&'list AvlTreeList<V>>,
}

impl<'list, V> Iter<'list, V> {
    pub(crate) fn new(list: &'list AvlTreeList<V>) -> Self {
        Iter {
            front: list.first,
            back: list.last,
            len: list.len(),
            _list: PhantomData,
        }
    }
}

impl<'list, V> Iterator for Iter<'list, V> {
    type Item = &'list V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let cur = self.front?;
        self.len -= 1;

        unsafe {
            self.front = Node::successor(cur);
            Some(Node::value(cur))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'list, V> DoubleEndedIterator for Iter<'list, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let cur = self.back?;
        self.len -= 1;

        unsafe {
            self.back = Node::predecessor(cur);
            Some(Node::value(cur))
        }
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<V> AvlTreeList<V> {
    /// Returns an iterator over the elements of the list, in order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }
}

impl<'list, V> IntoIterator for &'list AvlTreeList<V> {
    type Item = &'list V;
    type IntoIter = Iter<'list, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
