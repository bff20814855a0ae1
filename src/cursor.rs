use crate::{AvlTreeList, Link, Node};

/// A read-only cursor over an [`AvlTreeList`].
///
/// A cursor points either to an element of the list or to a "ghost" non-element that connects the
/// last element to the first.
pub struct Cursor<'list, V> {
    list: &'list AvlTreeList<V>,
    ptr: Link<Node<V>>,
}

impl<'list, V> Cursor<'list, V> {
    pub(crate) fn first(list: &'list AvlTreeList<V>) -> Cursor<'list, V> {
        Cursor {
            list,
            ptr: list.first,
        }
    }

    pub(crate) fn last(list: &'list AvlTreeList<V>) -> Cursor<'list, V> {
        Cursor {
            list,
            ptr: list.last,
        }
    }

    pub(crate) fn at(list: &'list AvlTreeList<V>, index: usize) -> Cursor<'list, V> {
        Cursor {
            list,
            ptr: list.retrieve_node(index),
        }
    }

    /// Moves the cursor to the next element of the list.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method moves it to the first
    /// element. If it is pointing to the last element, this method moves it to the "ghost"
    /// non-element.
    pub fn move_next(&mut self) {
        self.ptr = self.next_ptr();
    }

    /// Moves the cursor to the previous element of the list.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method moves it to the last
    /// element. If it is pointing to the first element, this method moves it to the "ghost"
    /// non-element.
    pub fn move_prev(&mut self) {
        self.ptr = self.prev_ptr();
    }

    /// Returns a reference to the element pointed to by the cursor.
    ///
    /// This returns `None` if the cursor is currently pointing to the "ghost" non-element.
    pub fn get(&self) -> Option<&'list V> {
        self.ptr.map(|p| unsafe { Node::value(p) })
    }

    /// Returns a reference to the next element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the first element.
    /// If it is pointing to the last element, this method returns `None`.
    pub fn peek_next(&self) -> Option<&'list V> {
        self.next_ptr().map(|p| unsafe { Node::value(p) })
    }

    /// Returns a reference to the previous element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the last element.
    /// If it is pointing to the first element, this method returns `None`.
    pub fn peek_prev(&self) -> Option<&'list V> {
        self.prev_ptr().map(|p| unsafe { Node::value(p) })
    }

    fn next_ptr(&self) -> Link<Node<V>> {
        match self.ptr {
            Some(p) => unsafe { Node::successor(p) },
            None => self.list.first,
        }
    }

    fn prev_ptr(&self) -> Link<Node<V>> {
        match self.ptr {
            Some(p) => unsafe { Node::predecessor(p) },
            None => self.list.last,
        }
    }
}

impl<V> AvlTreeList<V> {
    /// Returns a cursor pointing to the first element, or to the "ghost" non-element if the list
    /// is empty.
    pub fn cursor_first(&self) -> Cursor<'_, V> {
        Cursor::first(self)
    }

    /// Returns a cursor pointing to the last element, or to the "ghost" non-element if the list
    /// is empty.
    pub fn cursor_last(&self) -> Cursor<'_, V> {
        Cursor::last(self)
    }

    /// Returns a cursor pointing to the element at `index`, or to the "ghost" non-element if
    /// `index` is out of bounds.
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, V> {
        Cursor::at(self, index)
    }
}
