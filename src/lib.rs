//! A positional list backed by an AVL tree ordered by rank.
//!
//! Elements carry no ordering relation to their position: the in-order sequence of the tree *is*
//! the list, and a node's position is derived from the cached subtree sizes along the path from
//! the root. Insertion and deletion at an arbitrary position are _O(log(n))_, and concatenating two
//! lists is proportional to the difference of their heights.

// Conventions used in comments:
// - The height of an absent child is -1, and its size is 0.
// - The balance factor of a node `x` is `h(left(x)) - h(right(x))`.
// - The rank of a node within its subtree is `size(left(x)) + 1`.
//
// The invariants of the tree, which hold whenever no operation is in progress:
// 1. Every node has a balance factor in `[-1, 1]`.
// 2. The cached height and size of every node match its children.
// 3. Every child's parent link points back to the node that owns it.
// 4. `first`, `last` and `len` describe the tree rooted at `root`.

use core::{cell::UnsafeCell, cmp::Ordering, fmt, marker::PhantomData, mem, ops::Not, ptr::NonNull};

use cordyceps::Linked;
use log::trace;

mod build;
mod cursor;
mod debug;
mod error;
mod iter;
mod join;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use iter::Iter;

/// A list implemented as a height-balanced binary tree keyed by position.
///
/// All positional operations ([`retrieve`], [`insert`], [`delete`]) complete in _O(log(n))_
/// time, [`first`] and [`last`] in _O(1)_.
///
/// [`retrieve`]: AvlTreeList::retrieve
/// [`insert`]: AvlTreeList::insert
/// [`delete`]: AvlTreeList::delete
/// [`first`]: AvlTreeList::first
/// [`last`]: AvlTreeList::last
pub struct AvlTreeList<V> {
    root: Link<Node<V>>,
    first: Link<Node<V>>,
    last: Link<Node<V>>,
    len: usize,
    _owns: PhantomData<Box<Node<V>>>,
}

pub(crate) struct Links<T> {
    inner: UnsafeCell<LinksInner<T>>,
}

struct LinksInner<T> {
    parent: Link<T>,
    children: [Link<T>; 2],
    height: i8,
    size: usize,
}

pub(crate) struct Node<V> {
    links: Links<Node<V>>,
    value: V,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

pub(crate) type Link<T> = Option<NonNull<T>>;

unsafe impl<V> Linked<Links<Node<V>>> for Node<V> {
    type Handle = Box<Self>;

    fn into_ptr(r: Self::Handle) -> NonNull<Self> {
        Box::leak(r).into()
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        unsafe { Box::from_raw(ptr.as_ptr()) }
    }

    unsafe fn links(ptr: NonNull<Self>) -> NonNull<Links<Node<V>>> {
        let ptr = ptr.as_ptr();
        unsafe { NonNull::new_unchecked(core::ptr::addr_of_mut!((*ptr).links)) }
    }
}

// Shorthands for reaching a node's links through its pointer.
//
// # Safety
//
// `node` must point to a live node, and the returned reference must not outlive it or overlap a
// mutable reference to the same links.
#[inline]
pub(crate) unsafe fn links<'a, V>(node: NonNull<Node<V>>) -> &'a Links<Node<V>> {
    unsafe { <Node<V> as Linked<Links<Node<V>>>>::links(node).as_ref() }
}

#[inline]
pub(crate) unsafe fn links_mut<'a, V>(node: NonNull<Node<V>>) -> &'a mut Links<Node<V>> {
    unsafe { <Node<V> as Linked<Links<Node<V>>>>::links(node).as_mut() }
}

// Node primitives ==========================================================

impl<V> Node<V> {
    /// Allocates a detached leaf holding `value`.
    fn new(value: V) -> NonNull<Node<V>> {
        Node::into_ptr(Box::new(Node {
            links: Links::new(),
            value,
        }))
    }

    #[inline]
    pub(crate) unsafe fn value<'a>(node: NonNull<Node<V>>) -> &'a V {
        unsafe { &(*node.as_ptr()).value }
    }

    /// Returns the height of the pointed-to subtree, or -1 if it is empty.
    #[inline]
    pub(crate) unsafe fn subtree_height(link: Link<Node<V>>) -> i8 {
        link.map(|n| unsafe { links(n).height() }).unwrap_or(-1)
    }

    /// Returns the number of nodes in the pointed-to subtree.
    #[inline]
    pub(crate) unsafe fn subtree_size(link: Link<Node<V>>) -> usize {
        link.map(|n| unsafe { links(n).size() }).unwrap_or(0)
    }

    unsafe fn calc_height(node: NonNull<Node<V>>) -> i8 {
        unsafe {
            let left = Self::subtree_height(links(node).left());
            let right = Self::subtree_height(links(node).right());
            left.max(right) + 1
        }
    }

    unsafe fn calc_size(node: NonNull<Node<V>>) -> usize {
        unsafe {
            let left = Self::subtree_size(links(node).left());
            let right = Self::subtree_size(links(node).right());
            left + right + 1
        }
    }

    // Brings the cached height and size of `node` in sync with its current children.
    //
    // Every structural change must call this on each node whose subtree changed, bottom-up.
    pub(crate) unsafe fn fix_height_and_size(node: NonNull<Node<V>>) {
        unsafe {
            let height = Self::calc_height(node);
            let size = Self::calc_size(node);

            let node_links = links_mut(node);
            node_links.set_height(height);
            node_links.set_size(size);
        }
    }

    pub(crate) unsafe fn balance_factor(node: NonNull<Node<V>>) -> i8 {
        unsafe {
            Self::subtree_height(links(node).left()) - Self::subtree_height(links(node).right())
        }
    }

    // Sets the `dir` child of `parent` to `child`, and points `child` back at `parent`.
    //
    // Cached fields are not updated.
    pub(crate) unsafe fn attach(parent: NonNull<Node<V>>, dir: Dir, child: Link<Node<V>>) {
        unsafe {
            links_mut(parent).set_child(dir, child);

            if let Some(child) = child {
                links_mut(child).set_parent(Some(parent));
            }
        }
    }

    pub(crate) unsafe fn set_children(
        node: NonNull<Node<V>>,
        left: Link<Node<V>>,
        right: Link<Node<V>>,
    ) {
        unsafe {
            Self::attach(node, Dir::Left, left);
            Self::attach(node, Dir::Right, right);
        }
    }

    // Returns the node reached by following `dir` links from `node` for as long as possible.
    pub(crate) unsafe fn extreme_in_subtree(node: NonNull<Node<V>>, dir: Dir) -> NonNull<Node<V>> {
        let mut cur = node;

        while let Some(child) = unsafe { links(cur).child(dir) } {
            cur = child;
        }

        cur
    }

    /// Returns the leftmost node of the subtree rooted at `node`.
    pub(crate) unsafe fn first_in_subtree(node: NonNull<Node<V>>) -> NonNull<Node<V>> {
        unsafe { Self::extreme_in_subtree(node, Dir::Left) }
    }

    /// Returns the rightmost node of the subtree rooted at `node`.
    pub(crate) unsafe fn last_in_subtree(node: NonNull<Node<V>>) -> NonNull<Node<V>> {
        unsafe { Self::extreme_in_subtree(node, Dir::Right) }
    }

    // Returns the in-order neighbor of `node` in direction `dir`.
    //
    // If `node` has a `dir` child, the neighbor is the `!dir`-most node of that subtree. Otherwise
    // it is the first ancestor reached from its `!dir` side.
    unsafe fn neighbor(node: NonNull<Node<V>>, dir: Dir) -> Link<Node<V>> {
        unsafe {
            if let Some(child) = links(node).child(dir) {
                return Some(Self::extreme_in_subtree(child, !dir));
            }

            let mut cur = node;
            while let Some(parent) = links(cur).parent() {
                if links(parent).child(dir) != Some(cur) {
                    return Some(parent);
                }

                cur = parent;
            }

            None
        }
    }

    pub(crate) unsafe fn predecessor(node: NonNull<Node<V>>) -> Link<Node<V>> {
        unsafe { Self::neighbor(node, Dir::Left) }
    }

    pub(crate) unsafe fn successor(node: NonNull<Node<V>>) -> Link<Node<V>> {
        unsafe { Self::neighbor(node, Dir::Right) }
    }
}

impl<V> AvlTreeList<V> {
    /// Returns a new empty list.
    pub const fn new() -> AvlTreeList<V> {
        AvlTreeList {
            root: None,
            first: None,
            last: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Returns `true` if the list contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            // Can't use assert_eq!() in const fn.
            assert!(empty == self.root.is_none());
        }

        empty
    }

    /// Returns the number of elements in the list.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the underlying tree, or -1 if the list is empty.
    pub fn height(&self) -> i8 {
        unsafe { Node::subtree_height(self.root) }
    }

    /// Returns a reference to the element at position `index`, or `None` if `index` is out of
    /// bounds.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn retrieve(&self, index: usize) -> Option<&V> {
        let node = self.retrieve_node(index)?;
        unsafe { Some(Node::value(node)) }
    }

    /// Returns the first element of the list.
    pub fn first(&self) -> Option<&V> {
        self.first.map(|node| unsafe { Node::value(node) })
    }

    /// Returns the last element of the list.
    pub fn last(&self) -> Option<&V> {
        self.last.map(|node| unsafe { Node::value(node) })
    }

    /// Inserts `value` so that it ends up at position `index`, shifting every later element
    /// one position to the right.
    ///
    /// Returns the number of rotations performed to rebalance the tree.
    ///
    /// This operation completes in _O(log(n))_ time.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: V) -> usize {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        let node = Node::new(value);

        let Some(last) = self.last else {
            self.set_tree(Some(node), Some(node), Some(node));
            return 0;
        };

        unsafe {
            if index == len {
                Node::attach(last, Dir::Right, Some(node));
                self.last = Some(node);
            } else {
                let at = self
                    .retrieve_node(index)
                    .expect("insertion index is within the tree");

                match links(at).left() {
                    None => Node::attach(at, Dir::Left, Some(node)),
                    Some(_) => {
                        // The predecessor of a node with a left child has no right child.
                        let pred = Node::predecessor(at).expect("node has a left subtree");
                        Node::attach(pred, Dir::Right, Some(node));
                    }
                }

                if index == 0 {
                    self.first = Some(node);
                }
            }

            let parent = links(node).parent();
            let rotations = self.fix_the_tree(parent, false);
            trace!("insert at {index}: {rotations} rotation(s)");
            rotations
        }
    }

    /// Appends `value` to the end of the list.
    pub fn push_back(&mut self, value: V) -> usize {
        self.insert(self.len, value)
    }

    /// Prepends `value` to the front of the list.
    pub fn push_front(&mut self, value: V) -> usize {
        self.insert(0, value)
    }

    /// Removes the element at position `index`, shifting every later element one position to the
    /// left.
    ///
    /// Returns the number of rotations performed to rebalance the tree, or [`Error::Empty`] if the
    /// list has no elements.
    ///
    /// This operation completes in _O(log(n))_ time.
    ///
    /// # Panics
    ///
    /// Panics if the list is not empty and `index >= len`.
    pub fn delete(&mut self, index: usize) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        let (node, rotations) = self.unlink(index);
        drop(unsafe { Node::from_ptr(node) });

        trace!("delete at {index}: {rotations} rotation(s)");
        Ok(rotations)
    }

    /// Clears the list, removing all elements.
    pub fn clear(&mut self) {
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                // Descend to the minimum node.
                let cur = Node::first_in_subtree(cur);
                let parent = links(cur).parent();
                let right = links(cur).right();

                // Elevate the node's right child (which may be None).
                self.replace_child_or_set_root(parent, cur, right);

                // Drop the node.
                drop(Node::from_ptr(cur));
                self.len -= 1;

                // If the node had no right child, climb to the parent. If the node had no parent,
                // the list is empty.
                opt_cur = right.or(parent);
            }
        }

        self.first = None;
        self.last = None;

        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.len(), 0);
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        unsafe {
            if let Some(root) = self.root {
                assert_eq!(links(root).parent(), None, "root has a parent link");
                self.assert_invariants_at(root);
            }

            assert_eq!(
                self.len,
                Node::subtree_size(self.root),
                "cached length out of sync"
            );
            assert_eq!(
                self.first,
                self.root.map(|r| Node::first_in_subtree(r)),
                "cached first node out of sync"
            );
            assert_eq!(
                self.last,
                self.root.map(|r| Node::last_in_subtree(r)),
                "cached last node out of sync"
            );
        }
    }

    #[allow(clippy::only_used_in_recursion)]
    unsafe fn assert_invariants_at(&self, node: NonNull<Node<V>>) {
        unsafe {
            let node_links = links(node);
            let left = node_links.left();
            let right = node_links.right();

            assert_eq!(node_links.height(), Node::calc_height(node), "stale height");
            assert_eq!(node_links.size(), Node::calc_size(node), "stale size");
            assert!(
                (-1..=1).contains(&Node::balance_factor(node)),
                "balance factor out of range"
            );

            for child in [left, right].into_iter().flatten() {
                // Ensure child's parent link points to this node.
                let parent = links(child)
                    .parent()
                    .expect("child parent pointer not set");
                assert_eq!(node, parent);

                self.assert_invariants_at(child);
            }
        }
    }

    // Replaces the root and the cached boundary nodes together, recomputing the length from the
    // new root.
    pub(crate) fn set_tree(
        &mut self,
        root: Link<Node<V>>,
        first: Link<Node<V>>,
        last: Link<Node<V>>,
    ) {
        if let Some(root) = root {
            unsafe { links_mut(root).set_parent(None) };
        }

        self.root = root;
        self.first = first;
        self.last = last;
        self.len = unsafe { Node::subtree_size(root) };
    }

    // Detaches the whole tree from the list, leaving it empty.
    pub(crate) fn take_tree(&mut self) -> (Link<Node<V>>, Link<Node<V>>, Link<Node<V>>) {
        let root = self.root.take();
        let first = self.first.take();
        let last = self.last.take();
        self.len = 0;

        (root, first, last)
    }

    // Rank index ===========================================================

    // Returns the node at 0-based position `index`, descending by the rank of each node within
    // its subtree.
    pub(crate) fn retrieve_node(&self, index: usize) -> Link<Node<V>> {
        // 1-based rank of the target within the current subtree.
        let mut rank = index.checked_add(1)?;
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            unsafe {
                let cur_rank = Node::subtree_size(links(cur).left()) + 1;

                match cur_rank.cmp(&rank) {
                    Ordering::Equal => return Some(cur),
                    Ordering::Greater => opt_cur = links(cur).left(),
                    Ordering::Less => {
                        rank -= cur_rank;
                        opt_cur = links(cur).right();
                    }
                }
            }
        }
    }

    // Structural editor ====================================================

    // Removes the node at `index` from the tree and rebalances, without freeing it.
    //
    // Returns the detached node and the number of rotations performed. The node's links are left
    // stale.
    pub(crate) fn unlink(&mut self, index: usize) -> (NonNull<Node<V>>, usize) {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );

        let target = self
            .retrieve_node(index)
            .expect("removal index is within the tree");

        if len == 1 {
            self.set_tree(None, None, None);
            return (target, 0);
        }

        unsafe {
            if index == 0 {
                self.first = Node::successor(target);
            }

            if index == len - 1 {
                self.last = Node::predecessor(target);
            }

            let parent = links(target).parent();
            let left = links(target).left();
            let right = links(target).right();

            // The parent of the position that physically lost a node.
            let vacated_parent = match (left, right) {
                (Some(left), Some(right)) => {
                    // The successor has no left child. Elevate its right child into its place,
                    // then move the successor into the place of `target`.
                    let successor = Node::first_in_subtree(right);
                    let successor_parent = links(successor).parent();
                    let successor_right = links(successor).right();

                    self.replace_child_or_set_root(successor_parent, successor, successor_right);
                    self.replace_child_or_set_root(parent, target, Some(successor));

                    // The right link of `target` was updated above iff `successor` was `right`.
                    let right = links(target).right();
                    Node::set_children(successor, Some(left), right);

                    let height = links(target).height();
                    let size = links(target).size();
                    let successor_links = links_mut(successor);
                    successor_links.set_height(height);
                    successor_links.set_size(size);

                    if successor_parent == Some(target) {
                        Some(successor)
                    } else {
                        successor_parent
                    }
                }

                (Some(child), None) | (None, Some(child)) => {
                    self.replace_child_or_set_root(parent, target, Some(child));
                    parent
                }

                (None, None) => {
                    self.replace_child_or_set_root(parent, target, None);
                    parent
                }
            };

            let rotations = self.fix_the_tree(vacated_parent, true);
            (target, rotations)
        }
    }

    #[inline]
    unsafe fn maybe_set_parent(opt_node: Link<Node<V>>, parent: Link<Node<V>>) {
        let Some(node) = opt_node else {
            return;
        };

        unsafe { links_mut(node).set_parent(parent) };
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with `new_child`, or the root
    // if `parent` is `None`, and points `new_child` back at `parent`.
    //
    // # Safety
    //
    // `old_child` must be a child of `parent`, or the root if `parent` is `None`.
    unsafe fn replace_child_or_set_root(
        &mut self,
        parent: Link<Node<V>>,
        old_child: NonNull<Node<V>>,
        new_child: Link<Node<V>>,
    ) {
        unsafe {
            match parent {
                Some(parent) => {
                    let dir = self.which_child(parent, old_child);
                    links_mut(parent).set_child(dir, new_child);
                }
                None => self.root = new_child,
            }

            Self::maybe_set_parent(new_child, parent);
        }
    }

    pub(crate) unsafe fn which_child(
        &self,
        parent: NonNull<Node<V>>,
        child: NonNull<Node<V>>,
    ) -> Dir {
        unsafe {
            if links(parent).left() == Some(child) {
                Dir::Left
            } else {
                debug_assert_eq!(links(parent).right(), Some(child), "not a child of `parent`");
                Dir::Right
            }
        }
    }

    // Rebalancing engine ===================================================

    // Rotates `down` towards `dir`: its `!dir` child takes its place, and `down` becomes that
    // child's `dir` child.
    //
    // Only the two rotated nodes have their cached fields recomputed; the contents of their
    // subtrees as a whole are unchanged.
    fn rotate(&mut self, down: NonNull<Node<V>>, dir: Dir) -> NonNull<Node<V>> {
        unsafe {
            let up = links(down)
                .child(!dir)
                .expect("rotation requires a child on the rising side");
            let parent = links(down).parent();

            // `across` goes from the `dir` child of `up` to the `!dir` child of `down`.
            let across = links(up).child(dir);
            links_mut(down).set_child(!dir, across);
            Self::maybe_set_parent(across, Some(down));

            links_mut(up).set_child(dir, Some(down));
            links_mut(down).set_parent(Some(up));

            self.replace_child_or_set_root(parent, down, Some(up));

            Node::fix_height_and_size(down);
            Node::fix_height_and_size(up);

            trace!(
                "rotated {dir:?} at height {}, new subtree height {}",
                links(down).height(),
                links(up).height()
            );

            up
        }
    }

    // Restores the balance of `node`, whose balance factor is +2 or -2.
    //
    // Returns the number of single rotations performed.
    fn perform_rotation(&mut self, node: NonNull<Node<V>>) -> usize {
        unsafe {
            if Node::balance_factor(node) == 2 {
                let left = links(node).left().expect("left-heavy node has a left child");

                if Node::balance_factor(left) == -1 {
                    self.rotate(left, Dir::Left);
                    self.rotate(node, Dir::Right);
                    2
                } else {
                    self.rotate(node, Dir::Right);
                    1
                }
            } else {
                let right = links(node).right().expect("right-heavy node has a right child");

                if Node::balance_factor(right) == 1 {
                    self.rotate(right, Dir::Right);
                    self.rotate(node, Dir::Left);
                    2
                } else {
                    self.rotate(node, Dir::Left);
                    1
                }
            }
        }
    }

    // Walks up from `from`, the parent of a position whose subtree just changed, restoring the
    // balance of every ancestor.
    //
    // The walk stops once an ancestor keeps its height. After an insertion a single rebalance
    // suffices, so if `fix_to_root` is false the walk also stops after the first one. Finally the
    // cached height and size of every node from `from` to the root is recomputed.
    //
    // Returns the number of single rotations performed.
    pub(crate) fn fix_the_tree(&mut self, from: Link<Node<V>>, fix_to_root: bool) -> usize {
        let mut rotations = 0;
        let mut opt_cur = from;

        unsafe {
            while let Some(cur) = opt_cur {
                let old_height = links(cur).height();
                let height = Node::calc_height(cur);
                links_mut(cur).set_height(height);

                if (-1..=1).contains(&Node::balance_factor(cur)) {
                    if height == old_height {
                        break;
                    }

                    opt_cur = links(cur).parent();
                    continue;
                }

                let parent = links(cur).parent();
                rotations += self.perform_rotation(cur);

                if !fix_to_root {
                    break;
                }

                opt_cur = parent;
            }

            self.fix_heights_and_sizes_from(from);
        }

        rotations
    }

    unsafe fn fix_heights_and_sizes_from(&mut self, from: Link<Node<V>>) {
        let mut opt_cur = from;

        while let Some(cur) = opt_cur {
            unsafe {
                Node::fix_height_and_size(cur);
                opt_cur = links(cur).parent();
            }
        }

        self.len = unsafe { Node::subtree_size(self.root) };
    }
}

impl<V> Default for AvlTreeList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for AvlTreeList<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlTreeList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for AvlTreeList<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for AvlTreeList<V> {}

impl<T> Links<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                parent: None,
                children: [None; 2],
                height: 0,
                size: 1,
            }),
        }
    }

    // Returns the links to the state of a freshly allocated leaf.
    #[inline]
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub(crate) fn height(&self) -> i8 {
        unsafe { (*self.inner.get()).height }
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        unsafe { (*self.inner.get()).size }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link<T> {
        unsafe { (*self.inner.get()).parent }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Link<T> {
        unsafe { (*self.inner.get()).children[dir as usize] }
    }

    #[inline]
    pub(crate) fn left(&self) -> Link<T> {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Link<T> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().children[dir as usize], child)
    }

    #[inline]
    fn set_height(&mut self, height: i8) {
        self.inner.get_mut().height = height;
    }

    #[inline]
    fn set_size(&mut self, size: usize) {
        self.inner.get_mut().size = size;
    }
}
