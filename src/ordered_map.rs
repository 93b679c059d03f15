//! Mutable ordered map based on an unbalanced binary search tree.
//!
//! This module provides [`OrderedMap`], an ordered map whose nodes form a
//! plain binary search tree: every node owns its two children and nothing
//! else points into the tree.
//!
//! # Overview
//!
//! - O(depth) insert, get, remove, and lower-nearest (floor) lookup
//! - O(1) len and `is_empty`
//! - In-order iteration in ascending key order
//!
//! The tree is never rebalanced. Depth equals the number of entries when
//! keys arrive in strictly increasing or decreasing order, so every walk over
//! the tree is iterative and no operation recurses on the tree's shape.
//!
//! # Examples
//!
//! ```rust
//! use bst_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(8, "eight");
//! map.insert(5, "five");
//! map.insert(10, "ten");
//!
//! assert_eq!(map.get(&5), Some(&"five"));
//!
//! // Floor lookup: greatest key <= 9
//! assert_eq!(map.lower_nearest(&9), Some(&"eight"));
//!
//! assert!(map.remove(&8));
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&5, &10]);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants after every public operation:
//! 1. Every key in a node's left subtree is strictly less than the node's key
//! 2. Every key in a node's right subtree is strictly greater
//! 3. Each key appears in exactly one node
//! 4. The cached length equals the number of reachable nodes

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use smallvec::SmallVec;

use crate::error::InvariantError;

/// Number of ancestors an in-order iterator keeps inline before spilling to
/// the heap.
const INLINE_STACK: usize = 16;

// =============================================================================
// Node Definition
// =============================================================================

type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node structure of the search tree.
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a node with no children.
    const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Consumes a detached node, returning its entry.
    ///
    /// Both children must already have been moved out.
    fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Unlinks the leftmost node of the subtree rooted at `slot`.
    ///
    /// The detached node's right subtree takes over its former slot, so the
    /// remaining subtree stays ordered. Returns `None` for an empty subtree.
    fn detach_leftmost(mut slot: &mut Link<K, V>) -> Link<K, V> {
        while slot.as_ref().is_some_and(|node| node.left.is_some()) {
            if let Some(node) = slot {
                slot = &mut node.left;
            }
        }
        let mut leftmost = slot.take()?;
        *slot = leftmost.right.take();
        Some(leftmost)
    }
}

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A mutable ordered map backed by an unbalanced binary search tree.
///
/// Keys must implement `Ord`. Entries are kept in ascending key order, which
/// enables the lower-nearest lookup that hash maps cannot answer.
///
/// # Time Complexity
///
/// | Operation       | Complexity |
/// |-----------------|------------|
/// | `new`           | O(1)       |
/// | `get`           | O(depth)   |
/// | `insert`        | O(depth)   |
/// | `remove`        | O(depth)   |
/// | `lower_nearest` | O(depth)   |
/// | `check_sanity`  | O(N)       |
/// | `len`           | O(1)       |
/// | `is_empty`      | O(1)       |
///
/// `depth` is O(log N) for random insertion orders and O(N) for sorted ones.
///
/// # Examples
///
/// ```rust
/// use bst_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("abc".to_string(), 1);
/// map.insert("zzz".to_string(), 2);
///
/// assert_eq!(map.lower_nearest("abd2"), Some(&1));
/// assert_eq!(map.lower_nearest("zzzz"), Some(&2));
/// assert_eq!(map.lower_nearest("aaa"), None);
/// ```
pub struct OrderedMap<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, String> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get(&3), None);
    /// ```
    pub fn clear(&mut self) {
        let released = mem::take(self);
        log::debug!("cleared ordered map holding {} entries", released.length);
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty map has depth 0. Since the tree is never rebalanced, inserting
    /// keys in sorted order produces `depth() == len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let skewed: OrderedMap<i32, ()> = (0..5).map(|key| (key, ())).collect();
    /// assert_eq!(skewed.depth(), 5);
    ///
    /// let bushy: OrderedMap<i32, ()> = [2, 1, 3].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(bushy.depth(), 2);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut level: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        let mut depth = 0;
        while !level.is_empty() {
            depth += 1;
            level = level
                .into_iter()
                .flat_map(|node| [node.left.as_deref(), node.right.as_deref()])
                .flatten()
                .collect();
        }
        depth
    }

    /// Returns an iterator over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let entries: Vec<(&i32, &char)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is overwritten in place and
    /// the previous value is returned; the tree's shape does not change.
    /// Otherwise a new leaf is attached and `None` is returned.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(3, 4), None);
    /// assert_eq!(map.insert(3, 5), Some(4));
    /// assert_eq!(map.get(&3), Some(&5));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let slot = self.slot_mut(&key);
        let previous = if let Some(node) = slot.as_mut() {
            Some(mem::replace(&mut node.value, value))
        } else {
            *slot = Some(Box::new(Node::leaf(key, value)));
            None
        };
        if previous.is_none() {
            self.length += 1;
            log::trace!("attached new leaf, map holds {} entries", self.length);
        }
        self.assert_invariants();
        previous
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.slot_mut(key).as_mut().map(|node| &mut node.value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Returns the value of the greatest key less than or equal to `key`.
    ///
    /// Returns `None` when the map is empty or every key exceeds `key`.
    /// Only the key ordering is consulted, so this works for any `Ord` key:
    /// strings are compared lexicographically, for instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(10, "ten"), (20, "twenty")].into_iter().collect();
    ///
    /// assert_eq!(map.lower_nearest(&20), Some(&"twenty"));
    /// assert_eq!(map.lower_nearest(&15), Some(&"ten"));
    /// assert_eq!(map.lower_nearest(&5), None);
    /// ```
    #[must_use]
    pub fn lower_nearest<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lower_nearest_key_value(key).map(|(_, value)| value)
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(10, "ten"), (20, "twenty")].into_iter().collect();
    /// assert_eq!(map.lower_nearest_key_value(&15), Some((&10, &"ten")));
    /// ```
    #[must_use]
    pub fn lower_nearest_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut last_less: Option<&Node<K, V>> = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    last_less = Some(node);
                    current = node.right.as_deref();
                }
                Ordering::Less => current = node.left.as_deref(),
            }
        }
        last_less.map(|node| (&node.key, &node.value))
    }

    /// Removes a key from the map, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = [8, 5, 4].into_iter().map(|key| (key, key)).collect();
    ///
    /// assert!(map.remove(&5));
    /// assert!(!map.remove(&5));
    /// assert_eq!(map.get(&4), Some(&4));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// A node with two children is not unlinked itself: its in-order
    /// successor (the leftmost node of its right subtree) is detached
    /// instead, the successor's right subtree takes the successor's former
    /// place, and the successor's entry moves into the node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.remove_entry(&1), Some((1, "one")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = self.slot_mut(key);
        let mut removed = slot.take()?;

        let successor = if removed.left.is_some() {
            Node::detach_leftmost(&mut removed.right)
        } else {
            None
        };

        let (entry, case) = if let Some(successor) = successor {
            let (successor_key, successor_value) = (*successor).into_entry();
            let entry = (
                mem::replace(&mut removed.key, successor_key),
                mem::replace(&mut removed.value, successor_value),
            );
            *slot = Some(removed);
            (entry, "successor splice")
        } else {
            *slot = removed.left.take().or_else(|| removed.right.take());
            let case = if slot.is_some() { "single child" } else { "leaf" };
            ((*removed).into_entry(), case)
        };

        self.length -= 1;
        log::trace!("removed entry ({case}), map holds {} entries", self.length);
        self.assert_invariants();
        Some(entry)
    }

    /// Returns `true` if an in-order traversal yields keys in non-descending order.
    ///
    /// This is a diagnostic: it visits every node. Use [`validate`] for a
    /// full audit that also reports what is wrong.
    ///
    /// [`validate`]: Self::validate
    #[must_use]
    pub fn check_sanity(&self) -> bool {
        self.keys()
            .zip(self.keys().skip(1))
            .all(|(previous, next)| previous <= next)
    }

    /// Audits every structural invariant of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::OutOfOrder`] for the first in-order key that
    /// is not strictly greater than its predecessor, and
    /// [`InvariantError::LengthMismatch`] if the cached length disagrees with
    /// the number of reachable nodes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [3, 1, 5, 4, 7, 6].into_iter().map(|key| (key, key)).collect();
    /// assert_eq!(map.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError> {
        let mut previous: Option<&K> = None;
        let mut actual = 0;
        for (position, key) in self.keys().enumerate() {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(InvariantError::OutOfOrder { position });
            }
            previous = Some(key);
            actual = position + 1;
        }
        if actual == self.length {
            Ok(())
        } else {
            Err(InvariantError::LengthMismatch {
                expected: self.length,
                actual,
            })
        }
    }

    /// Iterative lookup of the node holding `key`.
    fn find_node<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Returns the link that owns `key`'s node, or the empty link where a
    /// node for `key` would be attached.
    fn slot_mut<Q>(&mut self, key: &Q) -> &mut Link<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = &mut self.root;
        loop {
            let ordering = match slot.as_deref() {
                Some(node) => key.cmp(node.key.borrow()),
                None => return slot,
            };
            if ordering == Ordering::Equal {
                return slot;
            }
            if let Some(node) = slot {
                slot = if ordering == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }
    }

    #[cfg(feature = "invariant-checks")]
    fn assert_invariants(&self) {
        if let Err(error) = self.validate() {
            panic!("ordered map invariant violated: {error}");
        }
    }

    #[cfg(not(feature = "invariant-checks"))]
    #[allow(clippy::unused_self)]
    #[inline]
    const fn assert_invariants(&self) {}
}

impl<K: Ord, V: Default + Clone> OrderedMap<K, V> {
    /// Looks up `key`, returning a copy of its value and whether it was found.
    ///
    /// A miss yields `(V::default(), false)`; the flag tells a stored default
    /// value apart from a miss. Prefer [`get`] when a borrowed value will do.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.get_or_default(&1), (0, false));
    ///
    /// map.insert(1, 2);
    /// assert_eq!(map.get_or_default(&1), (2, true));
    /// ```
    ///
    /// [`get`]: Self::get
    #[must_use]
    pub fn get_or_default<Q>(&self, key: &Q) -> (V, bool)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key)
            .map_or_else(|| (V::default(), false), |value| (value.clone(), true))
    }

    /// Returns a copy of the value of the greatest key less than or equal to
    /// `key`, or `V::default()` if there is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("abc", "abc".to_string());
    /// map.insert("zzz", "zzz".to_string());
    ///
    /// assert_eq!(map.lower_nearest_or_default("abd2"), "abc");
    /// assert_eq!(map.lower_nearest_or_default("aaa"), "");
    /// ```
    #[must_use]
    pub fn lower_nearest_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lower_nearest(key).cloned().unwrap_or_default()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An in-order iterator over the entries of an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    /// Ancestors whose entry has not been yielded yet
    stack: SmallVec<[&'a Node<K, V>; INLINE_STACK]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, length: usize) -> Self {
        let mut iter = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An in-order iterator over the keys of an [`OrderedMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`], in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// An owning in-order iterator over the entries of an [`OrderedMap`].
///
/// Nodes are unlinked as they are yielded; dropping the iterator early
/// releases the rest without recursion.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn new(root: Link<K, V>, length: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: length,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining = self.remaining.saturating_sub(1);
        Some((*node).into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Releases nodes through an explicit work list, so dropping a degenerate
/// tree of any depth does not recurse once per level.
impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let length = mem::take(&mut self.length);
        IntoIter::new(self.root.take(), length)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two maps are equal when they hold the same entries; tree shape is ignored.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(OrderedMap<i32, String>: Send, Sync, Default);
static_assertions::assert_not_impl_any!(OrderedMap<std::rc::Rc<i32>, i32>: Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> OrderedMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
