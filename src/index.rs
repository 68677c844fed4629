//! Binary search tree over records, keyed by site.
//!
//! The tree is not self-balancing. Ordinary inserts and deletes can degrade
//! it into a list; [`KeyedIndex::sort`] flattens it, sorts the entries and
//! rebuilds a perfectly balanced tree. Insert, search, delete and traversal
//! are iterative because depth is bounded only by the number of entries.

use crate::models::RecordRef;
use crate::sorting::SortAlgorithm;
use std::cmp::Ordering;
use std::mem;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    entry: RecordRef,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(entry: RecordRef) -> Box<Self> {
        Box::new(Self {
            entry,
            left: None,
            right: None,
        })
    }
}

/// Keyed index over the records in a store.
#[derive(Debug, Default)]
pub struct KeyedIndex {
    root: Link,
    len: usize,
}

impl KeyedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert `entry` under its key.
    ///
    /// Returns `false` and leaves the tree untouched when the key is already
    /// present: the first record inserted under a key keeps it.
    pub fn insert(&mut self, entry: RecordRef) -> bool {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            cursor = match entry.key().cmp(node.entry.key()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *cursor = Some(Node::leaf(entry));
        self.len += 1;
        true
    }

    /// Find the entry stored under `key`.
    pub fn search(&self, key: &str) -> Option<&RecordRef> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(node.entry.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.entry),
            };
        }
        None
    }

    /// Remove the entry stored under `key`.
    ///
    /// A node with two children takes over the entry of its in-order
    /// successor, and the successor's node is unlinked from the right
    /// subtree instead.
    pub fn delete(&mut self, key: &str) -> Option<RecordRef> {
        let mut cursor = &mut self.root;
        loop {
            let ordering = key.cmp(cursor.as_ref()?.entry.key());
            cursor = match ordering {
                Ordering::Less => &mut cursor.as_mut()?.left,
                Ordering::Greater => &mut cursor.as_mut()?.right,
                Ordering::Equal => break,
            };
        }

        let node = cursor.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            let successor = take_min(&mut node.right)?;
            self.len -= 1;
            return Some(mem::replace(&mut node.entry, successor));
        }

        let node = cursor.take()?;
        let Node { entry, left, right } = *node;
        *cursor = left.or(right);
        self.len -= 1;
        Some(entry)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Collect the entries in ascending key order.
    pub fn traverse_in_order(&self) -> Vec<RecordRef> {
        self.iter().cloned().collect()
    }

    /// Flatten the tree, sort the entries by key with `algorithm` and rebuild
    /// it balanced, picking the middle of each range as the subtree root.
    pub fn sort(&mut self, algorithm: SortAlgorithm) {
        let mut entries = self.drain_preorder();
        algorithm.sort_by_key(&mut entries, RecordRef::key);

        let count = entries.len();
        self.root = build_balanced(count, &mut entries.into_iter());
        self.len = count;
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }

    /// Check strict search-tree ordering at every node.
    pub fn is_valid(&self) -> bool {
        let mut stack: Vec<(&Node, Option<&str>, Option<&str>)> = self
            .root
            .as_deref()
            .map(|n| (n, None, None))
            .into_iter()
            .collect();

        while let Some((node, lower, upper)) = stack.pop() {
            let key = node.entry.key();
            if lower.is_some_and(|bound| key <= bound)
                || upper.is_some_and(|bound| key >= bound)
            {
                return false;
            }
            stack.extend(node.left.as_deref().map(|n| (n, lower, Some(key))));
            stack.extend(node.right.as_deref().map(|n| (n, Some(key), upper)));
        }
        true
    }

    /// Take every entry out of the tree in pre-order, leaving it empty.
    fn drain_preorder(&mut self) -> Vec<RecordRef> {
        let mut entries = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.right.take());
            stack.extend(node.left.take());
            entries.push(node.entry);
        }
        self.len = 0;
        entries
    }
}

impl Drop for KeyedIndex {
    fn drop(&mut self) {
        // Unlink iteratively so a degenerate tree cannot overflow the stack.
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Detach the leftmost node under `link` and return its entry.
fn take_min(link: &mut Link) -> Option<RecordRef> {
    let mut cursor = link;
    while cursor.as_ref()?.left.is_some() {
        cursor = &mut cursor.as_mut()?.left;
    }
    let node = cursor.take()?;
    let Node { entry, right, .. } = *node;
    *cursor = right;
    Some(entry)
}

/// Build a balanced tree from `count` entries yielded in ascending order.
fn build_balanced(count: usize, entries: &mut impl Iterator<Item = RecordRef>) -> Link {
    if count == 0 {
        return None;
    }
    let left_count = (count - 1) / 2;
    let left = build_balanced(left_count, entries);
    let entry = entries.next()?;
    let right = build_balanced(count - 1 - left_count, entries);
    Some(Box::new(Node { entry, left, right }))
}

/// In-order iterator over a [`KeyedIndex`].
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn push_left(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a RecordRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.entry)
    }
}
