//! Insertion-ordered doubly linked list of records.
//!
//! Nodes live in a slot vector and link to each other by slot index, so a
//! node can be detached in O(1) given its [`NodeId`]. Freed slots are reused
//! by later appends.

use crate::models::Record;
use std::rc::Rc;

/// Stable handle to a node in an [`OrderedSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    record: Rc<Record>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Records in the order they were added.
#[derive(Debug, Default)]
pub struct OrderedSequence {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl OrderedSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Link `record` in at the tail.
    pub fn append(&mut self, record: Rc<Record>) -> NodeId {
        let node = Node {
            record,
            prev: self.tail,
            next: None,
        };

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Detach a node, relinking its neighbours. Returns `None` if the handle
    /// does not name a live node.
    pub fn remove(&mut self, id: NodeId) -> Option<Rc<Record>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.len -= 1;
        Some(node.record)
    }

    /// Record stored at `id`, if the node is live.
    pub fn get(&self, id: NodeId) -> Option<&Rc<Record>> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|node| &node.record)
    }

    /// Whether this exact record (not merely its key) is linked in.
    pub fn contains(&self, record: &Rc<Record>) -> bool {
        self.iter().any(|linked| Rc::ptr_eq(linked, record))
    }

    /// Walk head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            sequence: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Walk tail to head.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            sequence: self,
            cursor: self.tail,
            forward: false,
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        self.slots[id.0]
            .as_ref()
            .unwrap_or_else(|| panic!("sequence link to freed slot {}", id.0))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.0]
            .as_mut()
            .unwrap_or_else(|| panic!("sequence link to freed slot {}", id.0))
    }
}

/// Iterator over an [`OrderedSequence`] in either direction.
pub struct Iter<'a> {
    sequence: &'a OrderedSequence,
    cursor: Option<NodeId>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Rc<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.sequence.node(self.cursor?);
        self.cursor = if self.forward { node.next } else { node.prev };
        Some(&node.record)
    }
}
