//! Undo history of the records touched by add and remove.
//!
//! Popping only reports which record was affected last. Nothing is re-added
//! or re-removed.

use crate::models::Record;
use std::rc::Rc;

/// LIFO stack of affected records.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Vec<Rc<Record>>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Rc<Record>) {
        self.entries.push(record);
    }

    pub fn pop(&mut self) -> Option<Rc<Record>> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&Rc<Record>> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
