//! Store façade tying the ordered sequence, keyed index and undo history
//! together.

use crate::error::{Result, StoreError};
use crate::history::UndoStack;
use crate::index::KeyedIndex;
use crate::models::{Record, RecordRef, Token};
use crate::security::AuthorizationGate;
use crate::sequence::OrderedSequence;
use crate::sorting::SortAlgorithm;
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, warn};

/// Outcome of [`PasswordStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The record is reachable by key.
    Indexed,
    /// Another record already holds the key. The new record was appended to
    /// the insertion order but is not searchable.
    Shadowed,
}

/// Counters describing the current shape of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub records: usize,
    pub indexed: usize,
    pub height: usize,
    pub undo_depth: usize,
}

/// In-memory password store.
///
/// Every record is linked into the insertion-ordered sequence and, unless
/// its key was already taken, into the keyed index. Both hold the same
/// shared record. Each add and remove also pushes the record onto the undo
/// history.
#[derive(Debug, Default)]
pub struct PasswordStore {
    sequence: OrderedSequence,
    index: KeyedIndex,
    history: UndoStack,
}

impl PasswordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Obscure `plaintext` with `token` and store it under `key`.
    pub fn add(&mut self, key: &str, plaintext: &str, token: &str) -> Result<Insertion> {
        let token = Token::try_from(token)?;
        let record = Rc::new(Record::new(key, plaintext, token));

        let node = self.sequence.append(Rc::clone(&record));
        let indexed = self.index.insert(RecordRef {
            node,
            record: Rc::clone(&record),
        });
        self.history.push(record);

        let outcome = if indexed {
            debug!(key, "record added");
            Insertion::Indexed
        } else {
            warn!(key, "key already indexed, record kept in insertion order only");
            Insertion::Shadowed
        };

        debug_assert!(self.check_consistency());
        Ok(outcome)
    }

    /// Remove the record stored under `key` once `gate` grants access.
    pub fn remove<G>(&mut self, key: &str, gate: &mut G) -> Result<Rc<Record>>
    where
        G: AuthorizationGate + ?Sized,
    {
        if !gate.authorize() {
            warn!(key, "removal denied");
            return Err(StoreError::Unauthorized);
        }

        let entry = self
            .index
            .delete(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let unlinked = self.sequence.remove(entry.node);
        debug_assert!(
            unlinked.is_some_and(|record| Rc::ptr_eq(&record, &entry.record)),
            "indexed record was not linked at its sequence node"
        );

        self.history.push(Rc::clone(&entry.record));
        debug!(key, "record removed");

        debug_assert!(self.check_consistency());
        Ok(entry.record)
    }

    /// Look up the record stored under `key`.
    pub fn search(&self, key: &str) -> Result<&Rc<Record>> {
        self.index
            .search(key)
            .map(|entry| &entry.record)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Recover the plaintext stored under `key` using `candidate` as token.
    pub fn reveal(&self, key: &str, candidate: &str) -> Result<String> {
        self.search(key)?.reveal(candidate)
    }

    /// Report the record affected by the latest add or remove.
    ///
    /// This does not reverse anything: an added record stays searchable and a
    /// removed one stays gone.
    pub fn undo(&mut self) -> Result<Rc<Record>> {
        let record = self.history.pop().ok_or(StoreError::NothingToUndo)?;
        debug!(key = record.key(), "undo reported last affected record");
        Ok(record)
    }

    /// Rebuild the keyed index balanced. Insertion order is not affected.
    pub fn sort(&mut self, algorithm: SortAlgorithm) {
        self.index.sort(algorithm);
        debug!(%algorithm, height = self.index.height(), "index rebuilt");
        debug_assert!(self.check_consistency());
    }

    /// `(key, obscured secret)` pairs in ascending key order.
    pub fn list_all(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.index
            .iter()
            .map(|entry| (entry.record.key(), entry.record.secret()))
    }

    /// Records in the order they were added, shadowed duplicates included.
    pub fn history(&self) -> impl Iterator<Item = &Rc<Record>> + '_ {
        self.sequence.iter()
    }

    /// Number of records in insertion order.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of records reachable by key.
    pub fn indexed_len(&self) -> usize {
        self.index.len()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            records: self.sequence.len(),
            indexed: self.index.len(),
            height: self.index.height(),
            undo_depth: self.history.len(),
        }
    }

    /// Cross-check the index against the sequence.
    ///
    /// Holds when the index is a valid search tree and every indexed record
    /// is the very record linked at its sequence node.
    pub fn check_consistency(&self) -> bool {
        self.index.is_valid()
            && self.index.len() <= self.sequence.len()
            && self.index.iter().all(|entry| {
                self.sequence
                    .get(entry.node)
                    .is_some_and(|linked| Rc::ptr_eq(linked, &entry.record))
            })
    }
}
