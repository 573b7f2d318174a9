use std::cmp::Ordering;
use std::fmt;
use parking_lot::RwLock;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Monster, MonsterId, User, UserId};

/// A document that can live in a [`Collection`]
pub trait Record: Clone {
    type Id: Copy + Eq + fmt::Display;

    /// Human-readable name used in error messages
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

/// Records carrying a revision counter for conditional replace
pub trait Versioned: Record {
    fn revision(&self) -> u64;
    fn set_revision(&mut self, revision: u64);
}

impl Record for Monster {
    type Id = MonsterId;
    const KIND: &'static str = "Monster";

    fn id(&self) -> MonsterId {
        self.id
    }
}

impl Versioned for Monster {
    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}

impl Record for User {
    type Id = UserId;
    const KIND: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }
}

impl Versioned for User {
    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}

pub type Comparator<'a, T> = &'a dyn Fn(&T, &T) -> Ordering;

/// Paging and ordering for [`Collection::find`]
pub struct FindOptions<'a, T> {
    pub sort: Option<Comparator<'a, T>>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl<'a, T> FindOptions<'a, T> {
    pub fn new() -> Self {
        FindOptions {
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    pub fn sort(mut self, cmp: Comparator<'a, T>) -> Self {
        self.sort = Some(cmp);
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<T> Default for FindOptions<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-ordered in-memory document collection
///
/// Every method takes the lock exactly once, so two calls made by the same
/// request may observe different states under concurrent writes.
pub struct Collection<T: Record> {
    docs: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Collection {
            docs: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, doc: T) -> Result<()> {
        let mut docs = self.docs.write();
        if docs.iter().any(|d| d.id() == doc.id()) {
            return Err(Error::new(
                ErrorKind::Conflict,
                format!("{} {} already exists", T::KIND, doc.id()),
            ));
        }
        docs.push(doc);
        Ok(())
    }

    pub fn get(&self, id: T::Id) -> Option<T> {
        self.docs.read().iter().find(|d| d.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Matching documents, sorted (stable) and then windowed by skip/limit
    pub fn find<P>(&self, predicate: P, options: &FindOptions<'_, T>) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let docs = self.docs.read();

        if let Some(cmp) = options.sort {
            let mut matched: Vec<&T> = docs.iter().filter(|d| predicate(*d)).collect();
            matched.sort_by(|a, b| cmp(*a, *b));
            return window(matched.into_iter(), options).cloned().collect();
        }

        window(docs.iter().filter(|d| predicate(*d)), options)
            .cloned()
            .collect()
    }

    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.docs.read().iter().filter(|d| predicate(*d)).count()
    }

    /// First matching document under `cmp`; ties resolve to insertion order
    pub fn find_one_sorted<P>(&self, predicate: P, cmp: Comparator<'_, T>) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.docs
            .read()
            .iter()
            .filter(|d| predicate(*d))
            .fold(None, |best: Option<&T>, doc| match best {
                Some(b) if cmp(doc, b) != Ordering::Less => Some(b),
                _ => Some(doc),
            })
            .cloned()
    }

    /// Snapshot of every matching document in insertion order
    pub fn scan<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.find(predicate, &FindOptions::new())
    }
}

impl<T: Versioned> Collection<T> {
    /// Replace a document only if its stored revision still equals `expected`.
    /// Returns the stored copy with its revision bumped.
    pub fn replace(&self, mut doc: T, expected: u64) -> Result<T> {
        let mut docs = self.docs.write();
        let id = doc.id();

        let slot = docs
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| Error::not_found(T::KIND, id))?;

        if slot.revision() != expected {
            return Err(Error::new(
                ErrorKind::Conflict,
                format!(
                    "{} {} changed concurrently (expected revision {}, found {})",
                    T::KIND,
                    id,
                    expected,
                    slot.revision()
                ),
            ));
        }

        doc.set_revision(expected + 1);
        *slot = doc.clone();
        Ok(doc)
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn window<'d, T, I>(iter: I, options: &FindOptions<'_, T>) -> impl Iterator<Item = &'d T>
where
    T: 'd,
    I: Iterator<Item = &'d T>,
{
    iter.skip(options.skip).take(options.limit.unwrap_or(usize::MAX))
}
