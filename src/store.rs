//! Document store adapter.
//!
//! The engine only ever talks to a [`DocumentStore`]; it reads a whole
//! document, changes it in memory and writes the whole document back.
//! Two concurrent writers to the same document can therefore lose an
//! update, exactly like a plain find/save against a document database.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;
use uuid::Uuid;

/// Anything that can live in a collection.
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document {0} no longer exists")]
    Missing(Uuid),
    #[error("document {0} already exists")]
    Duplicate(Uuid),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait DocumentStore<D: Document>: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, StoreError>;

    /// Every document, newest `created_at` first. Ties keep insertion order.
    async fn find_newest_first(&self) -> Result<Vec<D>, StoreError>;

    async fn insert(&self, doc: D) -> Result<(), StoreError>;

    /// Replaces the stored document with the same id.
    async fn update(&self, doc: D) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<D>, StoreError>;

    async fn delete_where(
        &self,
        predicate: &(dyn for<'a> Fn(&'a D) -> bool + Send + Sync),
    ) -> Result<usize, StoreError>;
}

#[derive(Debug, Clone)]
struct Stored<D> {
    seq: u64,
    doc: D,
}

/// In-process collection backed by a `DashMap`.
#[derive(Debug, Clone)]
pub struct MemoryStore<D> {
    docs: Arc<DashMap<Uuid, Stored<D>>>,
    next_seq: Arc<AtomicU64>,
}

impl<D> Default for MemoryStore<D> {
    fn default() -> Self {
        Self {
            docs: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<D> MemoryStore<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl<D: Document> DocumentStore<D> for MemoryStore<D> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, StoreError> {
        Ok(self.docs.get(&id).map(|entry| entry.doc.clone()))
    }

    async fn find_newest_first(&self) -> Result<Vec<D>, StoreError> {
        let mut stored: Vec<(u64, D)> = self
            .docs
            .iter()
            .map(|entry| (entry.seq, entry.doc.clone()))
            .collect();

        stored.sort_by_key(|(seq, _)| *seq);
        // Stable sort, so equal timestamps stay in insertion order
        stored.sort_by(|(_, a), (_, b)| b.created_at().cmp(&a.created_at()));

        Ok(stored.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn insert(&self, doc: D) -> Result<(), StoreError> {
        let id = doc.id();
        match self.docs.entry(id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(id)),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Stored { seq, doc });
                Ok(())
            }
        }
    }

    async fn update(&self, doc: D) -> Result<(), StoreError> {
        let id = doc.id();
        let mut entry = self.docs.get_mut(&id).ok_or(StoreError::Missing(id))?;
        entry.doc = doc;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<D>, StoreError> {
        Ok(self.docs.remove(&id).map(|(_, stored)| stored.doc))
    }

    async fn delete_where(
        &self,
        predicate: &(dyn for<'a> Fn(&'a D) -> bool + Send + Sync),
    ) -> Result<usize, StoreError> {
        let doomed: Vec<Uuid> = self
            .docs
            .iter()
            .filter(|entry| predicate(&entry.doc))
            .map(|entry| *entry.key())
            .collect();

        let removed = doomed
            .into_iter()
            .filter(|id| self.docs.remove(id).is_some())
            .count();

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Uuid,
        at: DateTime<Utc>,
        body: &'static str,
    }

    impl Document for Note {
        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    fn note(at: DateTime<Utc>, body: &'static str) -> Note {
        Note {
            id: Uuid::new_v4(),
            at,
            body,
        }
    }

    #[tokio::test]
    async fn find_newest_first_keeps_insertion_order_for_ties() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store.insert(note(now - Duration::seconds(5), "old")).await.unwrap();
        store.insert(note(now, "tie-a")).await.unwrap();
        store.insert(note(now + Duration::seconds(5), "new")).await.unwrap();
        store.insert(note(now, "tie-b")).await.unwrap();

        let bodies: Vec<_> = store
            .find_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.body)
            .collect();
        assert_eq!(bodies, vec!["new", "tie-a", "tie-b", "old"]);
    }

    #[tokio::test]
    async fn delete_where_accepts_borrowing_predicates() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.insert(note(now, "keep")).await.unwrap();
        store.insert(note(now, "drop-me")).await.unwrap();

        let prefix = String::from("drop");
        let predicate = |n: &Note| n.body.starts_with(prefix.as_str());
        assert_eq!(store.delete_where(&predicate).await.unwrap(), 1);

        let left = store.find_newest_first().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].body, "keep");
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let store = MemoryStore::new();
        let n = note(Utc::now(), "x");
        store.insert(n.clone()).await.unwrap();
        assert_eq!(store.insert(n.clone()).await, Err(StoreError::Duplicate(n.id)));
    }

    #[tokio::test]
    async fn update_replaces_whole_document() {
        let store = MemoryStore::new();
        let mut n = note(Utc::now(), "before");
        store.insert(n.clone()).await.unwrap();

        n.body = "after";
        store.update(n.clone()).await.unwrap();
        assert_eq!(store.find_by_id(n.id).await.unwrap(), Some(n));
    }

    #[tokio::test]
    async fn update_of_deleted_document_fails() {
        let store = MemoryStore::new();
        let n = note(Utc::now(), "gone");
        store.insert(n.clone()).await.unwrap();
        store.delete_by_id(n.id).await.unwrap();

        assert_eq!(store.update(n.clone()).await, Err(StoreError::Missing(n.id)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_where_removes_matching_documents() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.insert(note(now, "keep")).await.unwrap();
        store.insert(note(now, "drop")).await.unwrap();
        store.insert(note(now, "drop")).await.unwrap();

        let removed = store.delete_where(&|n: &Note| n.body == "drop").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
    }
}
