//! InMemoryDocumentStore - HashMap-backed document store for tests and local serving.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Document, DocumentStore, StoreError, Versioned};

/// Internal stored representation of a document.
#[derive(Clone)]
struct StoredDocument {
    bytes: Vec<u8>,
    version: u64,
    /// Position in store-default order (first insertion wins).
    seq: u64,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<String, StoredDocument>,
    cache: HashMap<String, StoredDocument>,
    next_seq: u64,
}

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"Doctype:name"`. Clone-friendly via Arc. Cached reads are
/// served from a separate map that is filled on miss and invalidated when the
/// document is saved or deleted.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(doctype: &str, name: &str) -> String {
        format!("{}:{}", doctype, name)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn decode<D: Document>(stored: &StoredDocument) -> Result<Versioned<D>, StoreError> {
        let data: D =
            serde_json::from_slice(&stored.bytes).map_err(|e| StoreError::Serde(e.to_string()))?;
        Ok(Versioned {
            data,
            version: stored.version,
        })
    }

    fn put<D: Document>(inner: &mut Inner, key: String, doc: &D) -> Result<Versioned<D>, StoreError> {
        let bytes = serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))?;

        let (version, seq) = match inner.documents.get(&key) {
            Some(existing) => (existing.version + 1, existing.seq),
            None => {
                inner.next_seq += 1;
                (1, inner.next_seq)
            }
        };

        inner.cache.remove(&key);
        inner.documents.insert(
            key,
            StoredDocument {
                bytes,
                version,
                seq,
            },
        );

        Ok(Versioned {
            data: doc.clone(),
            version,
        })
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get_doc<D: Document>(&self, name: &str) -> Result<Option<Versioned<D>>, StoreError> {
        let key = Self::make_key(D::DOCTYPE, name);
        let inner = self.read()?;
        inner.documents.get(&key).map(Self::decode::<D>).transpose()
    }

    fn get_cached_doc<D: Document>(&self, name: &str) -> Result<Option<Versioned<D>>, StoreError> {
        let key = Self::make_key(D::DOCTYPE, name);

        if let Some(cached) = self.read()?.cache.get(&key) {
            return Self::decode(cached).map(Some);
        }

        let mut inner = self.write()?;
        let Some(stored) = inner.documents.get(&key).cloned() else {
            return Ok(None);
        };
        let doc = Self::decode(&stored)?;
        inner.cache.insert(key, stored);
        Ok(Some(doc))
    }

    fn save_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        let key = Self::make_key(D::DOCTYPE, doc.name());
        let mut inner = self.write()?;
        Self::put(&mut inner, key, doc)
    }

    fn insert_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        let key = Self::make_key(D::DOCTYPE, doc.name());
        let mut inner = self.write()?;

        if inner.documents.contains_key(&key) {
            return Err(StoreError::Conflict {
                doctype: D::DOCTYPE.to_string(),
                name: doc.name().to_string(),
            });
        }

        Self::put(&mut inner, key, doc)
    }

    fn delete_doc<D: Document>(&self, name: &str) -> Result<bool, StoreError> {
        let key = Self::make_key(D::DOCTYPE, name);
        let mut inner = self.write()?;
        inner.cache.remove(&key);
        Ok(inner.documents.remove(&key).is_some())
    }

    fn find_docs<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Versioned<D>>, StoreError> {
        let inner = self.read()?;
        let prefix = format!("{}:", D::DOCTYPE);

        let mut matches = Vec::new();
        for (key, stored) in inner.documents.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let doc = Self::decode::<D>(stored)?;
            if predicate(&doc.data) {
                matches.push((stored.seq, doc));
            }
        }

        matches.sort_by_key(|(seq, _)| *seq);
        Ok(matches.into_iter().map(|(_, doc)| doc).collect())
    }
}
