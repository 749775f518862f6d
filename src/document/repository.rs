//! DocumentRepository - Typed accessor for one doctype on any DocumentStore.

use std::marker::PhantomData;

use super::{Document, DocumentStore, StoreError, Versioned};

/// Typed repository wrapper for accessing documents of a specific doctype.
///
/// Provides short method names by delegating to `DocumentStore`, plus
/// `require*` variants that turn a miss into `StoreError::NotFound`.
pub struct DocumentRepository<'a, S, D> {
    store: &'a S,
    _marker: PhantomData<D>,
}

impl<'a, S: DocumentStore, D: Document> DocumentRepository<'a, S, D> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a document by name.
    pub fn get(&self, name: &str) -> Result<Option<Versioned<D>>, StoreError> {
        self.store.get_doc(name)
    }

    /// Get a document by name, allowing a cached copy.
    pub fn get_cached(&self, name: &str) -> Result<Option<Versioned<D>>, StoreError> {
        self.store.get_cached_doc(name)
    }

    /// Get a document by name or fail with `NotFound`.
    pub fn require(&self, name: &str) -> Result<D, StoreError> {
        self.get(name)?
            .map(|doc| doc.data)
            .ok_or_else(|| StoreError::not_found::<D>(name))
    }

    /// Get a possibly cached document by name or fail with `NotFound`.
    pub fn require_cached(&self, name: &str) -> Result<D, StoreError> {
        self.get_cached(name)?
            .map(|doc| doc.data)
            .ok_or_else(|| StoreError::not_found::<D>(name))
    }

    /// Upsert a document.
    pub fn save(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        self.store.save_doc(doc)
    }

    /// Insert a new document. Fails if it already exists.
    pub fn insert(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        self.store.insert_doc(doc)
    }

    /// Delete a document by name. Returns true if it existed.
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        self.store.delete_doc::<D>(name)
    }

    /// Find documents matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<Versioned<D>>, StoreError> {
        self.store.find_docs(predicate)
    }

    /// Find the first document matching a predicate.
    pub fn find_one(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Option<Versioned<D>>, StoreError> {
        self.store.find_one_doc(predicate)
    }
}

/// Extension trait for typed document access on any DocumentStore.
pub trait DocsExt: DocumentStore + Sized {
    /// Get a typed document repository.
    fn docs<D: Document>(&self) -> DocumentRepository<'_, Self, D> {
        DocumentRepository::new(self)
    }
}

impl<S: DocumentStore> DocsExt for S {}
