//! DocumentStore - Abstract record storage keyed by doctype and name.

use super::{Document, StoreError, Versioned};

/// Abstract storage for documents.
///
/// Saves are plain read-modify-write upserts: two callers that read the same
/// version and both save will lose one of the updates.
pub trait DocumentStore: Send + Sync {
    /// Get a document by name, reading storage. Returns None if not found.
    fn get_doc<D: Document>(&self, name: &str) -> Result<Option<Versioned<D>>, StoreError>;

    /// Get a document by name, possibly from a process-local cache.
    ///
    /// Stores without a cache read storage.
    fn get_cached_doc<D: Document>(&self, name: &str) -> Result<Option<Versioned<D>>, StoreError> {
        self.get_doc(name)
    }

    /// Upsert a document (insert or update, no version check).
    fn save_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError>;

    /// Insert a new document. Fails if it already exists.
    fn insert_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError>;

    /// Delete a document by name. Returns true if it existed.
    fn delete_doc<D: Document>(&self, name: &str) -> Result<bool, StoreError>;

    /// Find documents matching a predicate, in store-default order.
    fn find_docs<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Versioned<D>>, StoreError>;

    /// Find the first document matching a predicate, in store-default order.
    fn find_one_doc<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<Versioned<D>>, StoreError> {
        Ok(self.find_docs(predicate)?.into_iter().next())
    }
}
