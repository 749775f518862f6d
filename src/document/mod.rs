//! Documents - named records of a doctype, held by a pluggable store.
//!
//! Every record type the CRM reads or writes (Opportunity, Contact, Address,
//! the `CRM Contacts` join rows) implements [`Document`] and is persisted
//! through a [`DocumentStore`].
//!
//! ## Example
//!
//! ```ignore
//! use next_crm::{Doctype, DocsExt, InMemoryDocumentStore};
//!
//! #[derive(Serialize, Deserialize, Clone, Doctype)]
//! #[doctype(name = "Opportunity")]
//! struct Opportunity {
//!     pub name: String,
//!     pub party_name: Option<String>,
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! store.docs::<Opportunity>().save(&opportunity)?;
//! let loaded = store.docs::<Opportunity>().require("OPP-0001")?;
//! ```

mod in_memory;
mod repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for records that live in the document store.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The doctype this record belongs to (e.g., "Opportunity", "Address").
    const DOCTYPE: &'static str;

    /// Returns the unique identifier (`name`) of this record.
    fn name(&self) -> &str;
}

/// A document together with the store version it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No document with this doctype and name.
    #[error("{doctype} {name} not found")]
    NotFound { doctype: String, name: String },
    /// Insert of a document that already exists.
    #[error("{doctype} {name} already exists")]
    Conflict { doctype: String, name: String },
    /// Serialization/deserialization error.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("document storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found<D: Document>(name: &str) -> Self {
        StoreError::NotFound {
            doctype: D::DOCTYPE.to_string(),
            name: name.to_string(),
        }
    }
}

pub use in_memory::InMemoryDocumentStore;
pub use repository::{DocsExt, DocumentRepository};
pub use store::DocumentStore;
