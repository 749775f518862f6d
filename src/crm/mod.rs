//! CRM opportunity backend.
//!
//! `Crm<S, P, M>` bundles the three collaborators every operation needs:
//! a [`DocumentStore`], a [`PermissionChecker`] and a [`MetadataProvider`].
//! It holds no state of its own between calls.
//!
//! ## Example
//!
//! ```ignore
//! use next_crm::{AllowAll, Crm, InMemoryDocumentStore, StaticMetadata};
//!
//! let crm = Crm::new(InMemoryDocumentStore::new(), AllowAll, StaticMetadata::new());
//! let detail = crm.get_opportunity("OPP-0001")?;
//! crm.add_address("OPP-0001", "ACME-Billing", Some("sales@example.com"))?;
//! ```

mod addresses;
mod contacts;
mod links;
mod opportunity;
mod primary;
mod records;

use crate::document::{DocumentStore, StoreError};
use crate::meta::MetadataProvider;
use crate::permission::{PermissionChecker, PermissionType};

pub use links::{link_targets, LinkFilter, LinkMatching, LinkTarget};
pub use primary::{pick_primary, Primary};
pub use records::{
    Address, Contact, ContactEmail, ContactLink, ContactPhone, ContactSummary, DynamicLink,
    Opportunity, OpportunityContact, OpportunityDetail, OPPORTUNITY,
};

/// Errors surfaced to the caller of a CRM operation.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    /// The identifier does not resolve to a record.
    #[error("{0}")]
    NotFound(String),
    /// The caller lacks the required access.
    #[error("{0}")]
    PermissionDenied(String),
    /// Any other store failure, passed through unchanged.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CrmError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => CrmError::NotFound(err.to_string()),
            other => CrmError::Store(other),
        }
    }
}

/// The opportunity backend: store, permissions and UI metadata.
pub struct Crm<S, P, M> {
    store: S,
    permissions: P,
    meta: M,
    link_matching: LinkMatching,
}

impl<S, P, M> Crm<S, P, M>
where
    S: DocumentStore,
    P: PermissionChecker,
    M: MetadataProvider,
{
    pub fn new(store: S, permissions: P, meta: M) -> Self {
        Self {
            store,
            permissions,
            meta,
            link_matching: LinkMatching::default(),
        }
    }

    /// Choose how address links are matched against opportunities.
    pub fn with_link_matching(mut self, link_matching: LinkMatching) -> Self {
        self.link_matching = link_matching;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    pub fn meta(&self) -> &M {
        &self.meta
    }

    pub fn link_matching(&self) -> LinkMatching {
        self.link_matching
    }

    /// Fail with `PermissionDenied(message)` unless `user` may `ptype` the record.
    pub(crate) fn require_permission(
        &self,
        doctype: &str,
        ptype: PermissionType,
        name: &str,
        user: Option<&str>,
        message: impl FnOnce() -> String,
    ) -> Result<(), CrmError> {
        if self.permissions.has_permission(doctype, ptype, name, user) {
            return Ok(());
        }
        tracing::warn!(
            doctype,
            name,
            permission = %ptype,
            user = user.unwrap_or("Guest"),
            "permission denied"
        );
        Err(CrmError::PermissionDenied(message()))
    }
}
