extern crate self as next_crm;

pub mod api;
mod config;
mod crm;
mod document;
mod fixtures;
mod meta;
pub mod microsvc;
mod permission;

pub use config::{Config, ConfigError};
pub use crm::{
    link_targets, pick_primary, Address, Contact, ContactEmail, ContactLink, ContactPhone,
    ContactSummary, Crm, CrmError, DynamicLink, LinkFilter, LinkMatching, LinkTarget, Opportunity,
    OpportunityContact, OpportunityDetail, Primary, OPPORTUNITY,
};
pub use document::{
    DocsExt, Document, DocumentRepository, DocumentStore, InMemoryDocumentStore, StoreError,
    Versioned,
};
pub use fixtures::{FixtureError, Fixtures};
pub use meta::{MetadataProvider, StaticMetadata};
pub use permission::{AllowAll, PermissionChecker, PermissionType, RolePermissions, ADMINISTRATOR};

// Re-export the derive macro for `Document`
pub use next_crm_macros::Doctype;
