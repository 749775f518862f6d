//! Seed data for the in-memory store.
//!
//! A fixture file is a JSON object with one array per record type, plus
//! optional permission grants and UI metadata:
//!
//! ```json
//! {
//!   "opportunities": [{ "name": "OPP-1", "opportunity_from": "Customer", "party_name": "ACME" }],
//!   "contacts": [{ "name": "CONT-1", "email_ids": [{ "email_id": "a@acme.test", "is_primary": 1 }] }],
//!   "opportunity_contacts": [{ "name": "row-1", "parent": "OPP-1", "parenttype": "Opportunity", "contact": "CONT-1" }],
//!   "addresses": [{ "name": "ACME-Billing", "links": [] }],
//!   "grants": [{ "user": "sales@acme.test", "doctype": "Opportunity", "permission": "write" }],
//!   "fields": { "Opportunity": { "status": { "fieldtype": "Select" } } },
//!   "form_scripts": { "Opportunity": "class OpportunityForm {}" },
//!   "assignments": [{ "doctype": "Opportunity", "name": "OPP-1", "user": "sales@acme.test" }]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::crm::{Address, Contact, Opportunity, OpportunityContact};
use crate::document::{Document, DocumentStore, StoreError};
use crate::meta::StaticMetadata;
use crate::permission::{PermissionType, RolePermissions};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixtures: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fixtures: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub opportunities: Vec<Opportunity>,
    pub contacts: Vec<Contact>,
    pub opportunity_contacts: Vec<OpportunityContact>,
    pub addresses: Vec<Address>,
    pub grants: Vec<Grant>,
    /// Field schema per doctype, keyed by fieldname.
    pub fields: HashMap<String, Map<String, Value>>,
    pub form_scripts: HashMap<String, String>,
    pub assignments: Vec<Assignment>,
}

/// Permission grant on a whole doctype, or on one record when `name` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct Grant {
    pub user: String,
    pub doctype: String,
    pub permission: PermissionType,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub doctype: String,
    pub name: String,
    pub user: String,
}

impl Fixtures {
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Save every record into the store. Returns the number of records written.
    pub fn load_into<S: DocumentStore>(&self, store: &S) -> Result<usize, FixtureError> {
        let mut written = save_all(store, &self.opportunities)?;
        written += save_all(store, &self.contacts)?;
        written += save_all(store, &self.opportunity_contacts)?;
        written += save_all(store, &self.addresses)?;
        Ok(written)
    }

    pub fn permissions(&self) -> RolePermissions {
        self.grants
            .iter()
            .fold(RolePermissions::new(), |perms, grant| match &grant.name {
                Some(name) => perms.grant_record(&grant.user, &grant.doctype, grant.permission, name),
                None => perms.grant(&grant.user, &grant.doctype, grant.permission),
            })
    }

    pub fn metadata(&self) -> StaticMetadata {
        let mut meta = StaticMetadata::new();
        for (doctype, fields) in &self.fields {
            for (fieldname, field) in fields {
                meta = meta.with_field(doctype, fieldname, field.clone());
            }
        }
        for (doctype, script) in &self.form_scripts {
            meta = meta.with_form_script(doctype, script);
        }
        for assignment in &self.assignments {
            meta = meta.assign(&assignment.doctype, &assignment.name, &assignment.user);
        }
        meta
    }
}

fn save_all<S: DocumentStore, D: Document>(store: &S, docs: &[D]) -> Result<usize, StoreError> {
    for doc in docs {
        store.save_doc(doc)?;
    }
    tracing::debug!(doctype = D::DOCTYPE, count = docs.len(), "fixtures loaded");
    Ok(docs.len())
}
