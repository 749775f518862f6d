//! Remote-callable procedures of the opportunity page.
//!
//! | Command | Input | Output |
//! |---|---|---|
//! | `opportunity.get` | `{ name }` | enriched opportunity |
//! | `opportunity.contacts` | `{ name }` | contact summaries |
//! | `opportunity.addresses` | `{ name }` | addresses |
//! | `opportunity.add_address` | `{ opportunity, address }` | `true` |
//! | `opportunity.remove_address` | `{ opportunity, address }` | `true` |

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crm::Crm;
use crate::document::DocumentStore;
use crate::meta::MetadataProvider;
use crate::microsvc::{HandlerError, Service};
use crate::permission::PermissionChecker;

/// Build a service with every opportunity command registered.
pub fn service<S, P, M>(crm: Crm<S, P, M>) -> Service<Crm<S, P, M>>
where
    S: DocumentStore + 'static,
    P: PermissionChecker + 'static,
    M: MetadataProvider + 'static,
{
    crate::register_handlers!(
        Service::new(crm),
        handlers::opportunity_get,
        handlers::opportunity_contacts,
        handlers::opportunity_addresses,
        handlers::address_add,
        handlers::address_remove,
    )
}

/// `{ "name": ... }`
#[derive(Debug, Deserialize)]
pub struct NameInput {
    pub name: String,
}

/// `{ "opportunity": ..., "address": ... }`
#[derive(Debug, Deserialize)]
pub struct AddressInput {
    pub opportunity: String,
    pub address: String,
}

pub(crate) fn encode<T: Serialize>(value: T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(|e| HandlerError::Other(Box::new(e)))
}
