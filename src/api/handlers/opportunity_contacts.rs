//! Handler: opportunity.contacts

use serde_json::Value;

use crate::api::{encode, NameInput};
use crate::crm::Crm;
use crate::document::DocumentStore;
use crate::meta::MetadataProvider;
use crate::microsvc::{Context, HandlerError};
use crate::permission::PermissionChecker;

pub const COMMAND: &str = "opportunity.contacts";

pub fn guard<B>(ctx: &Context<B>) -> bool {
    ctx.has_identifiers(&["name"])
}

pub fn handle<S, P, M>(ctx: &Context<Crm<S, P, M>>) -> Result<Value, HandlerError>
where
    S: DocumentStore,
    P: PermissionChecker,
    M: MetadataProvider,
{
    let input = ctx.input::<NameInput>()?;
    encode(ctx.backend().get_opportunity_contacts(&input.name)?)
}
