//! Handler: opportunity.remove_address

use serde_json::Value;

use crate::api::AddressInput;
use crate::crm::Crm;
use crate::document::DocumentStore;
use crate::meta::MetadataProvider;
use crate::microsvc::{Context, HandlerError};
use crate::permission::PermissionChecker;

pub const COMMAND: &str = "opportunity.remove_address";

pub fn guard<B>(ctx: &Context<B>) -> bool {
    ctx.has_identifiers(&["opportunity", "address"])
}

pub fn handle<S, P, M>(ctx: &Context<Crm<S, P, M>>) -> Result<Value, HandlerError>
where
    S: DocumentStore,
    P: PermissionChecker,
    M: MetadataProvider,
{
    let input = ctx.input::<AddressInput>()?;
    ctx.backend()
        .remove_address(&input.opportunity, &input.address, ctx.user_id())?;
    Ok(Value::Bool(true))
}
