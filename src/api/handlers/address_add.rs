//! Handler: opportunity.add_address
//!
//! Requires write access on the opportunity for the session user.

use serde_json::Value;

use crate::api::AddressInput;
use crate::crm::Crm;
use crate::document::DocumentStore;
use crate::meta::MetadataProvider;
use crate::microsvc::{Context, HandlerError};
use crate::permission::PermissionChecker;

pub const COMMAND: &str = "opportunity.add_address";

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
        .add_address(&input.opportunity, &input.address, ctx.user_id())?;
    Ok(Value::Bool(true))
}
