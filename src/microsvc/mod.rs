//! Convention-based command handler framework.
//!
//! Remote-callable procedures are registered as named commands on a
//! `Service`. Each handler receives a `Context<B>` with access to the input
//! payload, session variables, and the backend.
//!
//! ## Handler Convention
//!
//! ```ignore
//! // src/api/handlers/opportunity_get.rs
//!
//! pub const COMMAND: &str = "opportunity.get";
//!
//! pub fn guard<B>(ctx: &microsvc::Context<B>) -> bool {
//!     ctx.has_identifiers(&["name"])
//! }
//!
//! pub fn handle<S, P, M>(ctx: &microsvc::Context<Crm<S, P, M>>) -> Result<Value, HandlerError> {
//!     let input = ctx.input::<Input>()?;
//!     encode(ctx.backend().get_opportunity(&input.name)?)
//! }
//! ```

mod context;
mod error;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::{Session, USER_ID};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str`, the command name
/// - `guard(ctx) -> bool`, input validation
/// - `handle(ctx) -> Result<Value, HandlerError>`, the handler
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
