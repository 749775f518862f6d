//! Command handler registry and dispatch.
//!
//! `Service<B>` holds a backend and a set of named command handlers.
//! Each handler receives a `Context<B>` and returns `Result<Value, HandlerError>`.
//!
//! ## Example
//!
//! ```ignore
//! use next_crm::microsvc::{Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(crm)
//!     .command("opportunity.get", |ctx| {
//!         let input = ctx.input::<Input>()?;
//!         Ok(serde_json::to_value(ctx.backend().get_opportunity(&input.name)?)?)
//!     });
//!
//! let result = service.dispatch("opportunity.get", json!({"name": "OPP-1"}), Session::new());
//! ```

use std::collections::HashMap;

use serde_json::Value;

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type Guard<B> = Box<dyn Fn(&Context<B>) -> bool + Send + Sync>;
type Handle<B> = Box<dyn Fn(&Context<B>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<B> {
    guard: Option<Guard<B>>,
    handle: Handle<B>,
}

/// A service that routes named commands to handler functions.
pub struct Service<B> {
    backend: B,
    handlers: HashMap<String, CommandHandler<B>>,
}

impl<B: Send + Sync + 'static> Service<B> {
    /// Create a new service around the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<B>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<B>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<B>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, session, &self.backend);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                tracing::debug!(command, "guard rejected command");
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&ctx);
        if let Err(err) = &result {
            tracing::debug!(command, status = err.status_code(), error = %err, "command failed");
        }
        result
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: serde_json::json!({ "error": e.to_string() }),
            },
        }
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// An inbound command request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandRequest {
    /// Command name (from the URL path over HTTP).
    pub command: String,
    /// JSON input payload.
    pub input: Value,
    /// Session variables (over HTTP, the request headers).
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// Response from dispatching a command.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (handler result or error).
    pub body: Value,
}
