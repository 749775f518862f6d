//! Context passed to command handlers.
//!
//! Carries the parsed input, session variables, and a reference to the
//! backend the service was built with.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

/// The context passed to every command handler.
///
/// Generic over `B` (the backend type) so handlers can reach whatever
/// store/permission setup the service is configured with.
pub struct Context<'a, B> {
    input: Value,
    session: Session,
    backend: &'a B,
}

impl<'a, B> Context<'a, B> {
    pub(crate) fn new(input: Value, session: Session, backend: &'a B) -> Self {
        Self {
            input,
            session,
            backend,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone()).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// The calling user, `None` when anonymous.
    pub fn user_id(&self) -> Option<&str> {
        self.session.user_id()
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        self.backend
    }

    /// Check that every field is present as a non-empty string.
    pub fn has_identifiers(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| {
            self.input
                .get(f)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
        })
    }
}
