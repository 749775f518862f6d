//! Session variables from the request context.

use std::collections::HashMap;

/// Session variable carrying the calling user.
pub const USER_ID: &str = "x-crm-user-id";

/// Parsed session variables from the incoming request.
///
/// Over HTTP these are the request headers:
///
/// ```text
/// x-crm-user-id: sales@example.com
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty (anonymous) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user.
    pub fn for_user(user_id: &str) -> Self {
        let mut session = Self::new();
        session.set(USER_ID, user_id);
        session
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Get the user ID (`x-crm-user-id`).
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID)
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set a session variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

}
