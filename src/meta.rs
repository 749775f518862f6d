//! Doctype metadata used to enrich records for the UI: field schema,
//! client form scripts and assignees.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Provides the UI metadata attached to a fetched record.
pub trait MetadataProvider: Send + Sync {
    /// Field schema of a doctype, keyed by fieldname.
    fn fields_meta(&self, doctype: &str) -> Value;

    /// Client-side form script registered for a doctype, if any.
    fn form_script(&self, doctype: &str) -> Option<String>;

    /// Users currently assigned to a record.
    fn assigned_users(&self, doctype: &str, name: &str) -> Vec<String>;
}

/// In-memory metadata registry.
#[derive(Debug, Default, Clone)]
pub struct StaticMetadata {
    fields: HashMap<String, Map<String, Value>>,
    form_scripts: HashMap<String, String>,
    assignments: HashMap<(String, String), Vec<String>>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the schema of one field.
    pub fn with_field(mut self, doctype: &str, fieldname: &str, meta: Value) -> Self {
        self.fields
            .entry(doctype.to_string())
            .or_default()
            .insert(fieldname.to_string(), meta);
        self
    }

    pub fn with_form_script(mut self, doctype: &str, script: &str) -> Self {
        self.form_scripts
            .insert(doctype.to_string(), script.to_string());
        self
    }

    /// Assign a user to a record. Assigning the same user twice is a no-op.
    pub fn assign(mut self, doctype: &str, name: &str, user: &str) -> Self {
        let users = self
            .assignments
            .entry((doctype.to_string(), name.to_string()))
            .or_default();
        if !users.iter().any(|u| u == user) {
            users.push(user.to_string());
        }
        self
    }
}

impl MetadataProvider for StaticMetadata {
    fn fields_meta(&self, doctype: &str) -> Value {
        Value::Object(self.fields.get(doctype).cloned().unwrap_or_default())
    }

    fn form_script(&self, doctype: &str) -> Option<String> {
        self.form_scripts.get(doctype).cloned()
    }

    fn assigned_users(&self, doctype: &str, name: &str) -> Vec<String> {
        self.assignments
            .get(&(doctype.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
