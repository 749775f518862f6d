//! Permission checks against doctypes and individual records.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The user that bypasses every permission check.
pub const ADMINISTRATOR: &str = "Administrator";

/// Kind of access being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    Read,
    Write,
    Create,
    Delete,
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PermissionType::Read => "read",
            PermissionType::Write => "write",
            PermissionType::Create => "create",
            PermissionType::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Answers whether a user may perform `ptype` on a record.
///
/// `user` is `None` for an anonymous caller.
pub trait PermissionChecker: Send + Sync {
    fn has_permission(
        &self,
        doctype: &str,
        ptype: PermissionType,
        name: &str,
        user: Option<&str>,
    ) -> bool;
}

/// Grants everything to everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionChecker for AllowAll {
    fn has_permission(&self, _: &str, _: PermissionType, _: &str, _: Option<&str>) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone)]
struct Grants {
    doctypes: HashSet<(String, PermissionType)>,
    records: HashSet<(String, PermissionType, String)>,
}

/// In-memory per-user grants.
///
/// A user may hold a grant on a whole doctype or on a single record.
/// [`ADMINISTRATOR`] always passes; anonymous callers never do.
///
/// ```ignore
/// let permissions = RolePermissions::new()
///     .grant("sales@example.com", "Opportunity", PermissionType::Write)
///     .grant_record("sales@example.com", "Address", PermissionType::Write, "ADDR-1");
/// ```
#[derive(Debug, Default, Clone)]
pub struct RolePermissions {
    users: HashMap<String, Grants>,
}

impl RolePermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `ptype` on every record of `doctype`.
    pub fn grant(mut self, user: &str, doctype: &str, ptype: PermissionType) -> Self {
        self.users
            .entry(user.to_string())
            .or_default()
            .doctypes
            .insert((doctype.to_string(), ptype));
        self
    }

    /// Grant `ptype` on one record.
    pub fn grant_record(
        mut self,
        user: &str,
        doctype: &str,
        ptype: PermissionType,
        name: &str,
    ) -> Self {
        self.users
            .entry(user.to_string())
            .or_default()
            .records
            .insert((doctype.to_string(), ptype, name.to_string()));
        self
    }
}

impl PermissionChecker for RolePermissions {
    fn has_permission(
        &self,
        doctype: &str,
        ptype: PermissionType,
        name: &str,
        user: Option<&str>,
    ) -> bool {
        let Some(user) = user else {
            return false;
        };
        if user == ADMINISTRATOR {
            return true;
        }
        let Some(grants) = self.users.get(user) else {
            return false;
        };

        grants.doctypes.contains(&(doctype.to_string(), ptype))
            || grants
                .records
                .contains(&(doctype.to_string(), ptype, name.to_string()))
    }
}
