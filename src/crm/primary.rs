//! Choosing the preferred entry of a contact's email or phone list.

use super::records::{ContactEmail, ContactPhone};

/// A child-list entry carrying a primary flag.
pub trait Primary {
    fn is_primary(&self) -> bool;
    fn value(&self) -> &str;
}

impl Primary for ContactEmail {
    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn value(&self) -> &str {
        &self.email_id
    }
}

impl Primary for ContactPhone {
    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn value(&self) -> &str {
        &self.phone
    }
}

/// The first entry flagged primary, else the first entry, else `""`.
pub fn pick_primary<T: Primary>(entries: &[T]) -> &str {
    entries
        .iter()
        .find(|entry| entry.is_primary())
        .or_else(|| entries.first())
        .map(|entry| entry.value())
        .unwrap_or("")
}
