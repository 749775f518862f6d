pub mod address_add;
pub mod address_remove;
pub mod opportunity_addresses;
pub mod opportunity_contacts;
pub mod opportunity_get;
