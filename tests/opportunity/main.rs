//! Opportunity command integration tests: dispatch through the service
//! against an in-memory store.

mod support;
mod reader;
mod contacts;
mod addresses;
