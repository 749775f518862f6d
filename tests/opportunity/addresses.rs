use next_crm::microsvc::{HandlerError, Service, Session};
use next_crm::{Address, DocsExt, DocumentStore, DynamicLink};
use serde_json::{json, Value};

use crate::support::{service, TestCrm, SALES, VIEWER};

fn address_names(service: &Service<TestCrm>, opportunity: &str) -> Vec<String> {
    let result = service
        .dispatch("opportunity.addresses", json!({ "name": opportunity }), Session::new())
        .unwrap();
    let addresses: Vec<Address> = serde_json::from_value(result).unwrap();
    addresses.into_iter().map(|a| a.name).collect()
}

fn links(service: &Service<TestCrm>, address: &str) -> Vec<DynamicLink> {
    service
        .backend()
        .store()
        .docs::<Address>()
        .require(address)
        .unwrap()
        .links
}

fn add(service: &Service<TestCrm>, opportunity: &str, address: &str, user: &str) -> Result<Value, HandlerError> {
    service.dispatch(
        "opportunity.add_address",
        json!({ "opportunity": opportunity, "address": address }),
        Session::for_user(user),
    )
}

fn remove(service: &Service<TestCrm>, opportunity: &str, address: &str, user: &str) -> Result<Value, HandlerError> {
    service.dispatch(
        "opportunity.remove_address",
        json!({ "opportunity": opportunity, "address": address }),
        Session::for_user(user),
    )
}

#[test]
fn no_addresses_before_linking() {
    assert!(address_names(&service(), "OPP-0001").is_empty());
}

#[test]
fn add_then_list() {
    let service = service();
    assert_eq!(add(&service, "OPP-0001", "ACME-Billing", SALES).unwrap(), json!(true));

    assert_eq!(address_names(&service, "OPP-0001"), vec!["ACME-Billing"]);
    assert_eq!(
        links(&service, "ACME-Billing"),
        vec![
            DynamicLink::new("Customer", "ACME"),
            DynamicLink::new("Opportunity", "OPP-0001"),
        ]
    );
}

#[test]
fn adding_twice_duplicates_link_rows() {
    let service = service();
    add(&service, "OPP-0002", "ACME-Shipping", SALES).unwrap();
    add(&service, "OPP-0002", "ACME-Shipping", SALES).unwrap();

    assert_eq!(
        links(&service, "ACME-Shipping"),
        vec![
            DynamicLink::new("Opportunity", "OPP-0002"),
            DynamicLink::new("Opportunity", "OPP-0002"),
        ]
    );
    // Listed once regardless of duplicate rows
    assert_eq!(address_names(&service, "OPP-0002"), vec!["ACME-Shipping"]);
}

#[test]
fn party_address_shows_up_for_opportunity() {
    let service = service();
    service
        .backend()
        .store()
        .save_doc(&Address::new("ACME-HQ").with_link("Customer", "ACME"))
        .unwrap();
    add(&service, "OPP-0001", "ACME-Billing", SALES).unwrap();

    assert_eq!(
        address_names(&service, "OPP-0001"),
        vec!["ACME-Billing", "ACME-HQ"]
    );
    assert!(address_names(&service, "OPP-0002").is_empty());
}

#[test]
fn remove_after_add_unlinks() {
    let service = service();
    add(&service, "OPP-0001", "ACME-Billing", SALES).unwrap();
    assert_eq!(remove(&service, "OPP-0001", "ACME-Billing", SALES).unwrap(), json!(true));

    assert!(links(&service, "ACME-Billing").is_empty());
    assert!(address_names(&service, "OPP-0001").is_empty());
}

#[test]
fn remove_strips_party_name_of_any_doctype() {
    let service = service();
    service
        .backend()
        .store()
        .save_doc(
            &Address::new("ACME-Billing")
                .with_link("Opportunity", "OPP-0001")
                .with_link("Supplier", "ACME")
                .with_link("Customer", "Initech"),
        )
        .unwrap();

    remove(&service, "OPP-0001", "ACME-Billing", SALES).unwrap();
    assert_eq!(
        links(&service, "ACME-Billing"),
        vec![DynamicLink::new("Customer", "Initech")]
    );
}

#[test]
fn mutations_without_write_permission_are_forbidden() {
    let service = service();
    add(&service, "OPP-0001", "ACME-Billing", SALES).unwrap();
    let before = links(&service, "ACME-Billing");

    let err = add(&service, "OPP-0001", "ACME-Shipping", VIEWER).unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.to_string(), "Not allowed to add address to Opportunity");
    assert!(links(&service, "ACME-Shipping").is_empty());

    let err = remove(&service, "OPP-0001", "ACME-Billing", VIEWER).unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.to_string(), "Not allowed to remove address from Opportunity");
    assert_eq!(links(&service, "ACME-Billing"), before);
}

#[test]
fn anonymous_callers_cannot_mutate() {
    let service = service();
    let err = service
        .dispatch(
            "opportunity.add_address",
            json!({ "opportunity": "OPP-0001", "address": "ACME-Billing" }),
            Session::new(),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::Forbidden(_)));
}

#[test]
fn unknown_ids_are_not_found() {
    let service = service();
    let err = add(&service, "OPP-0001", "NOWHERE", SALES).unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = remove(&service, "OPP-9999", "ACME-Billing", SALES).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn missing_address_field_is_rejected() {
    let err = service()
        .dispatch(
            "opportunity.add_address",
            json!({ "opportunity": "OPP-0001" }),
            Session::for_user(SALES),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
}
