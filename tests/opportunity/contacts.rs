use next_crm::microsvc::{HandlerError, Session};
use next_crm::{ContactSummary, DocumentStore, OpportunityContact};
use serde_json::json;

use crate::support::service;

#[test]
fn contacts_are_projected_in_link_order() {
    let result = service()
        .dispatch("opportunity.contacts", json!({ "name": "OPP-0001" }), Session::new())
        .unwrap();
    let contacts: Vec<ContactSummary> = serde_json::from_value(result).unwrap();

    assert_eq!(contacts.len(), 2);

    let alice = &contacts[0];
    assert_eq!(alice.name, "CONT-ALICE");
    assert_eq!(alice.full_name.as_deref(), Some("Alice Example"));
    assert_eq!(alice.image.as_deref(), Some("/files/alice.png"));
    assert_eq!(alice.email, "alice@acme.test");
    assert_eq!(alice.mobile_no, "+1 555 0100");
    assert!(alice.is_primary);

    let bob = &contacts[1];
    assert_eq!(bob.name, "CONT-BOB");
    assert_eq!(bob.email, "");
    assert_eq!(bob.mobile_no, "");
    assert!(!bob.is_primary);
}

#[test]
fn unknown_opportunity_lists_nothing() {
    let result = service()
        .dispatch("opportunity.contacts", json!({ "name": "OPP-9999" }), Session::new())
        .unwrap();
    assert_eq!(result, json!([]));
}

#[test]
fn dangling_link_fails_the_call() {
    let service = service();
    service
        .backend()
        .store()
        .save_doc(&OpportunityContact::new("row-3", "OPP-0001", "CONT-GONE", false))
        .unwrap();

    let err = service
        .dispatch("opportunity.contacts", json!({ "name": "OPP-0001" }), Session::new())
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref msg) if msg.contains("CONT-GONE")));
}
