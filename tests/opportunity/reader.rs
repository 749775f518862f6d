use next_crm::microsvc::{HandlerError, Session};
use serde_json::json;

use crate::support::{service, SALES};

#[test]
fn get_opportunity_enriches_record() {
    let service = service();
    let result = service
        .dispatch("opportunity.get", json!({ "name": "OPP-0001" }), Session::new())
        .unwrap();

    assert_eq!(result["name"], "OPP-0001");
    assert_eq!(result["doctype"], "Opportunity");
    assert_eq!(result["status"], "Open");
    assert_eq!(result["opportunity_amount"], 25000);
    assert_eq!(result["opportunity_from"], "Customer");
    assert_eq!(
        result["contacts"],
        json!([
            { "contact": "CONT-ALICE", "is_primary": true },
            { "contact": "CONT-BOB", "is_primary": false }
        ])
    );
    assert_eq!(result["fields_meta"]["status"]["fieldtype"], "Select");
    assert_eq!(result["_form_script"], "class OpportunityForm {}");
    assert_eq!(result["_assign"], json!([SALES]));
}

#[test]
fn opportunity_without_links_has_no_contacts() {
    let result = service()
        .dispatch("opportunity.get", json!({ "name": "OPP-0002" }), Session::new())
        .unwrap();
    assert_eq!(result["contacts"], json!([]));
    assert_eq!(result["_assign"], json!([]));
}

#[test]
fn missing_opportunity_is_not_found() {
    let err = service()
        .dispatch("opportunity.get", json!({ "name": "OPP-9999" }), Session::new())
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(_)));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Opportunity not found");
}

#[test]
fn empty_name_is_rejected() {
    let err = service()
        .dispatch("opportunity.get", json!({ "name": "" }), Session::new())
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
