//! Test data: one opportunity raised for a customer, one without a party,
//! their contacts and a couple of addresses.

use next_crm::microsvc::Service;
use next_crm::{
    api, Address, Contact, ContactEmail, ContactPhone, Crm, DocumentStore, InMemoryDocumentStore,
    Opportunity, OpportunityContact, PermissionType, RolePermissions, StaticMetadata,
};
use serde_json::json;

pub type TestCrm = Crm<InMemoryDocumentStore, RolePermissions, StaticMetadata>;

pub const SALES: &str = "sales@example.com";
pub const VIEWER: &str = "viewer@example.com";

pub fn seeded_store() -> InMemoryDocumentStore {
    let store = InMemoryDocumentStore::new();

    store
        .save_doc(
            &Opportunity::new("OPP-0001")
                .with_party("Customer", "ACME")
                .with_field("status", json!("Open"))
                .with_field("opportunity_amount", json!(25000)),
        )
        .unwrap();
    store.save_doc(&Opportunity::new("OPP-0002")).unwrap();

    store
        .save_doc(&Contact {
            name: "CONT-ALICE".into(),
            first_name: Some("Alice".into()),
            full_name: Some("Alice Example".into()),
            image: Some("/files/alice.png".into()),
            email_ids: vec![
                ContactEmail {
                    email_id: "alice@old.test".into(),
                    is_primary: false,
                },
                ContactEmail {
                    email_id: "alice@acme.test".into(),
                    is_primary: true,
                },
            ],
            phone_nos: vec![ContactPhone {
                phone: "+1 555 0100".into(),
                is_primary: false,
            }],
            ..Default::default()
        })
        .unwrap();
    store
        .save_doc(&Contact {
            name: "CONT-BOB".into(),
            full_name: Some("Bob Example".into()),
            ..Default::default()
        })
        .unwrap();

    store
        .save_doc(&OpportunityContact::new("row-1", "OPP-0001", "CONT-ALICE", true))
        .unwrap();
    store
        .save_doc(&OpportunityContact::new("row-2", "OPP-0001", "CONT-BOB", false))
        .unwrap();

    store.save_doc(&Address::new("ACME-Billing")).unwrap();
    store.save_doc(&Address::new("ACME-Shipping")).unwrap();

    store
}

pub fn permissions() -> RolePermissions {
    RolePermissions::new()
        .grant(SALES, "Opportunity", PermissionType::Write)
        .grant(SALES, "Address", PermissionType::Write)
        .grant(VIEWER, "Opportunity", PermissionType::Read)
        .grant(VIEWER, "Address", PermissionType::Write)
}

pub fn metadata() -> StaticMetadata {
    StaticMetadata::new()
        .with_field("Opportunity", "status", json!({ "fieldtype": "Select", "options": "Open\nQuotation\nLost" }))
        .with_form_script("Opportunity", "class OpportunityForm {}")
        .assign("Opportunity", "OPP-0001", SALES)
}

pub fn service() -> Service<TestCrm> {
    api::service(Crm::new(seeded_store(), permissions(), metadata()))
}
