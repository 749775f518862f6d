//! HTTP transport integration tests.
//!
//! Starts an axum server on an ephemeral port and exercises it with reqwest.

#![cfg(feature = "http")]

use std::sync::Arc;

use next_crm::microsvc::{self, Service};
use next_crm::{
    api, Address, AllowAll, Crm, DocumentStore, InMemoryDocumentStore, Opportunity,
    PermissionType, RolePermissions, StaticMetadata,
};
use serde_json::{json, Value};

type HttpCrm = Crm<InMemoryDocumentStore, RolePermissions, StaticMetadata>;

fn test_service() -> Arc<Service<HttpCrm>> {
    let store = InMemoryDocumentStore::new();
    store
        .save_doc(&Opportunity::new("OPP-0001").with_party("Lead", "LEAD-7"))
        .unwrap();
    store.save_doc(&Address::new("Lead-Home")).unwrap();

    let permissions = RolePermissions::new()
        .grant("sales@example.com", "Opportunity", PermissionType::Write)
        .grant("sales@example.com", "Address", PermissionType::Write);

    Arc::new(api::service(Crm::new(store, permissions, StaticMetadata::new())))
}

/// Bind to port 0 and return the base URL.
async fn start_server<B: Send + Sync + 'static>(service: Arc<Service<B>>) -> String {
    let app = microsvc::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_commands() {
    let base = start_server(test_service()).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["commands"],
        json!([
            "opportunity.add_address",
            "opportunity.addresses",
            "opportunity.contacts",
            "opportunity.get",
            "opportunity.remove_address"
        ])
    );
}

#[tokio::test]
async fn get_opportunity_over_http() {
    let base = start_server(test_service()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/opportunity.get"))
        .json(&json!({ "name": "OPP-0001" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["doctype"], "Opportunity");
    assert_eq!(body["party_name"], "LEAD-7");
    assert_eq!(body["contacts"], json!([]));
}

#[tokio::test]
async fn missing_opportunity_returns_404() {
    let base = start_server(test_service()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/opportunity.get"))
        .json(&json!({ "name": "OPP-9999" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Opportunity not found" }));
}

#[tokio::test]
async fn add_address_uses_session_header() {
    let base = start_server(test_service()).await;
    let client = reqwest::Client::new();
    let payload = json!({ "opportunity": "OPP-0001", "address": "Lead-Home" });

    let resp = client
        .post(format!("{base}/opportunity.add_address"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = client
        .post(format!("{base}/opportunity.add_address"))
        .header("x-crm-user-id", "sales@example.com")
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!(true));

    let resp = client
        .post(format!("{base}/opportunity.addresses"))
        .json(&json!({ "name": "OPP-0001" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body[0]["name"], "Lead-Home");
    assert_eq!(
        body[0]["links"],
        json!([
            { "link_doctype": "Lead", "link_name": "LEAD-7" },
            { "link_doctype": "Opportunity", "link_name": "OPP-0001" }
        ])
    );
}

#[tokio::test]
async fn unknown_command_returns_404() {
    let service = Arc::new(api::service(Crm::new(
        InMemoryDocumentStore::new(),
        AllowAll,
        StaticMetadata::new(),
    )));
    let base = start_server(service).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/opportunity.delete"))
        .json(&json!({ "name": "OPP-0001" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
