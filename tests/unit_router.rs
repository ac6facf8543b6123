use faq_sheet::envelope::Envelope;
use faq_sheet::repository::MemoryTable;
use faq_sheet::router::ActionRouter;
use faq_sheet::store::RecordStore;
use serde_json::{Value, json};
use std::sync::Arc;

fn router_with(rows: &[&[&str]], api_key: Option<&str>) -> (Arc<MemoryTable>, ActionRouter) {
    let table = Arc::new(MemoryTable::with_rows(rows));
    let router = ActionRouter::new(RecordStore::new(table.clone()), api_key.map(String::from));
    (table, router)
}

fn post(router: &ActionRouter, body: Value) -> Value {
    let envelope = router.handle_body(&body.to_string());
    serde_json::to_value(envelope).expect("envelope serializes")
}

fn seeded() -> (Arc<MemoryTable>, ActionRouter) {
    router_with(
        &[
            &["Pregunta", "Respuesta", "Categorías", "Palabras clave"],
            &["Q2", "A2", "billing", "invoice"],
            &["Q3", "A3", "billing, account", ""],
        ],
        Some("secret"),
    )
}

#[test]
fn malformed_body_is_an_error_envelope() {
    let (_, router) = seeded();
    let envelope = router.handle_body("{not json");
    assert!(!envelope.is_success());
    assert!(envelope.message().unwrap().starts_with("invalid payload"));
}

#[test]
fn unknown_action_is_reported_by_name() {
    let (_, router) = seeded();
    let reply = post(&router, json!({"action": "generateFaq", "data": {}}));
    assert_eq!(reply["status"], "error");
    assert_eq!(reply["message"], "unrecognized action 'generateFaq'");
}

#[test]
fn credential_is_returned_when_configured() {
    let (_, router) = seeded();
    let reply = post(&router, json!({"action": "getApiKey"}));
    assert_eq!(reply, json!({"status": "success", "data": {"apiKey": "secret"}}));

    let (_, router) = router_with(&[], None);
    let reply = post(&router, json!({"action": "get-credential"}));
    assert_eq!(reply["status"], "error");
}

#[test]
fn get_data_returns_records_with_row_indices() {
    let (_, router) = seeded();
    let reply = post(&router, json!({"action": "getData"}));
    assert_eq!(reply["status"], "success");
    let data = reply["data"].as_array().expect("records array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[1]["rowIndex"], 3);
    assert_eq!(data[1]["categorías"], json!(["billing", "account"]));
}

#[test]
fn add_data_accepts_lists_and_delimited_strings() {
    let (table, router) = seeded();
    let reply = post(
        &router,
        json!({"action": "addData", "data": [
            {"pregunta": "Q4", "respuesta": "A4", "categorias": ["x", "y"], "palabras_clave": "k1; k2"},
            {"pregunta": "Q5", "respuesta": "A5"}
        ]}),
    );
    assert_eq!(reply["status"], "success");
    assert_eq!(reply["data"]["added"], 2);

    let grid = table.snapshot().unwrap();
    assert_eq!(grid[3], vec!["Q4", "A4", "x, y", "k1; k2"]);
    assert_eq!(grid[4], vec!["Q5", "A5", "", ""]);
}

#[test]
fn update_accepts_string_row_index() {
    let (table, router) = seeded();
    let reply = post(
        &router,
        json!({"action": "updateData", "data": {
            "rowIndex": "3",
            "rowData": {"pregunta": "Q3b", "respuesta": "A3b", "categorías": ["account"]}
        }}),
    );
    assert_eq!(reply["status"], "success", "{reply}");
    assert_eq!(table.snapshot().unwrap()[2], vec!["Q3b", "A3b", "account", ""]);
}

#[test]
fn update_without_row_data_is_rejected() {
    let (table, router) = seeded();
    let before = table.snapshot();
    let reply = post(&router, json!({"action": "update", "data": {"rowIndex": 2}}));
    assert_eq!(reply["status"], "error");
    assert!(
        reply["message"]
            .as_str()
            .unwrap()
            .starts_with("failed to update the row")
    );
    assert_eq!(table.snapshot(), before);
}

#[test]
fn delete_requires_valid_row() {
    let (table, router) = seeded();
    let reply = post(&router, json!({"action": "deleteData", "data": {}}));
    assert_eq!(reply["status"], "error");

    let reply = post(&router, json!({"action": "deleteData", "data": {"rowIndex": 1}}));
    assert_eq!(reply["status"], "error");

    let reply = post(&router, json!({"action": "deleteData", "data": {"rowIndex": 2}}));
    assert_eq!(reply["status"], "success");
    assert_eq!(table.snapshot().unwrap().len(), 2);
}

#[test]
fn manage_categories_reports_modified_rows() {
    let (_, router) = seeded();
    let reply = post(
        &router,
        json!({"action": "manageCategories", "data": {
            "operation": "rename", "oldName": "billing", "newName": "payments"
        }}),
    );
    assert_eq!(reply["status"], "success");
    assert_eq!(reply["data"]["modified"], 2);

    let reply = post(
        &router,
        json!({"action": "manageCategories", "data": {"operation": "merge"}}),
    );
    assert_eq!(reply["status"], "error");
}

#[test]
fn envelopes_from_router_round_trip_through_lenient_parse() {
    let (_, router) = seeded();
    let reply = post(&router, json!({"action": "getData"}));
    let envelope = Envelope::from_lenient(reply);
    assert!(envelope.is_success());
    assert_eq!(envelope.data().and_then(Value::as_array).map(Vec::len), Some(2));
}
