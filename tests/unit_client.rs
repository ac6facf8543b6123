use assert_matches::assert_matches;
use faq_sheet::categories::CategoryOpRequest;
use faq_sheet::client::{ClientSession, FaqClient, FaqDraft, FilterKind, NoticeKind};
use faq_sheet::errors::FaqError;
use faq_sheet::repository::MemoryTable;
use faq_sheet::router::ActionRouter;
use faq_sheet::store::RecordStore;
use std::sync::Arc;

fn client_with(rows: &[&[&str]]) -> (Arc<MemoryTable>, FaqClient) {
    let table = Arc::new(MemoryTable::with_rows(rows));
    let router = ActionRouter::new(RecordStore::new(table.clone()), Some("key".into()));
    (table, FaqClient::local(Arc::new(router)))
}

fn seeded() -> (Arc<MemoryTable>, FaqClient) {
    client_with(&[
        &["Pregunta", "Respuesta", "Categorías", "Palabras clave"],
        &["Zebra question", "A", "x", "stripes"],
        &["", "orphan answer", "x", ""],
        &["alpha question", "B", "x; y", ""],
    ])
}

#[tokio::test]
async fn refresh_sorts_and_drops_blank_questions() {
    let (_, client) = seeded();
    let mut session = ClientSession::new();
    session.refresh(&client).await.unwrap();

    let questions: Vec<_> = session.records().iter().map(|r| r.question.as_str()).collect();
    assert_eq!(questions, vec!["alpha question", "Zebra question"]);
    assert_eq!(session.facets().categories, vec!["x", "y"]);
    assert_eq!(session.facets().keywords, vec!["stripes"]);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn filter_and_search_compose_and_clear() {
    let (_, client) = seeded();
    let mut session = ClientSession::new();
    session.refresh(&client).await.unwrap();

    session.select_filter(FilterKind::Category, Some("X"));
    assert_eq!(session.visible().len(), 2);

    session.set_search("nothing matches this");
    assert!(session.visible().is_empty());

    session.set_search("");
    session.select_filter(FilterKind::Keyword, Some("stripes"));
    assert_eq!(session.visible().len(), 1);

    session.clear_filter();
    assert_eq!(session.visible().len(), 2);
}

#[tokio::test]
async fn add_and_edit_refresh_the_session() {
    let (table, client) = seeded();
    let mut session = ClientSession::new();

    let mut draft = FaqDraft::new("New?", "Yes");
    draft.categories.add("z, x");
    session.add(&client, &draft).await.unwrap();
    assert_eq!(session.records().len(), 3);
    assert_matches!(session.notice().map(|n| n.kind), Some(NoticeKind::Success));
    assert_eq!(table.snapshot().unwrap()[4][2], "z, x");

    let record = session
        .records()
        .iter()
        .find(|r| r.question == "New?")
        .cloned()
        .unwrap();
    let mut edit = FaqDraft::from_record(&record);
    edit.answer = "Still yes".into();
    edit.categories.remove_label("x");
    session.save_edit(&client, &edit).await.unwrap();

    let updated = session.record(record.row_index).unwrap();
    assert_eq!(updated.answer, "Still yes");
    assert_eq!(updated.categories, vec!["z"]);
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_sending() {
    let (table, client) = seeded();
    let before = table.snapshot();
    let mut session = ClientSession::new();

    let result = session.add(&client, &FaqDraft::new("Q", "")).await;
    assert_matches!(result, Err(FaqError::Validation(_)));
    assert_matches!(session.notice().map(|n| n.kind), Some(NoticeKind::Error));
    assert_eq!(table.snapshot(), before);
}

#[tokio::test]
async fn server_errors_surface_with_their_message() {
    let (_, client) = seeded();
    let mut session = ClientSession::new();

    let err = session.delete(&client, 1).await.unwrap_err();
    assert_matches!(&err, FaqError::Server(message) if message.starts_with("failed to delete the row"));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn category_rename_reports_modified_rows() {
    let (_, client) = seeded();
    let mut session = ClientSession::new();
    session.refresh(&client).await.unwrap();
    session.select_filter(FilterKind::Category, Some("y"));

    let (_, modified) = session
        .manage_categories(&client, CategoryOpRequest::rename("x", "w"))
        .await
        .unwrap();
    assert_eq!(modified, 3);
    assert_eq!(session.facets().categories, vec!["w", "y"]);
    assert!(session.filter().is_active());

    let (_, modified) = session
        .manage_categories(&client, CategoryOpRequest::delete("y"))
        .await
        .unwrap();
    assert_eq!(modified, 1);
    assert!(!session.filter().is_active());
}

#[tokio::test]
async fn credential_and_health() {
    let (_, client) = seeded();
    assert_eq!(client.api_key().await.unwrap(), "key");
    assert!(client.health().await.unwrap().is_success());
}
