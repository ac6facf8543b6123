use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::categories::CategoryOpRequest;
use crate::cli::TagArgs;
use crate::client::bulk::parse_bulk;
use crate::client::{ClientSession, FaqClient, FaqDraft};

/// Field overrides for `update`; anything left `None` or empty keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct RowEdit {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub tags: TagArgs,
    pub remove_categories: Vec<String>,
    pub remove_keywords: Vec<String>,
}

pub async fn add(client: &FaqClient, question: String, answer: String, tags: TagArgs) -> Result<Value> {
    let mut draft = FaqDraft::new(question, answer);
    for label in &tags.categories {
        draft.categories.add(label);
    }
    for label in &tags.keywords {
        draft.keywords.add(label);
    }

    let mut session = ClientSession::new();
    let message = session.add(client, &draft).await?;
    Ok(json!({ "message": message, "total": session.records().len() }))
}

pub async fn import(client: &FaqClient, file: PathBuf) -> Result<Value> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let entries = parse_bulk(&text)?;

    let mut session = ClientSession::new();
    let message = session.add_many(client, &entries).await?;
    Ok(json!({ "message": message, "parsed": entries.len() }))
}

pub async fn update(client: &FaqClient, row: u32, edit: RowEdit) -> Result<Value> {
    // Rows with a blank question are hidden from listings but still editable.
    let records = client.fetch_all().await?;
    let record = records
        .iter()
        .find(|r| r.row_index == row)
        .ok_or_else(|| anyhow!("no entry at row {row}"))?;

    let mut draft = FaqDraft::from_record(record);
    if let Some(question) = edit.question {
        draft.question = question;
    }
    if let Some(answer) = edit.answer {
        draft.answer = answer;
    }
    for label in &edit.tags.categories {
        draft.categories.add(label);
    }
    for label in &edit.tags.keywords {
        draft.keywords.add(label);
    }
    for label in &edit.remove_categories {
        draft.categories.remove_label(label);
    }
    for label in &edit.remove_keywords {
        draft.keywords.remove_label(label);
    }

    let mut session = ClientSession::new();
    let message = session.save_edit(client, &draft).await?;
    Ok(json!({ "message": message }))
}

pub async fn delete(client: &FaqClient, row: u32) -> Result<Value> {
    let mut session = ClientSession::new();
    let message = session.delete(client, row).await?;
    Ok(json!({ "message": message, "total": session.records().len() }))
}

pub async fn rename_category(client: &FaqClient, old_name: String, new_name: String) -> Result<Value> {
    manage(client, CategoryOpRequest::rename(old_name, new_name)).await
}

pub async fn delete_category(client: &FaqClient, name: String) -> Result<Value> {
    manage(client, CategoryOpRequest::delete(name)).await
}

async fn manage(client: &FaqClient, request: CategoryOpRequest) -> Result<Value> {
    let mut session = ClientSession::new();
    let (message, modified) = session.manage_categories(client, request).await?;
    Ok(json!({
        "message": message,
        "modified": modified,
        "categories": session.facets().categories,
    }))
}
