use anyhow::Result;
use serde_json::{Value, json};

use crate::cli::OutputFormat;
use crate::client::render::{render_list_html, render_list_text};
use crate::client::{ClientSession, FaqClient, FilterKind};

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub search: Option<String>,
}

pub async fn list(client: &FaqClient, filter: ListFilter, format: OutputFormat) -> Result<Value> {
    let mut session = ClientSession::new();
    session.refresh(client).await?;
    if let Some(category) = filter.category.as_deref() {
        session.select_filter(FilterKind::Category, Some(category));
    } else if let Some(keyword) = filter.keyword.as_deref() {
        session.select_filter(FilterKind::Keyword, Some(keyword));
    }
    if let Some(search) = filter.search {
        session.set_search(search);
    }

    let visible = session.visible();
    Ok(match format {
        OutputFormat::Json => serde_json::to_value(&visible)?,
        OutputFormat::Text => Value::String(render_list_text(&visible)),
        OutputFormat::Html => Value::String(render_list_html(&visible)),
    })
}

pub async fn facets(client: &FaqClient) -> Result<Value> {
    let mut session = ClientSession::new();
    session.refresh(client).await?;
    Ok(serde_json::to_value(session.facets())?)
}

pub async fn credential(client: &FaqClient) -> Result<Value> {
    let api_key = client.api_key().await?;
    Ok(json!({ "apiKey": api_key }))
}

pub async fn health(client: &FaqClient) -> Result<Value> {
    let envelope = client.health().await?;
    Ok(serde_json::to_value(envelope)?)
}
