use crate::categories::CategoryOpRequest;
use crate::envelope::{Envelope, HealthResponse};
use crate::errors::{FaqError, FaqResult};
use crate::model::{DeleteRequest, FaqInput, FaqRecord, UpdateRequest};
use crate::router::{Action, ActionRequest, ActionRouter};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::Arc;

/// Carries one action request to a backend and returns its envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ActionRequest) -> FaqResult<Envelope>;
    async fn health(&self) -> FaqResult<Envelope>;
}

/// Posts to a deployed endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> FaqResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ActionRequest) -> FaqResult<Envelope> {
        // text/plain keeps browser callers clear of a CORS preflight; the
        // server accepts it the same way from here.
        let body = serde_json::to_string(request)?;
        let value: Value = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?
            .json()
            .await?;
        Ok(Envelope::from_lenient(value))
    }

    async fn health(&self) -> FaqResult<Envelope> {
        let value: Value = self.client.get(&self.endpoint).send().await?.json().await?;
        Ok(Envelope::from_lenient(value))
    }
}

/// Dispatches straight into an in-process router.
pub struct LocalTransport {
    router: Arc<ActionRouter>,
}

impl LocalTransport {
    pub fn new(router: Arc<ActionRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn send(&self, request: &ActionRequest) -> FaqResult<Envelope> {
        let router = self.router.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || router.handle(request))
            .await
            .map_err(|err| FaqError::Transport(err.to_string()))
    }

    async fn health(&self) -> FaqResult<Envelope> {
        let health = HealthResponse::default();
        Ok(Envelope::success(health.message))
    }
}

/// Typed calls over a [`Transport`]. Error envelopes surface as
/// [`FaqError::Server`] carrying the server's message.
pub struct FaqClient {
    transport: Box<dyn Transport>,
}

impl FaqClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(endpoint: impl Into<String>) -> FaqResult<Self> {
        Ok(Self::new(Box::new(HttpTransport::new(endpoint)?)))
    }

    pub fn local(router: Arc<ActionRouter>) -> Self {
        Self::new(Box::new(LocalTransport::new(router)))
    }

    async fn call(&self, action: Action, data: Value) -> FaqResult<Envelope> {
        let envelope = self
            .transport
            .send(&ActionRequest::new(action, data))
            .await?;
        match envelope {
            Envelope::Error { message } => Err(FaqError::Server(message)),
            success => Ok(success),
        }
    }

    pub async fn fetch_all(&self) -> FaqResult<Vec<FaqRecord>> {
        let envelope = self.call(Action::FetchAll, Value::Null).await?;
        match envelope.into_data() {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }

    pub async fn append(&self, records: &[FaqInput]) -> FaqResult<String> {
        let envelope = self
            .call(Action::Append, serde_json::to_value(records)?)
            .await?;
        Ok(success_message(&envelope, "entries added"))
    }

    pub async fn update(&self, request: UpdateRequest) -> FaqResult<String> {
        let envelope = self
            .call(Action::Update, serde_json::to_value(request)?)
            .await?;
        Ok(success_message(&envelope, "entry updated"))
    }

    pub async fn delete(&self, row_index: u32) -> FaqResult<String> {
        let envelope = self
            .call(
                Action::Delete,
                serde_json::to_value(DeleteRequest::new(row_index))?,
            )
            .await?;
        Ok(success_message(&envelope, "entry deleted"))
    }

    /// Returns the server message and the number of rows changed.
    pub async fn manage_categories(&self, request: CategoryOpRequest) -> FaqResult<(String, u64)> {
        let envelope = self
            .call(Action::BulkCategoryOp, serde_json::to_value(request)?)
            .await?;
        let modified = envelope
            .data()
            .and_then(|data| data.get("modified"))
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Ok((success_message(&envelope, "categories updated"), modified))
    }

    pub async fn api_key(&self) -> FaqResult<String> {
        let envelope = self.call(Action::GetCredential, Value::Null).await?;
        envelope
            .data()
            .and_then(|data| data.get("apiKey"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| FaqError::Server("response carried no API key".into()))
    }

    pub async fn health(&self) -> FaqResult<Envelope> {
        self.transport.health().await
    }
}

fn success_message(envelope: &Envelope, fallback: &str) -> String {
    envelope.message().unwrap_or(fallback).to_string()
}
