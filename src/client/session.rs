use crate::categories::CategoryOpRequest;
use crate::client::api::FaqClient;
use crate::client::filter::{self, Facets, FilterKind, FilterState};
use crate::client::tags::FaqDraft;
use crate::errors::{FaqError, FaqResult};
use crate::model::{FaqInput, FaqRecord};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a status notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Client-side view state: the last fetched records, their facets, the
/// active filter and search term, and whether a request is in flight.
#[derive(Debug, Default)]
pub struct ClientSession {
    records: Vec<FaqRecord>,
    facets: Facets,
    filter: FilterState,
    search: String,
    busy: bool,
    notice: Option<Notice>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the record set. A filter whose label vanished is dropped.
    pub fn load(&mut self, records: Vec<FaqRecord>) {
        self.records = filter::prepare_records(records);
        self.facets = Facets::from_records(&self.records);
        if let FilterState::Active { kind, value } = &self.filter {
            if !self.facets.contains(*kind, value) {
                self.filter = FilterState::None;
            }
        }
    }

    pub fn records(&self) -> &[FaqRecord] {
        &self.records
    }

    pub fn record(&self, row_index: u32) -> Option<&FaqRecord> {
        self.records.iter().find(|r| r.row_index == row_index)
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Selecting a label replaces any previous filter of either kind;
    /// `None` selects "all".
    pub fn select_filter(&mut self, kind: FilterKind, value: Option<&str>) {
        self.filter = match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => FilterState::None,
            Some(value) => FilterState::Active {
                kind,
                value: value.to_string(),
            },
        };
    }

    pub fn clear_filter(&mut self) {
        self.filter = FilterState::None;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn visible(&self) -> Vec<&FaqRecord> {
        filter::apply_filters_and_search(&self.records, &self.filter, &self.search)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn begin_request(&mut self) -> FaqResult<()> {
        if self.busy {
            return Err(FaqError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    pub fn finish_request(&mut self) {
        self.busy = false;
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice::new(kind, text));
    }

    /// The current notice, if it has not expired by `now`.
    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired_at(now))
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired())
    }

    // Busy flag covers the request; the outcome lands in a notice.
    async fn guarded<T, F>(&mut self, request: F) -> FaqResult<T>
    where
        F: Future<Output = FaqResult<T>>,
    {
        self.begin_request()?;
        let result = request.await;
        self.finish_request();
        if let Err(err) = &result {
            self.notify(NoticeKind::Error, err.to_string());
        }
        result
    }

    pub async fn refresh(&mut self, client: &FaqClient) -> FaqResult<()> {
        let records = self.guarded(client.fetch_all()).await?;
        debug!(count = records.len(), "records loaded");
        self.load(records);
        Ok(())
    }

    async fn finish_write(&mut self, client: &FaqClient, message: String) -> FaqResult<String> {
        self.notify(NoticeKind::Success, message.clone());
        self.refresh(client).await?;
        Ok(message)
    }

    pub async fn add(&mut self, client: &FaqClient, draft: &FaqDraft) -> FaqResult<String> {
        if let Err(err) = draft.validate() {
            self.notify(NoticeKind::Error, err.to_string());
            return Err(err);
        }
        self.add_many(client, &[draft.to_input()]).await
    }

    pub async fn add_many(&mut self, client: &FaqClient, records: &[FaqInput]) -> FaqResult<String> {
        let message = self.guarded(client.append(records)).await?;
        self.finish_write(client, message).await
    }

    pub async fn save_edit(&mut self, client: &FaqClient, draft: &FaqDraft) -> FaqResult<String> {
        let request = match draft.update_request() {
            Ok(request) => request,
            Err(err) => {
                self.notify(NoticeKind::Error, err.to_string());
                return Err(err);
            }
        };
        let message = self.guarded(client.update(request)).await?;
        self.finish_write(client, message).await
    }

    pub async fn delete(&mut self, client: &FaqClient, row_index: u32) -> FaqResult<String> {
        let message = self.guarded(client.delete(row_index)).await?;
        self.finish_write(client, message).await
    }

    pub async fn manage_categories(
        &mut self,
        client: &FaqClient,
        request: CategoryOpRequest,
    ) -> FaqResult<(String, u64)> {
        let (message, modified) = self.guarded(client.manage_categories(request)).await?;
        let message = self.finish_write(client, message).await?;
        Ok((message, modified))
    }
}
