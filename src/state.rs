use crate::config::{ServerConfig, StorageKind};
use crate::envelope::Envelope;
use crate::repository::{MemoryTable, TableRepository, WorkbookTable};
use crate::router::ActionRouter;
use crate::store::RecordStore;
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task;

pub struct AppState {
    config: Arc<ServerConfig>,
    router: ActionRouter,
    // one request at a time touches the table
    dispatch_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Result<Self> {
        let table: Arc<dyn TableRepository> = match config.storage {
            StorageKind::Memory => Arc::new(MemoryTable::new()),
            StorageKind::Workbook if config.create_if_missing => Arc::new(
                WorkbookTable::open_or_create(&config.workbook, &config.sheet_name)?,
            ),
            StorageKind::Workbook => {
                Arc::new(WorkbookTable::new(&config.workbook, &config.sheet_name))
            }
        };
        Ok(Self::new_with_repository(config, table))
    }

    pub fn new_with_repository(
        config: Arc<ServerConfig>,
        repository: Arc<dyn TableRepository>,
    ) -> Self {
        let router = ActionRouter::new(RecordStore::new(repository), config.api_key.clone());
        Self {
            config,
            router,
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> Arc<ServerConfig> {
        self.config.clone()
    }

    pub fn dispatch_body(&self, body: &str) -> Envelope {
        let _guard = self.dispatch_lock.lock();
        self.router.handle_body(body)
    }

    /// Runs the request on the blocking pool; a panicked task still answers
    /// with an error envelope.
    pub async fn dispatch(self: Arc<Self>, body: String) -> Envelope {
        match task::spawn_blocking(move || self.dispatch_body(&body)).await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(error = %err, "request task failed");
                Envelope::error(format!("internal error: {err}"))
            }
        }
    }
}
