pub mod categories;
pub mod cli;
pub mod client;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod list_codec;
pub mod model;
pub mod normalize;
pub mod repository;
pub mod router;
pub mod server;
pub mod state;
pub mod store;

pub use config::{CliArgs, ServerConfig, StorageKind};
pub use envelope::Envelope;
pub use errors::{FaqError, FaqResult};
pub use model::{FaqInput, FaqRecord};
pub use router::{Action, ActionRequest, ActionRouter};
pub use state::AppState;
pub use store::RecordStore;

use anyhow::Result;
use std::sync::Arc;

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    tracing::info!(
        workbook = %config.workbook.display(),
        sheet = %config.sheet_name,
        storage = %config.storage,
        "starting faq-sheet"
    );
    let state = Arc::new(AppState::new(config)?);
    server::serve(state).await
}
