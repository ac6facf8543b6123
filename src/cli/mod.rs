pub mod commands;
pub mod errors;
pub mod output;

use crate::client::FaqClient;
use crate::repository::WorkbookTable;
use crate::router::ActionRouter;
use crate::store::RecordStore;
use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Html,
}

#[derive(Debug, Parser)]
#[command(
    name = "faq-cli",
    version,
    about = "Browse and edit a spreadsheet-backed FAQ"
)]
pub struct Cli {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true)]
    pub compact: bool,

    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where requests go: a running endpoint, or a workbook opened in-process.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    #[arg(long, env = "FAQ_SHEET_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    #[arg(long, env = "FAQ_SHEET_WORKBOOK", global = true)]
    pub workbook: Option<PathBuf>,

    #[arg(long, env = "FAQ_SHEET_SHEET", default_value = "FAQ", global = true)]
    pub sheet: String,

    #[arg(long, env = "FAQ_SHEET_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub create_if_missing: bool,
}

impl TargetArgs {
    pub fn connect(&self) -> Result<FaqClient> {
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            return Ok(FaqClient::http(endpoint)?);
        }
        let Some(workbook) = self.workbook.as_ref() else {
            bail!("either --endpoint or --workbook must be provided");
        };
        let table = if self.create_if_missing {
            WorkbookTable::open_or_create(workbook, &self.sheet)?
        } else {
            if !workbook.is_file() {
                bail!("workbook {:?} does not exist", workbook);
            }
            WorkbookTable::new(workbook, &self.sheet)
        };
        let router = ActionRouter::new(RecordStore::new(Arc::new(table)), self.api_key.clone());
        Ok(FaqClient::local(Arc::new(router)))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TagArgs {
    /// Category label; repeat or separate with commas
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Keyword label; repeat or separate with commas
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List entries, optionally narrowed by one filter and a search term
    List {
        #[arg(long, conflicts_with = "keyword")]
        category: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Distinct categories and keywords
    Facets,
    Add {
        question: String,
        answer: String,
        #[command(flatten)]
        tags: TagArgs,
    },
    /// Append every "P: ... R: ... ---" block in a file
    Import {
        file: PathBuf,
    },
    Update {
        row: u32,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        #[command(flatten)]
        tags: TagArgs,
        #[arg(long = "remove-category")]
        remove_categories: Vec<String>,
        #[arg(long = "remove-keyword")]
        remove_keywords: Vec<String>,
    },
    Delete {
        row: u32,
    },
    RenameCategory {
        old_name: String,
        new_name: String,
    },
    DeleteCategory {
        name: String,
    },
    /// Print the configured API key
    Credential,
    Health,
}

pub async fn run_command(cli: Cli) -> Result<Value> {
    let client = cli.target.connect()?;
    match cli.command {
        Commands::List {
            category,
            keyword,
            search,
        } => {
            let filter = commands::read::ListFilter {
                category,
                keyword,
                search,
            };
            commands::read::list(&client, filter, cli.format).await
        }
        Commands::Facets => commands::read::facets(&client).await,
        Commands::Credential => commands::read::credential(&client).await,
        Commands::Health => commands::read::health(&client).await,
        Commands::Add {
            question,
            answer,
            tags,
        } => commands::write::add(&client, question, answer, tags).await,
        Commands::Import { file } => commands::write::import(&client, file).await,
        Commands::Update {
            row,
            question,
            answer,
            tags,
            remove_categories,
            remove_keywords,
        } => {
            let edit = commands::write::RowEdit {
                question,
                answer,
                tags,
                remove_categories,
                remove_keywords,
            };
            commands::write::update(&client, row, edit).await
        }
        Commands::Delete { row } => commands::write::delete(&client, row).await,
        Commands::RenameCategory { old_name, new_name } => {
            commands::write::rename_category(&client, old_name, new_name).await
        }
        Commands::DeleteCategory { name } => commands::write::delete_category(&client, name).await,
    }
}
