use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

const DEFAULT_WORKBOOK: &str = "faq.xlsx";
const DEFAULT_SHEET_NAME: &str = "FAQ";
const DEFAULT_HTTP_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Workbook,
    Memory,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Workbook => write!(f, "workbook"),
            StorageKind::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub workbook: PathBuf,
    pub sheet_name: String,
    pub http_bind_address: SocketAddr,
    /// Returned by the credential action; the action fails when unset.
    pub api_key: Option<String>,
    pub create_if_missing: bool,
    pub storage: StorageKind,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(DEFAULT_WORKBOOK),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            http_bind_address: DEFAULT_HTTP_BIND,
            api_key: None,
            create_if_missing: false,
            storage: StorageKind::Workbook,
        }
    }
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            workbook: cli_workbook,
            sheet: cli_sheet,
            http_bind: cli_http_bind,
            api_key: cli_api_key,
            create_if_missing: cli_create_if_missing,
            storage: cli_storage,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            workbook: file_workbook,
            sheet_name: file_sheet_name,
            http_bind: file_http_bind,
            api_key: file_api_key,
            create_if_missing: file_create_if_missing,
            storage: file_storage,
        } = file_config;

        // relative workbook paths in a config file are relative to that file
        let file_workbook = file_workbook.map(|path| match config.as_ref() {
            Some(config_path) if path.is_relative() => config_path
                .parent()
                .map(|parent| parent.join(&path))
                .unwrap_or(path),
            _ => path,
        });

        let workbook = cli_workbook
            .or(file_workbook)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK));

        let sheet_name = cli_sheet
            .or(file_sheet_name)
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        anyhow::ensure!(!sheet_name.is_empty(), "sheet name must not be empty");

        let http_bind_address = cli_http_bind
            .or(file_http_bind)
            .unwrap_or(DEFAULT_HTTP_BIND);

        let api_key = cli_api_key
            .or(file_api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let create_if_missing = cli_create_if_missing || file_create_if_missing.unwrap_or(false);
        let storage = cli_storage.or(file_storage).unwrap_or_default();

        if storage == StorageKind::Workbook && !create_if_missing {
            anyhow::ensure!(
                workbook.exists(),
                "configured workbook {:?} does not exist (pass --create-if-missing to create it)",
                workbook
            );
            anyhow::ensure!(
                workbook.is_file(),
                "configured workbook {:?} is not a file",
                workbook
            );
        }

        Ok(Self {
            workbook,
            sheet_name,
            http_bind_address,
            api_key,
            create_if_missing,
            storage,
        })
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "faq-sheet", about = "Spreadsheet-backed FAQ server", version)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "FAQ_SHEET_WORKBOOK",
        value_name = "FILE",
        help = "Workbook (.xlsx) holding the FAQ table"
    )]
    pub workbook: Option<PathBuf>,

    #[arg(
        long,
        env = "FAQ_SHEET_SHEET",
        value_name = "NAME",
        help = "Sheet name inside the workbook (default: FAQ)"
    )]
    pub sheet: Option<String>,

    #[arg(
        long,
        env = "FAQ_SHEET_HTTP_BIND",
        value_name = "ADDR",
        help = "HTTP bind address (default: 127.0.0.1:8080)"
    )]
    pub http_bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "FAQ_SHEET_API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        help = "Credential handed out by the getApiKey action"
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        env = "FAQ_SHEET_CREATE_IF_MISSING",
        help = "Create the workbook and sheet when they do not exist"
    )]
    pub create_if_missing: bool,

    #[arg(
        long,
        env = "FAQ_SHEET_STORAGE",
        value_enum,
        value_name = "KIND",
        help = "Storage backend: workbook or memory"
    )]
    pub storage: Option<StorageKind>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    workbook: Option<PathBuf>,
    sheet_name: Option<String>,
    http_bind: Option<SocketAddr>,
    api_key: Option<String>,
    create_if_missing: Option<bool>,
    storage: Option<StorageKind>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
