use crate::cli::{Commands, OutputFormat};
use anyhow::{Result, bail};

pub fn ensure_output_supported(format: OutputFormat, command: &Commands) -> Result<()> {
    match (format, command) {
        (OutputFormat::Json, _) | (_, Commands::List { .. }) => Ok(()),
        _ => bail!("text and html output are only available for `list`; use --format json"),
    }
}
