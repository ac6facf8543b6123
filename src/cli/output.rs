use crate::cli::OutputFormat;
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

pub fn emit_value(value: &Value, format: OutputFormat, compact: bool, quiet: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match (format, value) {
        (OutputFormat::Text | OutputFormat::Html, Value::String(rendered)) => {
            handle.write_all(rendered.as_bytes())?;
            return Ok(());
        }
        _ if compact || quiet => serde_json::to_writer(&mut handle, value)?,
        _ => serde_json::to_writer_pretty(&mut handle, value)?,
    }
    handle.write_all(b"\n")?;
    Ok(())
}
