use anyhow::Result;
use clap::Parser;
use faq_sheet::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faq_sheet=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::Cli::parse();
    cli::errors::ensure_output_supported(cli_args.format, &cli_args.command)?;
    let (format, compact, quiet) = (cli_args.format, cli_args.compact, cli_args.quiet);
    let payload = cli::run_command(cli_args).await?;
    cli::output::emit_value(&payload, format, compact, quiet)?;
    Ok(())
}
