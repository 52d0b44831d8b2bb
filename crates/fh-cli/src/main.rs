use std::process::ExitCode;

use fh_cli::error::CliError;
use fh_cli::{config, task, Cli, Parser};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; logs go to stderr so stdout stays parseable JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.render());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let api_key = config::resolve_api_key(cli.api_key)?;
    let client = config::build_client(&cli.base_url, api_key)?;
    let output = task::dispatch(cli.command, &client).await?;
    output.print()
}
