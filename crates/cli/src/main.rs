use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use relo_types::DomainKind;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Serve one Relo business domain as an MCP tool server over stdio.
#[derive(Debug, Parser)]
#[command(name = "relo-mcp", version, about)]
struct Cli {
    /// Domain to serve: moves, housing, services, financial or operations.
    #[arg(allow_hyphen_values = true)]
    selector: Option<String>,

    /// Arguments after the selector are accepted and ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,

    /// Configuration file (defaults to $RELO_CONFIG_PATH or <config dir>/relo/mcp.json).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Fatal errors are returned from `main`, so they reach stderr and exit with
/// status 1 regardless of the log filter.
#[tokio::main]
async fn main() -> Result<()> {
    launch(std::env::args_os()).await
}

async fn launch<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = parse_cli(args)?;
    init_tracing();
    run(cli).await.inspect_err(|error| error!("relo-mcp stopped: {error:#}"))
}

fn parse_cli<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => error.exit(),
        Err(error) => Err(anyhow::Error::new(error).context(format!("invalid arguments; valid selectors: {}", DomainKind::selectors()))),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let selector = cli.selector.as_deref();
    relo_mcp::run(selector, cli.config.as_deref())
        .await
        .with_context(|| format!("failed to run domain server '{}'", selector.unwrap_or("<none>")))
}

/// Logs go to stderr; stdout carries the MCP protocol stream.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
