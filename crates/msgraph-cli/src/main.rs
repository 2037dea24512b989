/*
[INPUT]:  CLI arguments, YAML configuration file, MSGRAPH_* environment variables
[OUTPUT]: Graph responses on stdout, logs on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use msgraph_adapter::{GraphServiceClient, HttpRequestAdapter};
use msgraph_cli::commands::{self, Command};
use msgraph_cli::GraphConfig;

#[derive(Parser, Debug)]
#[command(name = "msgraph", version, about = "Microsoft Graph command line client")]
struct Cli {
    /// Config file (defaults to <config dir>/msgraph/config.yaml when present)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    /// Print the request instead of sending it
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    config
        .validate(!args.dry_run)
        .context("invalid configuration")?;
    debug!(base_url = %config.base_url, dry_run = args.dry_run, "configuration loaded");

    let mut adapter =
        HttpRequestAdapter::with_config(config.client_config()).context("build http adapter")?;
    if !args.dry_run {
        if let Some(provider) = config.token_provider()? {
            adapter = adapter.with_token_provider(provider);
        }
    }
    let client = GraphServiceClient::new(Arc::new(adapter));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.dry_run {
        let request = commands::plan(&client, &args.command)?;
        commands::print_plan(&request, &mut out)?;
        info!("dry-run requested; nothing sent");
        return Ok(());
    }

    commands::execute(&client, &args.command, &mut out).await?;
    out.flush()?;
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GraphConfig> {
    let mut config = match path {
        Some(path) => GraphConfig::from_file(path).context("load config")?,
        None => match GraphConfig::default_path().filter(|path| path.exists()) {
            Some(path) => GraphConfig::from_file(&path).context("load default config")?,
            None => GraphConfig::default(),
        },
    };
    config.apply_env();
    Ok(config)
}
