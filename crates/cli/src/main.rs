// dtclient CLI
//
// Design Decision: Use clap derive with env fallbacks so the binary works in
// a pod where DT_API_URL / DT_API_TOKEN are injected.
// Design Decision: Support text/json/yaml output formats for scripting.
// Design Decision: Logs go to stderr so json/yaml output stays parseable.

mod commands;
mod output;

use std::time::Duration;

use clap::{Parser, Subcommand};
use dtclient::{ClientConfig, DynatraceClient};
use output::OutputFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dtclient")]
#[command(about = "Submit events to the monitoring event API")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "DT_API_URL")]
    pub api_url: String,

    /// API token
    #[arg(long, env = "DT_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "DT_TIMEOUT_SECS",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send an event built from flags or read from a JSON file
    Send(commands::send::SendArgs),

    /// Report that a node was marked unschedulable and is being drained
    MarkTermination {
        /// Entity ID of the host (e.g. HOST-CA78D78BBC6687D3)
        #[arg(long, short, required = true)]
        entity_id: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dtclient=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.api_url, &cli.api_token)
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = DynatraceClient::new(config)?;
    tracing::debug!(url = %client.config().events_url(), "Client configured");
    let output_format = cli.output;

    match cli.command {
        Commands::Send(args) => commands::send::run(&client, output_format, cli.quiet, args).await,
        Commands::MarkTermination { entity_id } => {
            commands::send::mark_termination(&client, output_format, cli.quiet, entity_id).await
        }
    }
}
