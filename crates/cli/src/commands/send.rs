// Event submission commands

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;
use dtclient::{DynatraceClient, EventSubmitter};
use dtclient_core::{EventData, EventResponse, DEFAULT_SOURCE};

use crate::output::{print_field, OutputFormat};

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Read the event payload from a JSON file ("-" for stdin)
    #[arg(long, short, conflicts_with_all = ["event_type", "description", "entity_id", "start", "end"])]
    pub file: Option<PathBuf>,

    /// Event type (e.g. CUSTOM_INFO, MARKED_FOR_TERMINATION)
    #[arg(long, short = 't')]
    pub event_type: Option<String>,

    /// Free-text description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Originating system
    #[arg(long, short, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Entity the event attaches to (repeatable)
    #[arg(long, short)]
    pub entity_id: Vec<String>,

    /// Start time in epoch milliseconds (default: now)
    #[arg(long)]
    pub start: Option<u64>,

    /// End time in epoch milliseconds (default: start)
    #[arg(long)]
    pub end: Option<u64>,
}

pub async fn run(
    client: &DynatraceClient,
    output: OutputFormat,
    quiet: bool,
    mut args: SendArgs,
) -> Result<()> {
    let event = match args.file.take() {
        Some(path) => read_event(&path)?,
        None => build_event(args)?,
    };

    submit(client, output, quiet, &event).await
}

pub async fn mark_termination(
    client: &DynatraceClient,
    output: OutputFormat,
    quiet: bool,
    entity_ids: Vec<String>,
) -> Result<()> {
    let event = EventData::marked_for_termination(entity_ids, Utc::now());
    submit(client, output, quiet, &event).await
}

async fn submit(
    client: &DynatraceClient,
    output: OutputFormat,
    quiet: bool,
    event: &EventData,
) -> Result<()> {
    let response = client.send_event(event).await?;

    if output.is_text() {
        if !quiet {
            println!("Event sent: {}", event.event_type);
        }
        print_response(&response);
    } else {
        output.print_value(&response)?;
    }

    Ok(())
}

fn print_response(response: &EventResponse) {
    let event_ids: Vec<String> = response
        .stored_event_ids
        .iter()
        .map(|id| id.to_string())
        .collect();
    print_field("Event IDs", &join_or_dash(&event_ids));
    print_field("Stored IDs", &join_or_dash(&response.stored_ids));
    print_field("Correlation", &join_or_dash(&response.stored_correlation_ids));
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn read_event(path: &Path) -> Result<EventData> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?
    };

    Ok(EventData::decode(&bytes)?)
}

fn build_event(args: SendArgs) -> Result<EventData> {
    let Some(event_type) = args.event_type else {
        bail!("either --event-type or --file is required");
    };

    let start = args
        .start
        .unwrap_or_else(|| u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default());
    let end = args.end.unwrap_or(start);

    Ok(EventData::new(event_type)
        .with_description(args.description.unwrap_or_default())
        .with_source(args.source)
        .with_entity_ids(args.entity_id)
        .with_timeframe(start, end))
}
