// Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// How command results are written to stdout
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value lines
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Write a structured value; text output is rendered by each command
    pub fn print_value<T: Serialize>(self, value: &T) -> Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
            OutputFormat::Text => {}
        }
        Ok(())
    }

    pub fn is_text(self) -> bool {
        self == OutputFormat::Text
    }
}

/// Print a labelled value for text output
pub fn print_field(label: &str, value: &str) {
    println!("{:<14} {}", format!("{}:", label), value);
}
