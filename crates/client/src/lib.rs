// Event Submission Client
//
// This crate posts EventData payloads to the monitoring platform's event
// ingestion endpoint and decodes the acknowledgment.
//
// Pipeline per call: validate → encode → POST → decode. There is no retry
// loop and no state shared between calls other than the HTTP client.

mod client;
pub mod config;
pub mod error;
pub mod submitter;


pub use client::DynatraceClient;
pub use config::ClientConfig;
pub use error::{ErrorKind, Result, SubmissionError};
pub use submitter::EventSubmitter;

// Re-export model types for convenience
pub use dtclient_core::{AttachRules, EventData, EventResponse};
