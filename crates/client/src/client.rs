// reqwest-backed EventSubmitter
//
// POSTs the encoded event to {base_url}/v1/events with the API token header
// and decodes the acknowledgment. Only HTTP 200 counts as success.

use std::fmt;

use async_trait::async_trait;
use dtclient_core::{EventData, EventResponse, ServerError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Result, SubmissionError};
use crate::submitter::EventSubmitter;

/// Client for the event ingestion API
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use dtclient::{ClientConfig, DynatraceClient, EventData, EventSubmitter};
///
/// let client = DynatraceClient::new(ClientConfig::from_env()?)?;
/// let event = EventData::marked_for_termination(["HOST-CA78D78BBC6687D3"], chrono::Utc::now());
/// let response = client.send_event(&event).await?;
/// ```
#[derive(Clone)]
pub struct DynatraceClient {
    client: Client,
    config: ClientConfig,
}

impl DynatraceClient {
    /// Build a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SubmissionError::config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build a client from the DT_* environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_event(&self, body: Vec<u8>) -> Result<reqwest::Response> {
        self.client
            .post(self.config.events_url())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.config.auth_header())
            .body(body)
            .send()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl EventSubmitter for DynatraceClient {
    async fn send_event(&self, event: &EventData) -> Result<EventResponse> {
        if event.event_type.is_empty() {
            return Err(SubmissionError::validation("no eventType set"));
        }

        let body = event.encode()?;

        debug!(
            url = %self.config.events_url(),
            event_type = %event.event_type,
            entities = event.entity_ids().len(),
            "Sending event"
        );

        let response = self.post_event(body).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if status != StatusCode::OK {
            let message = ServerError::parse(&bytes)
                .map(|server_error| server_error.error.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            warn!(status = %status, message = %message, "Event ingestion failed");
            return Err(SubmissionError::status(status.as_u16(), message));
        }

        let ack = EventResponse::decode(&bytes)?;

        debug!(
            stored_event_ids = ?ack.stored_event_ids,
            stored_correlation_ids = ack.stored_correlation_ids.len(),
            "Event stored"
        );

        Ok(ack)
    }
}

impl fmt::Debug for DynatraceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynatraceClient")
            .field("events_url", &self.config.events_url())
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

// Failures before a status line is read; status handling happens in send_event
fn transport_error(err: reqwest::Error) -> SubmissionError {
    if err.is_timeout() {
        return SubmissionError::connection(format!("request timed out: {}", err));
    }
    SubmissionError::connection(err.to_string())
}
