// EventSubmitter trait
//
// Seam between code that raises events and the transport that delivers them.

use async_trait::async_trait;
use dtclient_core::{EventData, EventResponse};

use crate::error::Result;

/// Submits one event and returns the server's acknowledgment
///
/// Implementations must reject an event with an empty `event_type` before
/// doing any I/O. Calls are independent; submitting the same event twice may
/// create two records on the server.
#[async_trait]
pub trait EventSubmitter: Send + Sync {
    async fn send_event(&self, event: &EventData) -> Result<EventResponse>;
}
