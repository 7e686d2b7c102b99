// Acknowledgment returned by the ingestion endpoint

use serde::{Deserialize, Serialize};

use crate::codec::null_as_default;
use crate::error::{ModelError, Result};

/// Identifiers under which the server stored the event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub stored_event_ids: Vec<i64>,
    pub stored_ids: Vec<String>,
    /// Empty for uncorrelated events; `null` and absent both decode as empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub stored_correlation_ids: Vec<String>,
}

impl EventResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ModelError::decode(e.to_string()))
    }
}

/// Error envelope the API returns with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ServerError {
    pub error: ServerErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ServerError {
    /// Best-effort parse; `None` when the body is not an error envelope
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}
