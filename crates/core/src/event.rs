// Event payload posted to the ingestion endpoint
//
// Wire format:
// {
//   "eventType": "MARKED_FOR_TERMINATION",
//   "start": 20,
//   "end": 20,
//   "description": "...",
//   "attachRules": { "entityIds": ["HOST-..."] },
//   "source": "OneAgent Operator"
// }

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::null_as_default;
use crate::error::{ModelError, Result};

/// Event type raised when a node is cordoned and about to be drained
pub const MARKED_FOR_TERMINATION: &str = "MARKED_FOR_TERMINATION";

/// Source reported by the operator when it raises events
pub const DEFAULT_SOURCE: &str = "OneAgent Operator";

const NODE_DRAIN_DESCRIPTION: &str =
    "K8s node was marked unschedulable. Node is likely being drained";

/// Entities an event is attached to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachRules {
    #[serde(deserialize_with = "null_as_default")]
    pub entity_ids: Vec<String>,
}

/// One monitoring event
///
/// All fields default to their zero value when missing from the input or
/// set to `null`.
/// `event_type` must be non-empty before the event can be submitted, see
/// [`EventData::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    #[serde(deserialize_with = "null_as_default")]
    pub event_type: String,
    /// Epoch milliseconds
    #[serde(rename = "start", deserialize_with = "null_as_default")]
    pub start_in_millis: u64,
    /// Epoch milliseconds; not checked against `start_in_millis`
    #[serde(rename = "end", deserialize_with = "null_as_default")]
    pub end_in_millis: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attach_rules: AttachRules,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
}

impl EventData {
    /// Create an event of the given type with every other field empty
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Default::default()
        }
    }

    /// Node-drain notice for the given host entities
    pub fn marked_for_termination<I, S>(entity_ids: I, at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MARKED_FOR_TERMINATION)
            .with_description(NODE_DRAIN_DESCRIPTION)
            .with_source(DEFAULT_SOURCE)
            .with_entity_ids(entity_ids)
            .at(at)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Append one entity to the attach rules
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.attach_rules.entity_ids.push(entity_id.into());
        self
    }

    /// Replace the attached entities
    pub fn with_entity_ids<I, S>(mut self, entity_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attach_rules.entity_ids = entity_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeframe(mut self, start_in_millis: u64, end_in_millis: u64) -> Self {
        self.start_in_millis = start_in_millis;
        self.end_in_millis = end_in_millis;
        self
    }

    /// Point-in-time event: start and end both set to `at`
    pub fn at(self, at: DateTime<Utc>) -> Self {
        // Pre-epoch timestamps clamp to zero
        let millis = u64::try_from(at.timestamp_millis()).unwrap_or_default();
        self.with_timeframe(millis, millis)
    }

    /// Parse an event from JSON. Unknown fields are ignored and missing
    /// fields take their zero value.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ModelError::decode(e.to_string()))
    }

    /// Serialize every recognized field
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ModelError::encode(e.to_string()))
    }

    /// Check the fields required for submission
    pub fn validate(&self) -> Result<()> {
        if self.event_type.is_empty() {
            return Err(ModelError::validation("missing eventType"));
        }
        Ok(())
    }

    pub fn entity_ids(&self) -> &[String] {
        &self.attach_rules.entity_ids
    }
}
