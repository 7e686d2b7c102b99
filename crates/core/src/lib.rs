// Event Model for the monitoring event API
//
// This crate holds the wire types exchanged with the event-ingestion endpoint.
//
// Key design decisions:
// - EventData is a plain serde record; unknown fields are dropped on decode
// - Every recognized field is always encoded, so decode → encode of a payload
//   with only known fields is JSON-equivalent to the input
// - Validation does not run on decode; an EventData without eventType is a
//   valid partial object until someone tries to submit it
// - EventResponse keeps empty arrays as empty Vecs
// - JSON null decodes to the field's zero value, like an absent field

mod codec;
pub mod error;
pub mod event;
pub mod response;

// Re-exports for convenience
pub use error::{ModelError, Result};
pub use event::{AttachRules, EventData, DEFAULT_SOURCE, MARKED_FOR_TERMINATION};
pub use response::{EventResponse, ServerError, ServerErrorBody};
