use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for an event, carrying stream metadata.
///
/// - `stream` names the publishing component (e.g. `"stock"`).
/// - `subject` is the identifier the event is about (item id, bin id, ...).
/// - `sequence_number` is monotonically increasing per publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    stream: String,
    subject: String,

    /// Monotonically increasing position in the publisher's stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        stream: impl Into<String>,
        subject: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            stream: stream.into(),
            subject: subject.into(),
            sequence_number,
            payload,
        }
    }

    /// Wrap a payload with a fresh time-ordered (UUIDv7) event id.
    pub fn wrap(
        stream: impl Into<String>,
        subject: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self::new(Uuid::now_v7(), stream, subject, sequence_number, payload)
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
