use chrono::{DateTime, Utc};

use crate::envelope::EventEnvelope;

/// A notification published after a stock change has been applied
/// (XP award, achievement unlock, user-facing notice).
///
/// Listeners react to events; they cannot veto or roll back the change that
/// produced them.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, family first (e.g. "stock.xp.awarded").
    fn event_type(&self) -> &'static str;

    /// When the underlying change happened.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Leading segment of [`event_type`](Self::event_type), used as the
    /// envelope stream ("stock" for "stock.xp.awarded").
    fn family(&self) -> &'static str {
        let name = self.event_type();
        name.split('.').next().unwrap_or(name)
    }

    /// Wrap in an envelope on this event's family stream.
    fn into_envelope(self, subject: impl Into<String>, sequence_number: u64) -> EventEnvelope<Self> {
        let stream = self.family();
        EventEnvelope::wrap(stream, subject, sequence_number, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    struct Restocked(DateTime<Utc>);

    impl Event for Restocked {
        fn event_type(&self) -> &'static str {
            "bins.restocked"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn envelope_stream_is_the_event_family() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let envelope = Restocked(at).into_envelope("A-01", 4);

        assert_eq!(envelope.stream(), "bins");
        assert_eq!(envelope.subject(), "A-01");
        assert_eq!(envelope.sequence_number(), 4);
        assert_eq!(envelope.payload().occurred_at(), at);
    }
}
