//! XP awards, one-shot achievements and user-facing notices.
//!
//! The store does not score anything itself; it publishes `StockEvent`s and
//! lets the XP and notification collaborators react.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockquest_events::{Event, EventBus, EventEnvelope};

/// XP amounts per action.
pub mod xp {
    pub const ITEM_INSPECTION: u32 = 5;
    pub const STOCK_ADJUSTMENT: u32 = 20;
    pub const FIRST_ADJUSTMENT: u32 = 50;
    pub const PERFECT_AUDIT: u32 = 50;
    pub const PERFECT_AUDIT_ACHIEVEMENT: u32 = 100;
    pub const AUDIT_COMPLETE: u32 = 30;
    pub const STOCK_TRANSFER: u32 = 25;
    pub const BIN_AUDIT: u32 = 50;
    pub const NEW_STOCK: u32 = 30;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstAdjustment,
    PerfectAudit,
}

impl Achievement {
    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstAdjustment => "First Adjustment!",
            Achievement::PerfectAudit => "Perfect Audit Master!",
        }
    }

    pub fn xp(self) -> u32 {
        match self {
            Achievement::FirstAdjustment => xp::FIRST_ADJUSTMENT,
            Achievement::PerfectAudit => xp::PERFECT_AUDIT_ACHIEVEMENT,
        }
    }

    /// Reason string attached to the achievement's XP award.
    fn reason(self) -> &'static str {
        match self {
            Achievement::FirstAdjustment => "First Adjustment!",
            Achievement::PerfectAudit => "Achievement: Perfect Audit!",
        }
    }
}

/// Per-session unlock flags. Each achievement unlocks at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Achievements {
    first_adjustment: bool,
    perfect_audit: bool,
}

impl Achievements {
    /// Mark `achievement` unlocked; true only on the first call.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        let flag = match achievement {
            Achievement::FirstAdjustment => &mut self.first_adjustment,
            Achievement::PerfectAudit => &mut self.perfect_audit,
        };
        !std::mem::replace(flag, true)
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        match achievement {
            Achievement::FirstAdjustment => self.first_adjustment,
            Achievement::PerfectAudit => self.perfect_audit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockEvent {
    XpAwarded {
        amount: u32,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
    AchievementUnlocked {
        achievement: Achievement,
        title: String,
        xp: u32,
        occurred_at: DateTime<Utc>,
    },
    Notice {
        level: NoticeLevel,
        message: String,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for StockEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockEvent::XpAwarded { .. } => "stock.xp.awarded",
            StockEvent::AchievementUnlocked { .. } => "stock.achievement.unlocked",
            StockEvent::Notice { .. } => "stock.notice",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::XpAwarded { occurred_at, .. }
            | StockEvent::AchievementUnlocked { occurred_at, .. }
            | StockEvent::Notice { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Sum of every `XpAwarded` amount. Achievement events carry their XP in a
/// paired `XpAwarded`, so they are not counted twice.
pub fn tally_xp<'a>(events: impl IntoIterator<Item = &'a StockEvent>) -> u64 {
    events
        .into_iter()
        .map(|e| match e {
            StockEvent::XpAwarded { amount, .. } => u64::from(*amount),
            _ => 0,
        })
        .sum()
}

pub type StockEnvelope = EventEnvelope<StockEvent>;

/// Publishes stock events with per-store sequence numbers.
///
/// Publication is fire-and-forget: failures are logged, never returned.
#[derive(Debug)]
pub struct Notifier<B> {
    bus: B,
    sequence: u64,
}

impl<B> Notifier<B>
where
    B: EventBus<StockEnvelope>,
{
    pub fn new(bus: B) -> Self {
        Self { bus, sequence: 0 }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn award(&mut self, subject: &str, amount: u32, reason: &str, now: DateTime<Utc>) {
        self.publish(
            subject,
            StockEvent::XpAwarded {
                amount,
                reason: reason.to_string(),
                occurred_at: now,
            },
        );
    }

    /// Publish the unlock plus its XP award.
    pub fn unlocked(&mut self, subject: &str, achievement: Achievement, now: DateTime<Utc>) {
        self.award(subject, achievement.xp(), achievement.reason(), now);
        self.publish(
            subject,
            StockEvent::AchievementUnlocked {
                achievement,
                title: achievement.title().to_string(),
                xp: achievement.xp(),
                occurred_at: now,
            },
        );
    }

    pub fn notice(&mut self, subject: &str, level: NoticeLevel, message: impl Into<String>, now: DateTime<Utc>) {
        self.publish(
            subject,
            StockEvent::Notice {
                level,
                message: message.into(),
                occurred_at: now,
            },
        );
    }

    fn publish(&mut self, subject: &str, event: StockEvent) {
        self.sequence += 1;
        let event_type = event.event_type();
        let envelope = event.into_envelope(subject, self.sequence);
        if let Err(err) = self.bus.publish(envelope) {
            tracing::warn!(event_type, subject, "failed to publish stock event: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockquest_events::InMemoryEventBus;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn achievements_unlock_once() {
        let mut achievements = Achievements::default();
        assert!(achievements.unlock(Achievement::FirstAdjustment));
        assert!(!achievements.unlock(Achievement::FirstAdjustment));
        assert!(achievements.is_unlocked(Achievement::FirstAdjustment));
        assert!(!achievements.is_unlocked(Achievement::PerfectAudit));
    }

    #[test]
    fn notifier_sequences_envelopes_and_pairs_unlock_with_xp() {
        let bus = InMemoryEventBus::<StockEnvelope>::new();
        let sub = bus.subscribe();
        let mut notifier = Notifier::new(bus);

        notifier.award("STK-0001", xp::STOCK_ADJUSTMENT, "Stock Adjustment", now());
        notifier.unlocked("STK-0001", Achievement::FirstAdjustment, now());

        let envelopes = sub.drain();
        let sequences: Vec<u64> = envelopes.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(envelopes.iter().all(|e| e.stream() == "stock" && e.subject() == "STK-0001"));

        let events: Vec<StockEvent> = envelopes.into_iter().map(EventEnvelope::into_payload).collect();
        assert_eq!(tally_xp(&events), 70);
        assert_eq!(events[2].event_type(), "stock.achievement.unlocked");
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = StockEvent::Notice {
            level: NoticeLevel::Success,
            message: "ok".to_string(),
            occurred_at: now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "notice");
        assert_eq!(json["level"], "success");
    }
}
