//! Single-process bus used to hand stock notifications to listeners
//! (XP tracker, notice surface) living in the same host.

use std::sync::{Mutex, mpsc};

use thiserror::Error;

use crate::bus::{EventBus, Subscription};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// A thread panicked while holding the subscriber list.
    #[error("subscriber list lock poisoned")]
    Poisoned,
}

#[derive(Debug)]
struct Listeners<M> {
    senders: Vec<mpsc::Sender<M>>,
    published: u64,
}

/// Broadcast bus over `mpsc` channels.
///
/// Every live subscription gets its own copy of each message. A listener that
/// dropped its [`Subscription`] is forgotten on the next publish; publishing
/// with nobody listening is not an error.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    listeners: Mutex<Listeners<M>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live subscriptions as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().map(|l| l.senders.len()).unwrap_or(0)
    }

    /// Messages published since the bus was created.
    pub fn published_count(&self) -> u64 {
        self.listeners.lock().map(|l| l.published).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Listeners {
                senders: Vec::new(),
                published: 0,
            }),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut listeners = self.listeners.lock().map_err(|_| InMemoryBusError::Poisoned)?;
        listeners.published += 1;

        let before = listeners.senders.len();
        listeners.senders.retain(|tx| tx.send(message.clone()).is_ok());
        let delivered = listeners.senders.len();
        if delivered != before {
            tracing::debug!(dropped = before - delivered, delivered, "forgot closed stock listeners");
        }

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // With a poisoned lock the subscription is still handed out; it never receives.
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.senders.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_each_message() {
        let bus = InMemoryEventBus::<u32>::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(1).unwrap();
        bus.publish(2).unwrap();

        assert_eq!(first.drain(), vec![1, 2]);
        assert_eq!(second.drain(), vec![1, 2]);
        assert_eq!(bus.published_count(), 2);
    }

    #[test]
    fn late_subscriber_misses_earlier_messages() {
        let bus = InMemoryEventBus::<&'static str>::new();
        bus.publish("early").unwrap();

        let sub = bus.subscribe();
        bus.publish("late").unwrap();

        assert_eq!(sub.drain(), vec!["late"]);
    }

    #[test]
    fn closed_listeners_are_forgotten_and_silence_is_fine() {
        let bus = InMemoryEventBus::<u8>::new();
        assert!(bus.publish(1).is_ok());

        let kept = bus.subscribe();
        drop(bus.subscribe());
        bus.publish(7).unwrap();

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), 7);
    }
}
