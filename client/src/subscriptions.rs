use std::collections::HashMap;

use reactor_shared::{AutoSpawnKey, EntityKey, ManagerKey, NodeKey};

/// A runtime notification a listener can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// An entity is about to attach to the node carrying its binding.
    EntityAttaching(NodeKey),
    OwnershipChanged(EntityKey),
    EntityDestroyed(EntityKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subscriber {
    AutoSpawn(AutoSpawnKey),
    OwnershipManager(ManagerKey),
}

/// Explicit subscribe/unsubscribe bookkeeping for runtime notifications.
/// Every subscribe has a matching unsubscribe once the listener goes away,
/// so `len()` drops back to zero when nothing is listening.
#[derive(Default)]
pub struct Subscriptions {
    topics: HashMap<Topic, Vec<Subscriber>>,
    count: usize,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the subscriber was already listening.
    pub fn subscribe(&mut self, topic: Topic, subscriber: Subscriber) -> bool {
        let subscribers = self.topics.entry(topic).or_default();
        if subscribers.contains(&subscriber) {
            return false;
        }
        subscribers.push(subscriber);
        self.count += 1;
        true
    }

    pub fn unsubscribe(&mut self, topic: Topic, subscriber: Subscriber) -> bool {
        let Some(subscribers) = self.topics.get_mut(&topic) else {
            return false;
        };
        let Some(position) = subscribers.iter().position(|s| *s == subscriber) else {
            return false;
        };
        subscribers.remove(position);
        if subscribers.is_empty() {
            self.topics.remove(&topic);
        }
        self.count -= 1;
        true
    }

    /// Drops every subscription held by `subscriber`, returning how many.
    pub fn unsubscribe_all(&mut self, subscriber: Subscriber) -> usize {
        let mut removed = 0;
        self.topics.retain(|_, subscribers| {
            let before = subscribers.len();
            subscribers.retain(|s| *s != subscriber);
            removed += before - subscribers.len();
            !subscribers.is_empty()
        });
        self.count -= removed;
        removed
    }

    /// Snapshot of the subscribers, in subscription order. Handlers may
    /// subscribe or unsubscribe while the snapshot is walked.
    pub fn subscribers(&self, topic: &Topic) -> Vec<Subscriber> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    pub fn is_subscribed(&self, topic: &Topic, subscriber: &Subscriber) -> bool {
        self.topics
            .get(topic)
            .is_some_and(|subscribers| subscribers.contains(subscriber))
    }

    /// Number of subscriptions held by one subscriber.
    pub fn count_for(&self, subscriber: &Subscriber) -> usize {
        self.topics
            .values()
            .filter(|subscribers| subscribers.contains(subscriber))
            .count()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
