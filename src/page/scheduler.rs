use crate::prelude::HashMap;
use instant::Instant;
use std::time::Duration;

/// Deferred continuations the page can have pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKey {
    /// Recompute the traffic map size once its page is visible
    TrafficLayoutFix,
    /// Open the feedback modal after a search
    FeedbackPrompt,
}

/// Keyed one-shot timers, polled by the owner.
///
/// At most one deadline exists per key; scheduling a pending key moves its
/// deadline instead of adding a second one.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: HashMap<TaskKey, Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire `delay` after `now`. Returns whether an earlier
    /// deadline for the same key was replaced.
    pub fn schedule(&mut self, key: TaskKey, now: Instant, delay: Duration) -> bool {
        let replaced = self.pending.insert(key, now + delay).is_some();
        if replaced {
            log::debug!("rescheduled {key:?} in {delay:?}");
        }
        replaced
    }

    pub fn cancel(&mut self, key: TaskKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Removes and returns every key due at `now`, earliest first
    pub fn poll(&mut self, now: Instant) -> Vec<TaskKey> {
        let mut due: Vec<(Instant, TaskKey)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*deadline, *key))
            .collect();
        due.sort();
        for (_, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.schedule(TaskKey::FeedbackPrompt, t0, Duration::from_secs(10));

        assert!(scheduler.poll(t0 + Duration::from_secs(9)).is_empty());
        assert_eq!(
            scheduler.poll(t0 + Duration::from_secs(10)),
            vec![TaskKey::FeedbackPrompt]
        );
        assert!(scheduler.poll(t0 + Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        assert!(!scheduler.schedule(TaskKey::FeedbackPrompt, t0, Duration::from_secs(10)));
        assert!(scheduler.schedule(
            TaskKey::FeedbackPrompt,
            t0 + Duration::from_secs(5),
            Duration::from_secs(10)
        ));
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.poll(t0 + Duration::from_secs(12)).is_empty());
        assert_eq!(scheduler.poll(t0 + Duration::from_secs(15)).len(), 1);
    }

    #[test]
    fn test_due_keys_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.schedule(TaskKey::FeedbackPrompt, t0, Duration::from_millis(50));
        scheduler.schedule(TaskKey::TrafficLayoutFix, t0, Duration::from_millis(100));
        assert_eq!(scheduler.next_deadline(), Some(t0 + Duration::from_millis(50)));
        assert_eq!(
            scheduler.poll(t0 + Duration::from_secs(1)),
            vec![TaskKey::FeedbackPrompt, TaskKey::TrafficLayoutFix]
        );
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.schedule(TaskKey::TrafficLayoutFix, t0, Duration::from_millis(100));
        assert!(scheduler.cancel(TaskKey::TrafficLayoutFix));
        assert!(!scheduler.cancel(TaskKey::TrafficLayoutFix));
        assert!(scheduler.poll(t0 + Duration::from_secs(1)).is_empty());
    }
}
