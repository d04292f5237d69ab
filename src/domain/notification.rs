use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Upper bound on simultaneously visible notifications.
pub const MAX_NOTIFICATION_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn default_ttl(&self) -> Duration {
        match self {
            NotificationKind::Info | NotificationKind::Success => Duration::from_secs(3),
            NotificationKind::Warning => Duration::from_secs(5),
            NotificationKind::Error => Duration::from_secs(8),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NotificationKind::Info => "i",
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "!",
            NotificationKind::Error => "✗",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

/// Bounded list of active notifications, oldest first. A full queue evicts
/// its oldest entry to make room. Capacity is clamped to
/// `1..=MAX_NOTIFICATION_CAPACITY`.
#[derive(Debug)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    capacity: usize,
    next_id: u64,
}

impl NotificationQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_NOTIFICATION_CAPACITY);
        Self {
            entries: VecDeque::new(),
            capacity,
            next_id: 0,
        }
    }

    pub fn enqueue(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.enqueue_at(kind, message, Instant::now())
    }

    pub fn enqueue_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification {
            id,
            kind,
            message: message.into(),
            created_at: now,
            ttl: kind.default_ttl(),
        });
        id
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|n| !n.is_expired(now));
        before - self.entries.len()
    }

    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_dismiss() {
        let mut queue = NotificationQueue::with_capacity(3);
        let first = queue.enqueue(NotificationKind::Info, "one");
        let second = queue.enqueue(NotificationKind::Success, "two");

        assert_eq!(queue.len(), 2);
        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));

        let remaining: Vec<_> = queue.active().map(|n| n.id).collect();
        assert_eq!(remaining, vec![second]);
    }

    #[test]
    fn test_full_queue_evicts_oldest() {
        let mut queue = NotificationQueue::with_capacity(2);
        queue.enqueue(NotificationKind::Info, "a");
        queue.enqueue(NotificationKind::Info, "b");
        queue.enqueue(NotificationKind::Warning, "c");

        assert_eq!(queue.len(), 2);
        let messages: Vec<_> = queue.active().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let mut queue = NotificationQueue::with_capacity(0);
        queue.enqueue(NotificationKind::Info, "a");
        queue.enqueue(NotificationKind::Info, "b");
        assert_eq!(queue.capacity(), 1);
        assert_eq!(queue.active().next().unwrap().message, "b");
    }

    #[test]
    fn test_oversized_capacity_is_clamped() {
        let mut queue = NotificationQueue::with_capacity(usize::MAX);
        assert_eq!(queue.capacity(), MAX_NOTIFICATION_CAPACITY);

        for i in 0..MAX_NOTIFICATION_CAPACITY + 5 {
            queue.enqueue(NotificationKind::Info, format!("note {}", i));
        }
        assert_eq!(queue.len(), MAX_NOTIFICATION_CAPACITY);
        assert_eq!(queue.active().next().unwrap().message, "note 5");
    }

    #[test]
    fn test_prune_expired_uses_kind_ttl() {
        let start = Instant::now();
        let mut queue = NotificationQueue::with_capacity(4);
        queue.enqueue_at(NotificationKind::Success, "saved", start);
        queue.enqueue_at(NotificationKind::Error, "failed", start);

        assert_eq!(queue.prune_expired(start + Duration::from_secs(1)), 0);
        assert_eq!(queue.prune_expired(start + Duration::from_secs(4)), 1);
        assert_eq!(queue.active().next().unwrap().kind, NotificationKind::Error);
        assert_eq!(queue.prune_expired(start + Duration::from_secs(8)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_evictions() {
        let mut queue = NotificationQueue::with_capacity(1);
        let a = queue.enqueue(NotificationKind::Info, "a");
        let b = queue.enqueue(NotificationKind::Info, "b");
        assert_ne!(a, b);
        assert!(!queue.dismiss(a));
        assert!(queue.dismiss(b));
    }
}
