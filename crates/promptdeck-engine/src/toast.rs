#![forbid(unsafe_code)]

//! Ephemeral toast notifications.
//!
//! A process-wide ordered queue. Each toast gets a monotonically increasing
//! id and expires independently a fixed interval after creation; display
//! order follows insertion order. The queue starts empty.

use std::time::Duration;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_millis(3_000);

/// Unique, monotonically increasing toast identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(pub u64);

/// One queued notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    age: Duration,
}

impl Toast {
    /// Time left before this toast expires.
    pub fn remaining(&self) -> Duration {
        TOAST_TTL.saturating_sub(self.age)
    }
}

/// The toast queue.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast and return its id.
    pub fn push(&mut self, message: impl Into<String>) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        tracing::debug!(id = id.0, %message, "toast queued");
        self.toasts.push(Toast {
            id,
            message,
            age: Duration::ZERO,
        });
        id
    }

    /// Age every toast by `dt` and drop the expired ones. Removal is
    /// per-toast, not FIFO-batched.
    pub fn advance(&mut self, dt: Duration) {
        for toast in &mut self.toasts {
            toast.age += dt;
        }
        self.toasts.retain(|t| t.age < TOAST_TTL);
    }

    /// Visible toasts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_empty() {
        assert!(ToastQueue::new().is_empty());
    }

    #[test]
    fn ids_are_distinct_and_increasing() {
        let mut q = ToastQueue::new();
        let a = q.push("first");
        let b = q.push("second");
        assert!(b > a);
        let order: Vec<_> = q.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn toast_lives_for_exactly_the_ttl() {
        let mut q = ToastQueue::new();
        q.push("hello");
        q.advance(TOAST_TTL - ms(1));
        assert_eq!(q.len(), 1);
        // Present for [T, T+TTL): gone at exactly TTL.
        q.advance(ms(1));
        assert!(q.is_empty());
    }

    #[test]
    fn expiry_is_independent_per_toast() {
        let mut q = ToastQueue::new();
        q.push("early");
        q.advance(ms(2_000));
        q.push("late");
        q.advance(ms(1_000));
        let left: Vec<_> = q.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(left, vec!["late"]);
        q.advance(ms(2_000));
        assert!(q.is_empty());
    }

    #[test]
    fn remaining_counts_down() {
        let mut q = ToastQueue::new();
        q.push("x");
        q.advance(ms(1_000));
        let toast = q.iter().next().unwrap();
        assert_eq!(toast.remaining(), ms(2_000));
    }
}
