//! Deferred actions driven by the simulation clock.
//!
//! Every scheduled action carries the token it was scheduled under. Consumers compare the token
//! against the current generation of whatever it targets and drop the action when they differ.

use smallvec::SmallVec;

/// An action scheduled to fire once the clock reaches `due_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scheduled<A> {
    due_ms: f64,
    action: A,
}

/// A queue of one-shot actions, ordered by due time then insertion order.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    entries: Vec<Scheduled<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<A: Copy> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, action: A) {
        let due_ms = now_ms + delay_ms.max(0.0);
        // Keep insertion order stable among entries sharing a due time
        let index = self.entries.partition_point(|entry| entry.due_ms <= due_ms);
        self.entries.insert(index, Scheduled { due_ms, action });
    }

    /// Removes and returns every action due at or before `now_ms`.
    pub fn drain_due(&mut self, now_ms: f64) -> SmallVec<[A; 4]> {
        let count = self.entries.partition_point(|entry| entry.due_ms <= now_ms);
        self.entries.drain(..count).map(|entry| entry.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_respects_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(0.0, 300.0, 'c');
        queue.schedule(0.0, 100.0, 'a');
        queue.schedule(0.0, 100.0, 'b');

        assert_eq!(queue.drain_due(99.0).len(), 0);
        assert_eq!(queue.drain_due(100.0).as_slice(), &['a', 'b']);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_due(1000.0).as_slice(), &['c']);
        assert!(queue.is_empty());
    }
}
