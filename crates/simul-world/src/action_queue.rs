//! Pending actions awaiting the next tick.
//!
//! The queue is a plain FIFO buffer. The simulator drains it once per tick
//! with [`ActionQueue::drain_all`]; anything pushed after the drain stays
//! queued for the following tick.

use serde::{Deserialize, Serialize};
use simul_types::Action;

/// FIFO buffer of deferred [`Action`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    pending: Vec<Action>,
}

impl ActionQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Append an action to the back of the queue.
    pub fn push(&mut self, action: Action) {
        self.pending.push(action);
    }

    /// Take every queued action in submission order, leaving the queue empty.
    pub fn drain_all(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    /// Queued actions in submission order.
    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use simul_types::CountryId;

    use super::*;

    fn war(a: u32, b: u32) -> Action {
        Action::DeclareWar {
            actor: CountryId::new(a),
            other: CountryId::new(b),
        }
    }

    #[test]
    fn drain_returns_in_submission_order_and_clears() {
        let mut queue = ActionQueue::new();
        queue.push(war(0, 1));
        queue.push(war(1, 2));
        assert_eq!(queue.len(), 2);

        let drained = queue.drain_all();
        assert_eq!(drained, vec![war(0, 1), war(1, 2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn push_after_drain_is_kept_for_next_drain() {
        let mut queue = ActionQueue::new();
        queue.push(war(0, 1));
        let first = queue.drain_all();
        queue.push(war(2, 3));
        assert_eq!(first.len(), 1);
        assert_eq!(queue.pending(), &[war(2, 3)]);
    }
}
