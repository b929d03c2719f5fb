use std::{cmp::Ordering, collections::BinaryHeap, task::Waker, time::Instant};

/// A task waiting for `deadline` to pass.
pub(crate) struct Sleeper {
    pub deadline: Instant,
    pub waker: Waker,
}

impl PartialEq for Sleeper {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}

impl Eq for Sleeper {}

impl PartialOrd for Sleeper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sleeper {
    // Reversed so the heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.deadline.cmp(&self.deadline)
    }
}

pub(crate) struct Reactor {
    pub(crate) sleepers: BinaryHeap<Sleeper>,
}

impl Reactor {
    pub const fn new() -> Self {
        Self {
            sleepers: BinaryHeap::new(),
        }
    }

    /// Wakes every sleeper whose deadline is at or before `now`.
    pub fn tick(&mut self, now: Instant) {
        while self
            .sleepers
            .peek()
            .is_some_and(|sleeper| sleeper.deadline <= now)
        {
            if let Some(sleeper) = self.sleepers.pop() {
                sleeper.waker.wake();
            }
        }
    }

    /// The earliest deadline any sleeper is waiting on.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sleepers.peek().map(|sleeper| sleeper.deadline)
    }
}
