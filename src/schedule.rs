//! Deferred single-shot actions tagged with a session generation
//!
//! Anything scheduled against one game session is discarded when it comes
//! due in a later session, so a restart can never be overwritten by a
//! leftover delayed move.

/// One pending action
#[derive(Debug, Clone)]
struct Scheduled<A> {
    due: f64,
    generation: u64,
    action: A,
}

/// Time-ordered queue of deferred actions
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    /// Seconds since the scheduler was created
    now: f64,
    pending: Vec<Scheduled<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            pending: Vec::new(),
        }
    }

    /// Queue `action` to fire `delay` seconds from now for `generation`
    pub fn schedule(&mut self, delay: f32, generation: u64, action: A) {
        let due = self.now + f64::from(delay.max(0.0));
        // Insert after every entry due no later, keeping FIFO order for ties
        let index = self.pending.partition_point(|s| s.due <= due);
        self.pending.insert(
            index,
            Scheduled {
                due,
                generation,
                action,
            },
        );
    }

    /// Advance the clock and return due actions belonging to `current_generation`
    ///
    /// Due actions from other generations are dropped.
    pub fn advance(&mut self, dt: f32, current_generation: u64) -> Vec<A> {
        self.now += f64::from(dt);
        let due_count = self.pending.partition_point(|s| s.due <= self.now);
        let mut fired = Vec::with_capacity(due_count);
        for scheduled in self.pending.drain(..due_count) {
            if scheduled.generation == current_generation {
                fired.push(scheduled.action);
            } else {
                log::debug!(
                    "Discarded stale action from generation {} (current {})",
                    scheduled.generation,
                    current_generation
                );
            }
        }
        fired
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
