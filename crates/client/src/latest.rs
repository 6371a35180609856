//! Supersession guard for dependent fetches.
//!
//! Rapid repeated triggers (brand changed, row re-selected) can leave
//! multiple lookups in flight. Each trigger takes a [`Ticket`]; when a
//! response lands, only the most recently issued ticket's result is
//! applied. Stale results are dropped silently, which also covers abort
//! errors from superseded requests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request-generation counter.
#[derive(Debug, Default)]
pub struct LatestOnly {
    generation: AtomicU64,
}

/// Proof of which generation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding all outstanding tickets.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Admit a result only if its ticket is still current.
    pub fn admit<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            None
        }
    }
}
