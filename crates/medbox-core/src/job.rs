//! Transient per-pill and per-batch bookkeeping.

use crate::magazine::MagazineId;

/// At most one active at a time: the pill attempt currently in flight.
#[derive(Debug)]
pub struct DispenseJob {
    pub magazine: MagazineId,
    pub pill_start_ms: u64,
    pub has_reversed_this_pill: bool,
}

/// The outcome of the whole batch, published once when the queue drains.
#[derive(Debug, Clone, Copy)]
pub struct BatchResult {
    pub success: bool,
}
