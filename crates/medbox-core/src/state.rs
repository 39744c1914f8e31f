//! The `DispenseMachine`'s state, per spec §3.

/// `State` ∈ {IDLE, INIT_PILL, MOVING, JAM_REVERSE, COOLDOWN, REPORTING}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    InitPill,
    Moving,
    JamReverse,
    /// Carries its own entry timestamp rather than a separate field on the
    /// machine, so "at least `COOLDOWN_MS` since entry" can't be checked
    /// against a stale timestamp left over from a previous cooldown.
    Cooldown { since_ms: u64 },
    Reporting,
}
