//! Tunable constants from spec §6. These are compile-time defaults;
//! `medbox-firmware`'s `Config` may override them from the CLI for bench
//! testing, but the values here are what ships.

/// Maximum signed step count a single pill attempt may travel in one
/// direction, measured from the per-pill zero point.
pub const MAX_STEPS_SAFETY: i32 = 5000;

/// Photodetector reading below which a pill is considered present.
pub const SENSOR_THRESHOLD: u16 = 500;

/// Elapsed time since a pill attempt began, without detection, that counts
/// as a suspected jam.
pub const JAM_TIMEOUT_MS: u64 = 8000;

/// Minimum wall time spent in COOLDOWN before the next state decision.
pub const COOLDOWN_MS: u64 = 200;

/// Minimum spacing between consecutive `levels` publishes.
pub const LEVEL_INTERVAL_MS: u64 = 4000;

/// Wall-time cap on the busy-step drain performed in JAM_REVERSE to bring
/// the motor to a full stop before reversing. Not one of spec §6's named
/// tunables — an implementation-level bound per the design notes ("a
/// bounded busy-step loop with a wall-time cap rather than an unbounded
/// blocking call"), chosen to comfortably exceed realistic stepper
/// deceleration time without stalling the tick loop.
pub const JAM_REVERSE_DRAIN_MS: u64 = 50;

/// The subset of the above that a deployment may retune from the CLI
/// without recompiling (spec §6 calls these "compile-time constants", but a
/// firmware binary that can't be retuned for a bench rig without a flash
/// cycle is painful to test against). `JAM_REVERSE_DRAIN_MS` is not included
/// — it is an implementation detail, not one of the named tunables.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_steps_safety: i32,
    pub sensor_threshold: u16,
    pub jam_timeout_ms: u64,
    pub cooldown_ms: u64,
    pub level_interval_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_steps_safety: MAX_STEPS_SAFETY,
            sensor_threshold: SENSOR_THRESHOLD,
            jam_timeout_ms: JAM_TIMEOUT_MS,
            cooldown_ms: COOLDOWN_MS,
            level_interval_ms: LEVEL_INTERVAL_MS,
        }
    }
}
