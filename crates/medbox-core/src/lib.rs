#![deny(clippy::all)]
#![deny(warnings)]

//! # medbox Dispense Controller
//!
//! The cooperative, single-threaded core of the medbox firmware: a fixed
//! two-magazine `Queue`, the `DispenseMachine` state machine that drives one
//! pill attempt at a time, the `LevelPublisher` and `PresenceManager`
//! ancillary duties, and the `Supervisor` that ties them together in the
//! fixed per-tick order the firmware requires.
//!
//! Contains no hardware or bus implementation of its own; every concrete
//! collaborator (stepper, photodetector, range finder, bus client, clock)
//! comes in through the traits in `medbox-drivers`.

mod constants;
mod direction;
mod job;
mod levels;
mod machine;
mod magazine;
mod presence;
mod queue;
mod state;
mod supervisor;

pub use constants::{
    Limits, COOLDOWN_MS, JAM_TIMEOUT_MS, LEVEL_INTERVAL_MS, MAX_STEPS_SAFETY, SENSOR_THRESHOLD,
};
pub use direction::Direction;
pub use job::{BatchResult, DispenseJob};
pub use levels::LevelPublisher;
pub use machine::DispenseMachine;
pub use magazine::{Magazine, MagazineId, Magazines};
pub use presence::PresenceManager;
pub use queue::Queue;
pub use state::State;
pub use supervisor::Supervisor;
