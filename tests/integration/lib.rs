//! Empty crate root; this package exists only to host workspace-level
//! black-box scenario tests under `tests/scenarios.rs`, exercised against
//! `medbox-core`'s `Supervisor` and `medbox-sim`'s fakes.
