//! In-process fakes for the driver traits in `medbox-drivers`.
//!
//! Mirrors the teacher's simulation crate in spirit (deterministic,
//! in-process, no physical hardware required for CI) but without a Unix
//! socket or an async runtime: `medbox-core`'s machine is cooperative and
//! single-threaded, so the fakes only need to be called from plain `tick()`
//! loops driven by tests.

mod bus;
mod clock;
mod photo;
mod range;
mod stepper;

pub use bus::FakeBusClient;
pub use clock::FakeClock;
pub use photo::FakePhotoDetector;
pub use range::FakeRangeFinder;
pub use stepper::FakeStepperDriver;
