#![deny(clippy::all)]
#![deny(warnings)]

//! # medbox Hardware Collaborator Contracts
//!
//! This crate defines the traits that the medbox firmware's actuation and
//! sensing logic is written against. It deliberately contains no concrete
//! hardware implementation: the stepper driver library, the Wi-Fi link, and
//! the message-bus client are external collaborators, and only their
//! contracts matter to the firmware logic in `medbox-core`.
//!
//! Mirrors the role `embedded-hal` plays for GPIO pins: a small, dependency-free
//! set of traits that drivers implement and application logic is generic over.

mod bus;
mod clock;
mod photo;
mod range;
mod stepper;

pub use bus::BusClient;
pub use clock::Clock;
pub use photo::PhotoDetector;
pub use range::{RangeFinder, RangeReading, RangeStatus};
pub use stepper::StepperDriver;
