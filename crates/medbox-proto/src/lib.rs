#![deny(clippy::all)]
#![deny(warnings)]

//! # medbox Bus Protocol
//!
//! JSON message schemas and topic naming for the medbox's message bus, plus
//! a tolerant parser for the inbound `dispense` request. Analogous to the
//! role `klipper-proto` plays for the host/MCU binary protocol, but over
//! JSON/MQTT instead of a framed binary wire.

mod dispense;
mod topics;

pub use dispense::{parse_dispense, ParseError, MAX_DISPENSE_AMOUNT};
pub use topics::Topics;

/// Builds the `levels` topic payload: `{"mag1_mm":<int|-1>,"mag2_mm":<int|-1>}`.
///
/// A reading of `None` (sensor error) is encoded as `-1`, per spec.
pub fn encode_levels(mag1_mm: Option<u16>, mag2_mm: Option<u16>) -> Vec<u8> {
    let payload = serde_json::json!({
        "mag1_mm": mag1_mm.map(i32::from).unwrap_or(-1),
        "mag2_mm": mag2_mm.map(i32::from).unwrap_or(-1),
    });
    serde_json::to_vec(&payload).expect("levels payload is always serializable")
}

/// The literal payload published to `dispensed`: the string `"true"` or
/// `"false"`, not a JSON boolean.
pub fn encode_dispensed(success: bool) -> &'static [u8] {
    if success {
        b"true"
    } else {
        b"false"
    }
}

/// The retained presence payloads, used both for the online announcement and
/// the last-will.
pub const PRESENCE_ONLINE: &[u8] = b"online";
pub const PRESENCE_OFFLINE: &[u8] = b"offline";
