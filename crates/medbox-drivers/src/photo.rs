//! The throat photodetector contract.

/// A single-channel analog photodetector at a magazine's throat.
///
/// A low reading indicates a pill is currently passing in front of the
/// sensor. There is no configuration surface here; the threshold below
/// which a reading counts as "pill present" is a firmware-level constant
/// (`SENSOR_THRESHOLD`), not a property of the sensor itself.
pub trait PhotoDetector {
    /// Takes one analog reading. Implementations should be cheap enough to
    /// call unconditionally on every tick the motor is moving.
    fn read(&mut self) -> u16;
}
