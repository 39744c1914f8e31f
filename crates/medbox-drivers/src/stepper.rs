//! The stepper driver contract.
//!
//! A `StepperDriver` owns one physical motor and advances it at most one
//! micro-step per call, against an internal position counter that the
//! implementation maintains. Direction is implied by the sign of the target
//! relative to the current position.

/// Drives one stepper motor one micro-step at a time.
///
/// Implementations are expected to be safe to call every tick: `advance_step`
/// must be a no-op (not an error) once the target has been reached.
pub trait StepperDriver {
    /// Resets the internal position counter to zero. Called once per pill
    /// attempt before a new target is set, so safety-travel limits are always
    /// measured from a known reference point.
    fn zero(&mut self);

    /// Commands the motor towards `target_steps`, signed relative to the last
    /// `zero()` call. Does not itself move the motor; `advance_step` does.
    fn set_target(&mut self, target_steps: i32);

    /// Returns the signed number of steps remaining to reach the current
    /// target. Zero means the motor has fully arrived.
    fn distance_to_go(&self) -> i32;

    /// Advances the motor by one micro-step towards the current target.
    /// A no-op if `distance_to_go()` is already zero.
    fn advance_step(&mut self);

    /// Immediately sets the target to the current position, halting further
    /// motion on subsequent `advance_step` calls.
    fn force_stop(&mut self);

    /// Disables the driver's output stage (e.g. de-energizes coils) to save
    /// power and avoid voltage sag during the next radio transmit.
    fn disable_outputs(&mut self);
}
