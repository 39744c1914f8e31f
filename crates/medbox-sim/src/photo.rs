use medbox_drivers::PhotoDetector;

const ABOVE_THRESHOLD: u16 = 900;
const BELOW_THRESHOLD: u16 = 100;

/// Reports `BELOW_THRESHOLD` starting on the `fires_after`-th call to
/// `read()`, or never if `None`. Counts calls rather than stepper position,
/// since in this fake the two always move in lockstep (one `read()` per
/// `advance_step()` in `DispenseMachine::tick_moving`).
pub struct FakePhotoDetector {
    fires_after: Option<i32>,
    calls: i32,
}

impl FakePhotoDetector {
    pub fn fires_after(steps: Option<i32>) -> Self {
        Self { fires_after: steps, calls: 0 }
    }
}

impl PhotoDetector for FakePhotoDetector {
    fn read(&mut self) -> u16 {
        self.calls += 1;
        match self.fires_after {
            Some(n) if self.calls >= n => BELOW_THRESHOLD,
            _ => ABOVE_THRESHOLD,
        }
    }
}
