use medbox_drivers::StepperDriver;

/// A stepper that moves exactly one step per `advance_step()` call toward
/// whatever target was last set, relative to the position at `zero()`.
#[derive(Debug, Default)]
pub struct FakeStepperDriver {
    position: i32,
    target: i32,
    outputs_enabled: bool,
}

impl FakeStepperDriver {
    pub fn new() -> Self {
        Self { position: 0, target: 0, outputs_enabled: true }
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn outputs_enabled(&self) -> bool {
        self.outputs_enabled
    }
}

impl StepperDriver for FakeStepperDriver {
    fn zero(&mut self) {
        self.position = 0;
        self.target = 0;
        self.outputs_enabled = true;
    }

    fn set_target(&mut self, target_steps: i32) {
        self.target = target_steps;
    }

    fn distance_to_go(&self) -> i32 {
        self.target - self.position
    }

    fn advance_step(&mut self) {
        if self.position < self.target {
            self.position += 1;
        } else if self.position > self.target {
            self.position -= 1;
        }
    }

    fn force_stop(&mut self) {
        self.target = self.position;
    }

    fn disable_outputs(&mut self) {
        self.outputs_enabled = false;
    }
}
