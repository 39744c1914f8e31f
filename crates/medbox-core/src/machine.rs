//! §4.2 DispenseMachine: the core state machine.
//!
//! Drives one pill at a time through INIT_PILL -> MOVING -> (JAM_REVERSE) ->
//! COOLDOWN -> REPORTING, coupling real-time actuation to the single
//! cooperative `tick()` call the Supervisor makes every loop iteration.

use crate::constants::{Limits, JAM_REVERSE_DRAIN_MS};
use crate::job::{BatchResult, DispenseJob};
use crate::magazine::Magazines;
use crate::queue::Queue;
use crate::state::State;
use medbox_drivers::{BusClient, Clock};
use medbox_proto::encode_dispensed;
use tracing::{debug, info, trace, warn};

/// The dispense controller. Owns no hardware itself — `magazines` and
/// `queue` are supplied by the caller each tick, per the ownership split in
/// spec §3 (the Supervisor owns them, not the machine).
pub struct DispenseMachine {
    state: State,
    job: Option<DispenseJob>,
    batch: Option<BatchResult>,
    dispensed_topic: String,
    limits: Limits,
}

impl DispenseMachine {
    pub fn new(dispensed_topic: impl Into<String>) -> Self {
        Self::with_limits(dispensed_topic, Limits::default())
    }

    pub fn with_limits(dispensed_topic: impl Into<String>, limits: Limits) -> Self {
        Self {
            state: State::Idle,
            job: None,
            batch: None,
            dispensed_topic: dispensed_topic.into(),
            limits,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Advances the machine by at most one motor step or one state
    /// transition, and returns immediately. Must be called unconditionally
    /// on every Supervisor tick.
    pub fn tick(&mut self, magazines: &mut Magazines, queue: &mut Queue, clock: &dyn Clock, bus: &mut dyn BusClient) {
        match self.state {
            State::Idle => self.tick_idle(queue, clock),
            State::InitPill => self.tick_init_pill(magazines),
            State::Moving => self.tick_moving(magazines, queue, clock),
            State::JamReverse => self.tick_jam_reverse(magazines, clock),
            State::Cooldown { since_ms } => self.tick_cooldown(queue, clock, since_ms),
            State::Reporting => self.tick_reporting(bus),
        }
    }

    fn tick_idle(&mut self, queue: &Queue, clock: &dyn Clock) {
        let Some(magazine) = queue.next_pending() else {
            return;
        };
        // Only seed a fresh BatchResult if this is the first pill of a new
        // batch; mid-batch re-selection (Cooldown -> Idle -> InitPill while
        // the other magazine still has pending pills) must not clobber a
        // failure already recorded earlier in the batch.
        if self.batch.is_none() {
            self.batch = Some(BatchResult { success: true });
        }
        self.job = Some(DispenseJob {
            magazine,
            pill_start_ms: clock.now_ms(),
            has_reversed_this_pill: false,
        });
        debug!(?magazine, "leaving IDLE to service pending pill");
        self.state = State::InitPill;
    }

    fn tick_init_pill(&mut self, magazines: &mut Magazines) {
        let job = self.job.as_mut().expect("INIT_PILL without an active job");
        let magazine = magazines.get_mut(job.magazine);
        magazine.stepper().zero();
        let target = magazine.next_direction().signed_target(self.limits.max_steps_safety);
        magazine.stepper().set_target(target);
        job.has_reversed_this_pill = false;
        self.state = State::Moving;
    }

    fn tick_moving(&mut self, magazines: &mut Magazines, queue: &mut Queue, clock: &dyn Clock) {
        let job = self.job.as_mut().expect("MOVING without an active job");
        let magazine = magazines.get_mut(job.magazine);

        magazine.stepper().advance_step();
        let reading = magazine.photo().read();
        trace!(reading, "photodetector sample");

        if reading < self.limits.sensor_threshold {
            // (a) Pill detected.
            magazine.stepper().force_stop();
            magazine.stepper().disable_outputs();
            queue.decrement(job.magazine);
            magazine.toggle_direction();
            info!(magazine = ?job.magazine, "pill detected");
            self.state = State::Cooldown { since_ms: clock.now_ms() };
        } else if !job.has_reversed_this_pill
            && clock.now_ms().saturating_sub(job.pill_start_ms) > self.limits.jam_timeout_ms
        {
            // (b) Jam suspected.
            warn!(magazine = ?job.magazine, "jam suspected, reversing");
            self.state = State::JamReverse;
        } else if magazine.stepper().distance_to_go() == 0 {
            // (c) Motor exhausted travel without a detection.
            magazine.stepper().disable_outputs();
            queue.decrement(job.magazine);
            if let Some(batch) = self.batch.as_mut() {
                batch.success = false;
            }
            warn!(magazine = ?job.magazine, "magazine appears empty");
            self.state = State::Cooldown { since_ms: clock.now_ms() };
        }
        // Otherwise remain in MOVING; one more micro-step was taken above.
    }

    fn tick_jam_reverse(&mut self, magazines: &mut Magazines, clock: &dyn Clock) {
        let job = self.job.as_mut().expect("JAM_REVERSE without an active job");
        let magazine = magazines.get_mut(job.magazine);

        magazine.stepper().force_stop();
        // The single permitted blocking operation: drain any remaining
        // deceleration, bounded by wall time rather than an unbounded wait.
        let drain_deadline = clock.now_ms().saturating_add(JAM_REVERSE_DRAIN_MS);
        while magazine.stepper().distance_to_go() != 0 && clock.now_ms() < drain_deadline {
            magazine.stepper().advance_step();
        }

        // Do NOT re-zero: the safety cap is measured from the zero point set
        // in INIT_PILL, and must hold across the reversal too.
        magazine.toggle_direction();
        let target = magazine.next_direction().signed_target(self.limits.max_steps_safety);
        magazine.stepper().set_target(target);

        job.has_reversed_this_pill = true;
        job.pill_start_ms = clock.now_ms();
        self.state = State::Moving;
    }

    fn tick_cooldown(&mut self, queue: &Queue, clock: &dyn Clock, since_ms: u64) {
        if clock.now_ms().saturating_sub(since_ms) < self.limits.cooldown_ms {
            return;
        }
        if queue.all_empty() {
            self.state = State::Reporting;
        } else {
            // Still within the same batch; re-select on the next tick.
            self.job = None;
            self.state = State::Idle;
        }
    }

    fn tick_reporting(&mut self, bus: &mut dyn BusClient) {
        let batch = self.batch.expect("REPORTING without a batch result");
        let payload = encode_dispensed(batch.success);
        if bus.publish(&self.dispensed_topic, payload, false) {
            info!(success = batch.success, "published batch result");
            self.batch = None;
            self.job = None;
            self.state = State::Idle;
        }
        // Otherwise stay in REPORTING and retry on the next tick; the
        // Supervisor still services the bus and levels in the meantime.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magazine::{Magazine, MagazineId};
    use medbox_sim::{FakeBusClient, FakeClock, FakePhotoDetector, FakeRangeFinder, FakeStepperDriver};

    fn magazine(id: MagazineId, steps_to_pill: Option<i32>) -> Magazine {
        Magazine::new(
            id,
            Box::new(FakeStepperDriver::new()),
            Box::new(FakePhotoDetector::fires_after(steps_to_pill)),
            Box::new(FakeRangeFinder::new(100)),
        )
    }

    fn run_until_idle(
        machine: &mut DispenseMachine,
        magazines: &mut Magazines,
        queue: &mut Queue,
        clock: &mut FakeClock,
        bus: &mut FakeBusClient,
        max_ticks: u32,
    ) {
        for _ in 0..max_ticks {
            clock.advance(1);
            machine.tick(magazines, queue, clock, bus);
            if matches!(machine.state(), State::Idle) && queue.all_empty() && machine.batch.is_none() {
                return;
            }
        }
        panic!("machine did not return to a drained IDLE within {max_ticks} ticks");
    }

    #[test]
    fn happy_path_dispenses_and_toggles_direction_back() {
        let mag1 = magazine(MagazineId::One, Some(1200));
        let mag2 = magazine(MagazineId::Two, None);
        let mut magazines = Magazines::new(mag1, mag2);
        let mut queue = Queue::new();
        queue.enqueue(MagazineId::One, 1);

        let mut machine = DispenseMachine::new("medbox/01/dispensed");
        let mut clock = FakeClock::new();
        let mut bus = FakeBusClient::new();

        run_until_idle(&mut machine, &mut magazines, &mut queue, &mut clock, &mut bus, 10_000);

        assert_eq!(bus.published(), &[("medbox/01/dispensed".to_string(), b"true".to_vec(), false)]);
        assert_eq!(queue.pending(MagazineId::One), 0);
        // One detection flips direction once within the run; started
        // Clockwise, ends CounterClockwise.
        assert_eq!(magazines.get(MagazineId::One).next_direction(), crate::direction::Direction::CounterClockwise);
    }

    #[test]
    fn mixed_batch_drains_magazine_one_before_two_and_reports_once() {
        let mag1 = magazine(MagazineId::One, Some(100));
        let mag2 = magazine(MagazineId::Two, Some(100));
        let mut magazines = Magazines::new(mag1, mag2);
        let mut queue = Queue::new();
        queue.enqueue(MagazineId::One, 1);
        queue.enqueue(MagazineId::Two, 1);

        let mut machine = DispenseMachine::new("medbox/01/dispensed");
        let mut clock = FakeClock::new();
        let mut bus = FakeBusClient::new();

        run_until_idle(&mut machine, &mut magazines, &mut queue, &mut clock, &mut bus, 10_000);

        assert_eq!(bus.published().len(), 1);
        assert_eq!(bus.published()[0].1, b"true");
        assert_eq!(queue.pending(MagazineId::One), 0);
        assert_eq!(queue.pending(MagazineId::Two), 0);
    }

    #[test]
    fn empty_magazine_fails_the_batch_without_toggling_direction() {
        // Never fires: travel exhausts at MAX_STEPS_SAFETY.
        let mag1 = magazine(MagazineId::One, None);
        let mag2 = magazine(MagazineId::Two, None);
        let mut magazines = Magazines::new(mag1, mag2);
        let mut queue = Queue::new();
        queue.enqueue(MagazineId::One, 1);

        let mut machine = DispenseMachine::new("medbox/01/dispensed");
        let mut clock = FakeClock::new();
        let mut bus = FakeBusClient::new();

        run_until_idle(&mut machine, &mut magazines, &mut queue, &mut clock, &mut bus, 20_000);

        assert_eq!(bus.published(), &[("medbox/01/dispensed".to_string(), b"false".to_vec(), false)]);
        assert_eq!(queue.pending(MagazineId::One), 0);
        assert_eq!(magazines.get(MagazineId::One).next_direction(), crate::direction::Direction::Clockwise);
    }

    #[test]
    fn publish_retry_stays_in_reporting_until_bus_accepts() {
        let mag1 = magazine(MagazineId::One, Some(10));
        let mag2 = magazine(MagazineId::Two, None);
        let mut magazines = Magazines::new(mag1, mag2);
        let mut queue = Queue::new();
        queue.enqueue(MagazineId::One, 1);

        let mut machine = DispenseMachine::new("medbox/01/dispensed");
        let mut clock = FakeClock::new();
        let mut bus = FakeBusClient::new();
        bus.fail_next_publishes(3);

        run_until_idle(&mut machine, &mut magazines, &mut queue, &mut clock, &mut bus, 10_000);

        assert_eq!(bus.published().len(), 1);
        assert_eq!(bus.published()[0].1, b"true");
    }
}
