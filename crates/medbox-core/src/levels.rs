//! §4.3 LevelPublisher: periodic fill-level reporting.

use crate::constants::Limits;
use crate::magazine::Magazines;
use medbox_drivers::{BusClient, Clock, RangeStatus};
use medbox_proto::encode_levels;

/// Publishes both magazines' fill levels to `levels_topic` no more often
/// than every `Limits::level_interval_ms`. A range reading with
/// `RangeStatus::Error` is reported as absent rather than as a zero or
/// stale distance.
pub struct LevelPublisher {
    levels_topic: String,
    last_published_ms: Option<u64>,
    level_interval_ms: u64,
}

impl LevelPublisher {
    pub fn new(levels_topic: impl Into<String>) -> Self {
        Self::with_limits(levels_topic, Limits::default())
    }

    pub fn with_limits(levels_topic: impl Into<String>, limits: Limits) -> Self {
        Self {
            levels_topic: levels_topic.into(),
            last_published_ms: None,
            level_interval_ms: limits.level_interval_ms,
        }
    }

    pub fn tick(&mut self, magazines: &mut Magazines, clock: &dyn Clock, bus: &mut dyn BusClient) {
        let now = clock.now_ms();
        if let Some(last) = self.last_published_ms {
            if now.saturating_sub(last) < self.level_interval_ms {
                return;
            }
        }

        let mut readings = magazines.iter_mut().map(|m| m.range().read_range());
        let mag1 = readings.next().expect("two magazines");
        let mag2 = readings.next().expect("two magazines");
        drop(readings);

        let mm = |r: medbox_drivers::RangeReading| match r.status {
            RangeStatus::Ok => Some(r.distance_mm),
            RangeStatus::Error => None,
        };
        let payload = encode_levels(mm(mag1), mm(mag2));
        // `levels` is not retained per spec §6 (only `status` is).
        if bus.publish(&self.levels_topic, &payload, false) {
            self.last_published_ms = Some(now);
        }
        // On publish failure, `last_published_ms` is left untouched so the
        // next tick retries immediately rather than waiting out the full
        // interval again.
    }
}
