use medbox_drivers::{RangeFinder, RangeReading, RangeStatus};

/// Always reports the same distance with `RangeStatus::Ok`.
pub struct FakeRangeFinder {
    distance_mm: u16,
}

impl FakeRangeFinder {
    pub fn new(distance_mm: u16) -> Self {
        Self { distance_mm }
    }
}

impl RangeFinder for FakeRangeFinder {
    fn read_range(&mut self) -> RangeReading {
        RangeReading { distance_mm: self.distance_mm, status: RangeStatus::Ok }
    }
}
