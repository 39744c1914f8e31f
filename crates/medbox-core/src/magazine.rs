//! Magazine identity and the per-magazine hardware bundle.

use crate::direction::Direction;
use medbox_drivers::{PhotoDetector, RangeFinder, StepperDriver};

/// The identity of one of the two magazines. Modeled as a tagged variant
/// rather than a raw index or pointer, per the design notes: the original
/// firmware shared a raw pointer to the "current magazine" between state
/// handlers, which this type exists specifically to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagazineId {
    One,
    Two,
}

impl MagazineId {
    pub fn as_u8(self) -> u8 {
        match self {
            MagazineId::One => 1,
            MagazineId::Two => 2,
        }
    }

    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            1 => Some(MagazineId::One),
            2 => Some(MagazineId::Two),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            MagazineId::One => 0,
            MagazineId::Two => 1,
        }
    }
}

/// One magazine's hardware and feed-direction state, owned exclusively by
/// the Supervisor. Holds no pending count — that lives in `Queue`, which is
/// the one thing the inbound bus callback is allowed to mutate.
pub struct Magazine {
    id: MagazineId,
    stepper: Box<dyn StepperDriver>,
    photo: Box<dyn PhotoDetector>,
    range: Box<dyn RangeFinder>,
    next_direction: Direction,
}

impl Magazine {
    pub fn new(
        id: MagazineId,
        stepper: Box<dyn StepperDriver>,
        photo: Box<dyn PhotoDetector>,
        range: Box<dyn RangeFinder>,
    ) -> Self {
        Self {
            id,
            stepper,
            photo,
            range,
            // Arbitrary but fixed starting direction; toggled as pills are
            // dispensed or jams are reversed.
            next_direction: Direction::Clockwise,
        }
    }

    pub fn id(&self) -> MagazineId {
        self.id
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn toggle_direction(&mut self) {
        self.next_direction = self.next_direction.toggled();
    }

    pub fn stepper(&mut self) -> &mut dyn StepperDriver {
        self.stepper.as_mut()
    }

    pub fn photo(&mut self) -> &mut dyn PhotoDetector {
        self.photo.as_mut()
    }

    pub fn range(&mut self) -> &mut dyn RangeFinder {
        self.range.as_mut()
    }
}

/// A fixed pair of magazines, indexed by `MagazineId`. The design is
/// parameterized at the type level by nothing more than this array length;
/// per spec §1, the deployed instance is fixed at two.
pub struct Magazines(pub [Magazine; 2]);

impl Magazines {
    pub fn new(one: Magazine, two: Magazine) -> Self {
        Self([one, two])
    }

    pub fn get(&self, id: MagazineId) -> &Magazine {
        &self.0[id.index()]
    }

    pub fn get_mut(&mut self, id: MagazineId) -> &mut Magazine {
        &mut self.0[id.index()]
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Magazine> {
        self.0.iter_mut()
    }
}
