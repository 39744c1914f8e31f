//! §4 Supervisor: the fixed per-tick ordering that wires everything together.

use crate::constants::Limits;
use crate::levels::LevelPublisher;
use crate::machine::DispenseMachine;
use crate::magazine::{MagazineId, Magazines};
use crate::presence::PresenceManager;
use crate::queue::Queue;
use medbox_drivers::{BusClient, Clock};
use medbox_proto::{parse_dispense, Topics};
use tracing::warn;

/// Owns the `StepperDriver`s (via `Magazines`), `Queue`, `DispenseMachine`
/// state, and the batch result, per spec §3's ownership list. Everything
/// else (bus client, clock, range finders) is supplied or reached through
/// those owned pieces.
pub struct Supervisor {
    magazines: Magazines,
    queue: Queue,
    machine: DispenseMachine,
    presence: PresenceManager,
    levels: LevelPublisher,
    dispense_topic: String,
}

impl Supervisor {
    pub fn new(client_id: impl Into<String>, topics: Topics, magazines: Magazines) -> Self {
        Self::with_limits(client_id, topics, magazines, Limits::default())
    }

    pub fn with_limits(client_id: impl Into<String>, topics: Topics, magazines: Magazines, limits: Limits) -> Self {
        Self {
            magazines,
            queue: Queue::new(),
            machine: DispenseMachine::with_limits(topics.dispensed().to_string(), limits),
            presence: PresenceManager::new(client_id, topics.clone()),
            levels: LevelPublisher::with_limits(topics.levels().to_string(), limits),
            dispense_topic: topics.dispense().to_string(),
        }
    }

    /// Exposed for observability and tests; the machine's state carries no
    /// actuation side effects by itself.
    pub fn machine_state(&self) -> crate::state::State {
        self.machine.state()
    }

    /// Runs exactly one supervisor tick, in the fixed order spec §4 requires:
    /// (1) ensure bus connection, (2) pump inbound once, (3) machine tick,
    /// (4) conditional level publish. Inbound messages are delivered to the
    /// queue before the machine examines it, so a just-arrived request is
    /// picked up without an extra tick of latency.
    pub fn tick(&mut self, clock: &dyn Clock, bus: &mut dyn BusClient) {
        self.presence.tick(bus);

        let queue = &mut self.queue;
        let dispense_topic = self.dispense_topic.as_str();
        bus.pump(&mut |topic, payload| {
            if topic != dispense_topic {
                return;
            }
            match parse_dispense(payload) {
                Ok(entries) => {
                    for (id, amount) in entries {
                        if let Some(magazine_id) = MagazineId::from_u8(id) {
                            queue.enqueue(magazine_id, amount);
                        }
                    }
                }
                Err(err) => warn!(%err, "dropping malformed dispense payload"),
            }
        });

        self.machine.tick(&mut self.magazines, &mut self.queue, clock, bus);
        self.levels.tick(&mut self.magazines, clock, bus);
    }
}
