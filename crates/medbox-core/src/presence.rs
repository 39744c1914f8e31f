//! §4.4 PresenceManager: connection, last-will, and re-announcement.

use medbox_drivers::BusClient;
use medbox_proto::{Topics, PRESENCE_OFFLINE, PRESENCE_ONLINE};
use tracing::{info, warn};

/// Ensures the bus connection, the retained "online" announcement, and the
/// `dispense` subscription are all in place, re-running the whole sequence
/// from scratch on every reconnect. Subscriptions and the online
/// announcement are not assumed to survive a disconnect.
pub struct PresenceManager {
    client_id: String,
    topics: Topics,
}

impl PresenceManager {
    pub fn new(client_id: impl Into<String>, topics: Topics) -> Self {
        Self { client_id: client_id.into(), topics }
    }

    /// Call once per Supervisor tick, before pumping inbound traffic.
    pub fn tick(&mut self, bus: &mut dyn BusClient) {
        if bus.is_connected() {
            return;
        }
        if !bus.connect(&self.client_id, self.topics.status(), PRESENCE_OFFLINE) {
            return;
        }
        info!("bus connected, re-announcing presence");
        bus.publish(self.topics.status(), PRESENCE_ONLINE, true);
        if !bus.subscribe(self.topics.dispense()) {
            warn!("subscribe to dispense topic failed after connect");
        }
    }
}
