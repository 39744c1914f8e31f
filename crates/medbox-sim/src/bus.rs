use medbox_drivers::BusClient;

/// Records every accepted publish; can be told to reject the next N
/// publishes to exercise `DispenseMachine`'s REPORTING retry.
pub struct FakeBusClient {
    connected: bool,
    subscriptions: Vec<String>,
    published: Vec<(String, Vec<u8>, bool)>,
    fail_next: u32,
    inbound: Vec<(String, Vec<u8>)>,
}

impl FakeBusClient {
    pub fn new() -> Self {
        Self {
            connected: false,
            subscriptions: Vec::new(),
            published: Vec::new(),
            fail_next: 0,
            inbound: Vec::new(),
        }
    }

    pub fn fail_next_publishes(&mut self, n: u32) {
        self.fail_next = n;
    }

    pub fn published(&self) -> &[(String, Vec<u8>, bool)] {
        &self.published
    }

    pub fn subscriptions(&self) -> &[String] {
        &self.subscriptions
    }

    /// Queues a message to be delivered to the `on_message` callback on the
    /// next `pump()`.
    pub fn deliver(&mut self, topic: impl Into<String>, payload: Vec<u8>) {
        self.inbound.push((topic.into(), payload));
    }
}

impl Default for FakeBusClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BusClient for FakeBusClient {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self, _client_id: &str, _lwt_topic: &str, _lwt_payload: &[u8]) -> bool {
        self.connected = true;
        true
    }

    fn subscribe(&mut self, topic: &str) -> bool {
        self.subscriptions.push(topic.to_string());
        true
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retained: bool) -> bool {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return false;
        }
        self.published.push((topic.to_string(), payload.to_vec(), retained));
        true
    }

    fn pump(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) {
        for (topic, payload) in self.inbound.drain(..) {
            on_message(&topic, &payload);
        }
    }
}
