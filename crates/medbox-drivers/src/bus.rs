//! The message-bus client contract.
//!
//! Models the subset of an MQTT-like client the firmware needs: connect with
//! a last-will, subscribe, best-effort publish, and a non-blocking pump that
//! delivers any inbound messages queued since the last call. Real connection
//! management, TLS, and reconnection backoff belong to the concrete client;
//! the firmware only ever calls through this trait.
pub trait BusClient {
    /// Whether the client currently believes it has a live connection.
    fn is_connected(&self) -> bool;

    /// Establishes a connection, registering `lwt_payload` as the retained
    /// last-will message on `lwt_topic` to be published by the broker if this
    /// client disconnects uncleanly. Returns whether the connection attempt
    /// succeeded immediately; implementations may also need `pump` to observe
    /// backgrounded connect progress.
    fn connect(&mut self, client_id: &str, lwt_topic: &str, lwt_payload: &[u8]) -> bool;

    /// Subscribes to `topic`. Returns whether the subscription request was
    /// accepted.
    fn subscribe(&mut self, topic: &str) -> bool;

    /// Attempts to publish `payload` to `topic`, requesting retention when
    /// `retained` is set. Returns `false` on a full send buffer or a
    /// disconnected client; the caller is expected to retry.
    fn publish(&mut self, topic: &str, payload: &[u8], retained: bool) -> bool;

    /// Delivers any inbound messages received since the last call to
    /// `on_message`, synchronously, once. Must not block waiting for new
    /// messages to arrive.
    fn pump(&mut self, on_message: &mut dyn FnMut(&str, &[u8]));
}
