//! Deployment identity and tunable overrides.
//!
//! Mirrors `klipper-host::config::PrinterConfig` in spirit — a plain struct
//! assembled at startup from CLI args — but there is no on-disk config file
//! here: every field either names this deployment or overrides one of §6's
//! compile-time constants for bench testing.

use medbox_core::Limits;

/// Assembled from `RunArgs`. `limits`' defaults match spec §6 exactly; the
/// CLI only exists so they can be bench-tested without a recompile.
#[derive(Debug, Clone)]
pub struct Config {
    /// The deployment id used to build the `medbox/<id>/...` topic prefix.
    pub device_id: String,
    /// Appended to the device prefix to build a bus client id unique across
    /// deployments, per spec §6 ("`<device-prefix>-` + hardware MAC").
    pub hardware_mac: String,
    pub limits: Limits,
}

impl Config {
    pub fn client_id(&self) -> String {
        format!("medbox-{}-{}", self.device_id, self.hardware_mac)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_id: "01".to_string(),
            hardware_mac: "000000000000".to_string(),
            limits: Limits::default(),
        }
    }
}
