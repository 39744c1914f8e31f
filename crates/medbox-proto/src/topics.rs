//! Bus topic naming: everything lives under `medbox/<device-id>/`.

/// The fully-qualified topic names for one deployed device.
#[derive(Debug, Clone)]
pub struct Topics {
    dispense: String,
    dispensed: String,
    levels: String,
    status: String,
}

impl Topics {
    /// `device_id` is the deployment constant from spec §6 (e.g. `"01"`).
    pub fn new(device_id: &str) -> Self {
        let prefix = format!("medbox/{device_id}");
        Self {
            dispense: format!("{prefix}/dispense"),
            dispensed: format!("{prefix}/dispensed"),
            levels: format!("{prefix}/levels"),
            status: format!("{prefix}/status"),
        }
    }

    pub fn dispense(&self) -> &str {
        &self.dispense
    }

    pub fn dispensed(&self) -> &str {
        &self.dispensed
    }

    pub fn levels(&self) -> &str {
        &self.levels
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
