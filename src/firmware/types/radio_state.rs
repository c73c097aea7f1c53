/// Connection flags owned by the controller and read by the console.
///
/// `ap_connected` implies `radio_enabled` and `cloud_connected` implies
/// `ap_connected`. The hardware does not enforce this; the controller does by
/// ordering its updates and calling [`RadioState::normalized`] last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadioState {
    pub radio_enabled: bool,
    pub ap_connected: bool,
    pub cloud_connected: bool,
}

impl RadioState {
    pub const fn new() -> Self {
        Self {
            radio_enabled: false,
            ap_connected: false,
            cloud_connected: false,
        }
    }

    pub const fn normalized(self) -> Self {
        let radio_enabled = self.radio_enabled;
        let ap_connected = self.ap_connected && radio_enabled;
        let cloud_connected = self.cloud_connected && ap_connected;
        Self {
            radio_enabled,
            ap_connected,
            cloud_connected,
        }
    }
}
