mod address;
mod link_info;
mod radio_state;

pub use address::{MacAddress, NetworkAddress, StaticNetworkConfig};
pub use link_info::{LinkInfo, WifiCredentials, WIFI_PASSWORD_MAX, WIFI_SSID_MAX};
pub use radio_state::RadioState;
