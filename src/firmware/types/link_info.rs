use super::{MacAddress, NetworkAddress};

pub const WIFI_SSID_MAX: usize = 32;
pub const WIFI_PASSWORD_MAX: usize = 64;

/// Snapshot of what the radio knows about its current link, for display only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkInfo {
    pub mac: Option<MacAddress>,
    pub ssid: heapless::String<WIFI_SSID_MAX>,
    pub rssi: Option<i16>,
    pub local_ip: NetworkAddress,
    pub subnet_mask: NetworkAddress,
    pub gateway: NetworkAddress,
    pub dns: NetworkAddress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: [u8; WIFI_SSID_MAX],
    ssid_len: u8,
    password: [u8; WIFI_PASSWORD_MAX],
    password_len: u8,
}

impl WifiCredentials {
    pub fn from_parts(ssid: &[u8], password: &[u8]) -> Option<Self> {
        if ssid.is_empty() || ssid.len() > WIFI_SSID_MAX || password.len() > WIFI_PASSWORD_MAX {
            return None;
        }
        let mut result = Self {
            ssid: [0u8; WIFI_SSID_MAX],
            ssid_len: ssid.len() as u8,
            password: [0u8; WIFI_PASSWORD_MAX],
            password_len: password.len() as u8,
        };
        result.ssid[..ssid.len()].copy_from_slice(ssid);
        result.password[..password.len()].copy_from_slice(password);
        Some(result)
    }

    pub fn ssid(&self) -> &[u8] {
        &self.ssid[..self.ssid_len as usize]
    }

    pub fn password(&self) -> &[u8] {
        &self.password[..self.password_len as usize]
    }

    pub fn ssid_str(&self) -> Option<&str> {
        core::str::from_utf8(self.ssid()).ok()
    }

    pub fn password_str(&self) -> Option<&str> {
        core::str::from_utf8(self.password()).ok()
    }
}
