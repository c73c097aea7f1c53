use crate::firmware::types::{NetworkAddress, StaticNetworkConfig, WifiCredentials};

pub const PROBE_HOST_DEFAULT: &str = "data.sparkfun.com";
pub const PROBE_PORT: u16 = 80;
pub const CLOUD_HOST_DEFAULT: &str = "device.spark.io";
pub const CLOUD_PORT: u16 = 5683;

const STATIC_IP_DEFAULT: NetworkAddress = NetworkAddress::from_octets(192, 168, 1, 104);
const STATIC_NETMASK_DEFAULT: NetworkAddress = NetworkAddress::from_octets(255, 255, 255, 0);
const STATIC_GATEWAY_DEFAULT: NetworkAddress = NetworkAddress::from_octets(192, 168, 1, 1);
const STATIC_DNS_DEFAULT: NetworkAddress = NetworkAddress::from_octets(192, 168, 1, 1);

pub fn compiled_wifi_credentials() -> Option<WifiCredentials> {
    let ssid = option_env!("DNSTEST_WIFI_SSID").or(option_env!("SSID"))?;
    let password = option_env!("DNSTEST_WIFI_PASSWORD")
        .or(option_env!("PASSWORD"))
        .unwrap_or("");
    WifiCredentials::from_parts(ssid.as_bytes(), password.as_bytes())
}

pub fn compiled_static_config() -> StaticNetworkConfig {
    StaticNetworkConfig {
        ip: env_address(option_env!("DNSTEST_STATIC_IP"), STATIC_IP_DEFAULT),
        subnet_mask: env_address(option_env!("DNSTEST_STATIC_NETMASK"), STATIC_NETMASK_DEFAULT),
        gateway: env_address(option_env!("DNSTEST_STATIC_GATEWAY"), STATIC_GATEWAY_DEFAULT),
        dns: env_address(option_env!("DNSTEST_STATIC_DNS"), STATIC_DNS_DEFAULT),
    }
}

pub fn probe_host() -> &'static str {
    option_env!("DNSTEST_PROBE_HOST").unwrap_or(PROBE_HOST_DEFAULT)
}

pub fn cloud_host() -> &'static str {
    option_env!("DNSTEST_CLOUD_HOST").unwrap_or(CLOUD_HOST_DEFAULT)
}

fn env_address(value: Option<&str>, fallback: NetworkAddress) -> NetworkAddress {
    value.and_then(NetworkAddress::parse).unwrap_or(fallback)
}
