use embassy_net::{
    ConfigV4, DhcpConfig, HardwareAddress, Ipv4Address, Ipv4Cidr, Stack, StaticConfigV4,
};
use esp_radio::wifi::{AuthMethod, ClientConfig, ModeConfig, ScanMethod, WifiController};

use crate::firmware::{
    link::{LinkError, RadioLink},
    types::{LinkInfo, MacAddress, NetworkAddress, StaticNetworkConfig, WifiCredentials},
};

/// Station radio on `esp-radio` with the `embassy-net` stack holding the IP
/// configuration. Credentials live in RAM only; the radio keeps no copy.
pub(super) struct EspRadioLink {
    controller: WifiController<'static>,
    stack: Stack<'static>,
    credentials: Option<WifiCredentials>,
}

impl EspRadioLink {
    pub(super) fn new(
        mut controller: WifiController<'static>,
        stack: Stack<'static>,
        credentials: Option<WifiCredentials>,
    ) -> Self {
        let mode = client_mode(credentials.as_ref());
        if let Err(err) = controller.set_config(&mode) {
            log::warn!("radio: initial station config err={:?}", err);
        }
        Self {
            controller,
            stack,
            credentials,
        }
    }
}

impl RadioLink for EspRadioLink {
    async fn power_on(&mut self) {
        if let Err(err) = self.controller.start_async().await {
            log::warn!("radio: start err={:?}", err);
        }
    }

    async fn power_off(&mut self) {
        if let Err(err) = self.controller.stop_async().await {
            log::warn!("radio: stop err={:?}", err);
        }
    }

    fn is_powered(&self) -> bool {
        matches!(self.controller.is_started(), Ok(true))
    }

    async fn associate(&mut self) {
        if let Err(err) = self.controller.connect_async().await {
            log::warn!("radio: connect err={:?}", err);
        }
    }

    async fn disassociate(&mut self) {
        if let Err(err) = self.controller.disconnect_async().await {
            log::warn!("radio: disconnect err={:?}", err);
        }
    }

    fn is_associated(&self) -> bool {
        matches!(self.controller.is_connected(), Ok(true))
    }

    fn is_ready(&self) -> bool {
        self.is_associated() && self.stack.is_link_up() && self.stack.is_config_up()
    }

    fn dns_address(&self) -> NetworkAddress {
        if !self.stack.is_link_up() {
            return NetworkAddress::UNSPECIFIED;
        }
        self.stack
            .config_v4()
            .and_then(|config| config.dns_servers.first().copied())
            .map(address_from_ipv4)
            .unwrap_or(NetworkAddress::UNSPECIFIED)
    }

    async fn push_static_config(&mut self, config: StaticNetworkConfig) -> Result<(), LinkError> {
        if config.is_dhcp() {
            self.stack.set_config_v4(ConfigV4::Dhcp(DhcpConfig::default()));
            log::info!("radio: ipv4 config dhcp");
            return Ok(());
        }

        let prefix = config
            .subnet_mask
            .netmask_prefix_len()
            .ok_or(LinkError::ConfigRejected)?;
        let mut static_config = StaticConfigV4 {
            address: Ipv4Cidr::new(ipv4_from_address(config.ip), prefix),
            gateway: Some(ipv4_from_address(config.gateway)),
            dns_servers: Default::default(),
        };
        if !config.dns.is_unspecified() {
            let _ = static_config.dns_servers.push(ipv4_from_address(config.dns));
        }
        self.stack.set_config_v4(ConfigV4::Static(static_config));
        log::info!("radio: ipv4 config static ip={}/{}", config.ip, prefix);
        Ok(())
    }

    fn has_stored_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    async fn set_credentials(&mut self, credentials: WifiCredentials) -> Result<(), LinkError> {
        if credentials.ssid_str().is_none() || credentials.password_str().is_none() {
            return Err(LinkError::CredentialsRejected);
        }
        self.controller
            .set_config(&client_mode(Some(&credentials)))
            .map_err(|err| {
                log::warn!("radio: station config err={:?}", err);
                LinkError::CredentialsRejected
            })?;
        self.credentials = Some(credentials);
        Ok(())
    }

    async fn clear_credentials(&mut self) -> Result<(), LinkError> {
        self.controller
            .set_config(&client_mode(None))
            .map_err(|err| {
                log::warn!("radio: station config err={:?}", err);
                LinkError::OperationFailed
            })?;
        self.credentials = None;
        Ok(())
    }

    fn link_info(&self) -> LinkInfo {
        let mut info = LinkInfo {
            mac: mac_address(self.stack.hardware_address()),
            ..LinkInfo::default()
        };
        if let Some(ssid) = self.credentials.as_ref().and_then(WifiCredentials::ssid_str) {
            let _ = info.ssid.push_str(ssid);
        }
        if self.is_associated() {
            info.rssi = self
                .controller
                .rssi()
                .ok()
                .and_then(|rssi| i16::try_from(rssi).ok());
        }
        if let Some(config) = self.stack.config_v4() {
            info.local_ip = address_from_ipv4(config.address.address());
            info.subnet_mask = address_from_ipv4(config.address.netmask());
            info.gateway = config
                .gateway
                .map(address_from_ipv4)
                .unwrap_or(NetworkAddress::UNSPECIFIED);
        }
        info.dns = self.dns_address();
        info
    }
}

fn client_mode(credentials: Option<&WifiCredentials>) -> ModeConfig {
    let ssid = credentials.and_then(WifiCredentials::ssid_str).unwrap_or("");
    let password = credentials
        .and_then(WifiCredentials::password_str)
        .unwrap_or("");
    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::Wpa2Personal
    };
    ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(ssid.into())
            .with_password(password.into())
            .with_auth_method(auth_method)
            .with_scan_method(ScanMethod::AllChannels),
    )
}

fn address_from_ipv4(addr: Ipv4Address) -> NetworkAddress {
    let [a, b, c, d] = addr.octets();
    NetworkAddress::from_octets(a, b, c, d)
}

fn ipv4_from_address(addr: NetworkAddress) -> Ipv4Address {
    let [a, b, c, d] = addr.octets();
    Ipv4Address::new(a, b, c, d)
}

#[allow(irrefutable_let_patterns)]
fn mac_address(addr: HardwareAddress) -> Option<MacAddress> {
    if let HardwareAddress::Ethernet(mac) = addr {
        Some(MacAddress(mac.0))
    } else {
        None
    }
}
