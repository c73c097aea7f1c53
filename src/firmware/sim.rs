//! Simulated links and clock for host tests. Time only moves when the
//! simulated pacer pauses, so every wait in the controller runs instantly.

use core::cell::Cell;

use crate::firmware::{
    link::{CloudLink, HttpProbe, LinkError, Pacer, RadioLink},
    net::BAD_DNS,
    types::{LinkInfo, MacAddress, NetworkAddress, StaticNetworkConfig, WifiCredentials},
};

pub(crate) const GOOD_DNS: NetworkAddress = NetworkAddress::from_octets(192, 168, 1, 1);

pub(crate) struct SimClock {
    ticks: Cell<u32>,
}

impl SimClock {
    pub(crate) fn new() -> Self {
        Self {
            ticks: Cell::new(0),
        }
    }

    pub(crate) fn now(&self) -> u32 {
        self.ticks.get()
    }

    fn advance(&self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

pub(crate) struct SimPacer<'a> {
    clock: &'a SimClock,
    paused_ms: u64,
}

impl<'a> SimPacer<'a> {
    pub(crate) fn new(clock: &'a SimClock) -> Self {
        Self {
            clock,
            paused_ms: 0,
        }
    }

    pub(crate) fn paused_ms(&self) -> u64 {
        self.paused_ms
    }
}

impl Pacer for SimPacer<'_> {
    async fn pause(&mut self, ms: u32) {
        self.paused_ms += u64::from(ms);
        self.clock.advance();
    }
}

/// Boolean that flips to a requested value a number of ticks after the
/// request, or never when the delay is `None`.
#[derive(Clone, Copy, Debug)]
struct Delayed {
    value: bool,
    pending: Option<(bool, u32)>,
}

impl Delayed {
    const fn new(value: bool) -> Self {
        Self {
            value,
            pending: None,
        }
    }

    fn at(&self, now: u32) -> bool {
        match self.pending {
            Some((target, due)) if now >= due => target,
            _ => self.value,
        }
    }

    fn since(&self, now: u32) -> Option<u32> {
        match self.pending {
            Some((_, due)) if now >= due => Some(now - due),
            _ => None,
        }
    }

    fn request(&mut self, target: bool, now: u32, delay: Option<u32>) {
        self.value = self.at(now);
        self.pending = delay.map(|ticks| (target, now + ticks));
    }

    fn force(&mut self, value: bool) {
        self.value = value;
        self.pending = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ConfigPush {
    pub(crate) config: StaticNetworkConfig,
    pub(crate) while_ready: bool,
}

pub(crate) struct SimRadio<'a> {
    clock: &'a SimClock,
    powered: Delayed,
    link: Delayed,
    pub(crate) power_delay: Option<u32>,
    pub(crate) ready_delay: Option<u32>,
    pub(crate) drop_delay: Option<u32>,
    /// Ticks after the link comes up before the radio reports any DNS.
    pub(crate) dns_delay: Option<u32>,
    /// Ticks the bad value lingers on an association that ends up healthy.
    pub(crate) transient_bad_ticks: u32,
    /// Association count from which the radio reports a healthy DNS;
    /// `None` keeps it corrupted forever.
    pub(crate) good_from_association: Option<u32>,
    associations: u32,
    pub(crate) push_result: Result<(), LinkError>,
    pub(crate) pushes: Vec<ConfigPush>,
    pub(crate) credentials: Option<WifiCredentials>,
    pub(crate) calls: Vec<&'static str>,
}

impl<'a> SimRadio<'a> {
    pub(crate) fn new(clock: &'a SimClock) -> Self {
        Self {
            clock,
            powered: Delayed::new(false),
            link: Delayed::new(false),
            power_delay: Some(0),
            ready_delay: Some(0),
            drop_delay: Some(0),
            dns_delay: Some(0),
            transient_bad_ticks: 0,
            good_from_association: Some(0),
            associations: 0,
            push_result: Ok(()),
            pushes: Vec::new(),
            credentials: WifiCredentials::from_parts(b"bench-ap", b"secret"),
            calls: Vec::new(),
        }
    }

    /// Powered, associated and already reporting the corrupted DNS.
    pub(crate) fn connected_with_bad_dns(clock: &'a SimClock) -> Self {
        let mut radio = Self::new(clock);
        radio.powered.force(true);
        radio.link.force(true);
        radio.good_from_association = None;
        radio
    }

    pub(crate) fn powered_idle(clock: &'a SimClock) -> Self {
        let mut radio = Self::new(clock);
        radio.powered.force(true);
        radio
    }

    pub(crate) fn dhcp_pushes(&self) -> usize {
        self.pushes.iter().filter(|push| push.config.is_dhcp()).count()
    }

    pub(crate) fn associations(&self) -> u32 {
        self.associations
    }

    fn association_is_healthy(&self) -> bool {
        matches!(self.good_from_association, Some(first) if self.associations >= first)
    }
}

impl RadioLink for SimRadio<'_> {
    async fn power_on(&mut self) {
        self.calls.push("power_on");
        self.powered
            .request(true, self.clock.now(), self.power_delay);
    }

    async fn power_off(&mut self) {
        self.calls.push("power_off");
        self.powered
            .request(false, self.clock.now(), self.power_delay);
        self.link.request(false, self.clock.now(), self.drop_delay);
    }

    fn is_powered(&self) -> bool {
        self.powered.at(self.clock.now())
    }

    async fn associate(&mut self) {
        self.calls.push("associate");
        self.associations += 1;
        self.link.request(true, self.clock.now(), self.ready_delay);
    }

    async fn disassociate(&mut self) {
        self.calls.push("disassociate");
        self.link.request(false, self.clock.now(), self.drop_delay);
    }

    fn is_associated(&self) -> bool {
        self.is_ready()
    }

    fn is_ready(&self) -> bool {
        self.is_powered() && self.link.at(self.clock.now())
    }

    fn dns_address(&self) -> NetworkAddress {
        if !self.is_ready() {
            return NetworkAddress::UNSPECIFIED;
        }
        // A link forced up at construction has no request time; treat it as
        // long settled.
        let up_for = self.link.since(self.clock.now()).unwrap_or(u32::MAX);
        let Some(dns_delay) = self.dns_delay else {
            return NetworkAddress::UNSPECIFIED;
        };
        if up_for < dns_delay {
            return NetworkAddress::UNSPECIFIED;
        }
        if !self.association_is_healthy() {
            return BAD_DNS;
        }
        if up_for - dns_delay < self.transient_bad_ticks {
            return BAD_DNS;
        }
        GOOD_DNS
    }

    async fn push_static_config(&mut self, config: StaticNetworkConfig) -> Result<(), LinkError> {
        self.calls.push("push_static_config");
        self.pushes.push(ConfigPush {
            config,
            while_ready: self.is_ready(),
        });
        self.push_result
    }

    fn has_stored_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    async fn set_credentials(&mut self, credentials: WifiCredentials) -> Result<(), LinkError> {
        self.calls.push("set_credentials");
        self.credentials = Some(credentials);
        Ok(())
    }

    async fn clear_credentials(&mut self) -> Result<(), LinkError> {
        self.calls.push("clear_credentials");
        self.credentials = None;
        Ok(())
    }

    fn link_info(&self) -> LinkInfo {
        let mut info = LinkInfo {
            mac: Some(MacAddress([0x08, 0x00, 0x28, 0x5a, 0x11, 0x02])),
            ..LinkInfo::default()
        };
        if self.is_ready() {
            if let Some(ssid) = self.credentials.as_ref().and_then(|c| c.ssid_str()) {
                let _ = info.ssid.push_str(ssid);
            }
            info.rssi = Some(-61);
            info.local_ip = NetworkAddress::from_octets(192, 168, 1, 23);
            info.subnet_mask = NetworkAddress::from_octets(255, 255, 255, 0);
            info.gateway = NetworkAddress::from_octets(192, 168, 1, 1);
            info.dns = self.dns_address();
        }
        info
    }
}

pub(crate) struct SimCloud<'a> {
    clock: &'a SimClock,
    connected: Delayed,
    pub(crate) connect_delay: Option<u32>,
    pub(crate) disconnect_delay: Option<u32>,
    pub(crate) calls: Vec<&'static str>,
}

impl<'a> SimCloud<'a> {
    pub(crate) fn new(clock: &'a SimClock) -> Self {
        Self {
            clock,
            connected: Delayed::new(false),
            connect_delay: Some(0),
            disconnect_delay: Some(0),
            calls: Vec::new(),
        }
    }

    pub(crate) fn already_connected(clock: &'a SimClock) -> Self {
        let mut cloud = Self::new(clock);
        cloud.connected.force(true);
        cloud
    }
}

impl CloudLink for SimCloud<'_> {
    async fn connect(&mut self) {
        self.calls.push("connect");
        self.connected
            .request(true, self.clock.now(), self.connect_delay);
    }

    async fn disconnect(&mut self) {
        self.calls.push("disconnect");
        self.connected
            .request(false, self.clock.now(), self.disconnect_delay);
    }

    fn is_connected(&self) -> bool {
        self.connected.at(self.clock.now())
    }
}

pub(crate) struct SimProbe {
    /// 1-based attempt that gets an answer; `None` never answers.
    pub(crate) answers_on: Option<u32>,
    pub(crate) attempts: u32,
    pub(crate) last_target: Option<(String, u16)>,
}

impl SimProbe {
    pub(crate) fn answering_on(attempt: Option<u32>) -> Self {
        Self {
            answers_on: attempt,
            attempts: 0,
            last_target: None,
        }
    }
}

impl HttpProbe for SimProbe {
    async fn get(&mut self, host: &str, port: u16) -> bool {
        self.attempts += 1;
        self.last_target = Some((host.to_string(), port));
        matches!(self.answers_on, Some(n) if self.attempts >= n)
    }
}
