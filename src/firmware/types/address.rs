use core::fmt::{self, Write as _};

/// IPv4 address in the byte order the radio reports it: least-significant
/// octet first. `76.83.0.0` is stored as `[0, 0, 83, 76]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NetworkAddress([u8; 4]);

impl NetworkAddress {
    pub const UNSPECIFIED: Self = Self([0; 4]);

    pub const fn from_reported(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn from_octets(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([d, c, b, a])
    }

    pub const fn reported(self) -> [u8; 4] {
        self.0
    }

    /// Dotted-quad order.
    pub const fn octets(self) -> [u8; 4] {
        [self.0[3], self.0[2], self.0[1], self.0[0]]
    }

    pub const fn is_unspecified(self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
    }

    /// The radio fills the two high bytes last; both zero means no address yet.
    pub const fn high_half_is_zero(self) -> bool {
        self.0[2] == 0 && self.0[3] == 0
    }

    /// Prefix length of a contiguous netmask, `None` for anything else.
    pub const fn netmask_prefix_len(self) -> Option<u8> {
        let [a, b, c, d] = self.octets();
        let bits = u32::from_be_bytes([a, b, c, d]);
        let ones = bits.leading_ones();
        match bits.checked_shl(ones) {
            Some(rest) if rest != 0 => None,
            _ => Some(ones as u8),
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let mut octets = [0u8; 4];
        let mut parts = text.trim().split('.');
        for slot in octets.iter_mut() {
            *slot = parts.next()?.parse::<u8>().ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        let [a, b, c, d] = octets;
        Some(Self::from_octets(a, b, c, d))
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        let mut text = heapless::String::<15>::new();
        write!(&mut text, "{}.{}.{}.{}", a, b, c, d)?;
        f.pad(&text)
    }
}

/// Static addressing pushed to the radio. The all-zero value asks for DHCP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticNetworkConfig {
    pub ip: NetworkAddress,
    pub subnet_mask: NetworkAddress,
    pub gateway: NetworkAddress,
    pub dns: NetworkAddress,
}

impl StaticNetworkConfig {
    pub const DHCP: Self = Self {
        ip: NetworkAddress::UNSPECIFIED,
        subnet_mask: NetworkAddress::UNSPECIFIED,
        gateway: NetworkAddress::UNSPECIFIED,
        dns: NetworkAddress::UNSPECIFIED,
    };

    pub const fn is_dhcp(&self) -> bool {
        self.ip.is_unspecified()
            && self.subnet_mask.is_unspecified()
            && self.gateway.is_unspecified()
            && self.dns.is_unspecified()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        let mut text = heapless::String::<17>::new();
        write!(
            &mut text,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )?;
        f.pad(&text)
    }
}
