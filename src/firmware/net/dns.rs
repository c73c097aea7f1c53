use crate::firmware::types::NetworkAddress;

/// DNS server address the CC3000 firmware reports when it has corrupted its
/// own configuration (`76.83.0.0`).
pub const BAD_DNS: NetworkAddress = NetworkAddress::from_reported([0, 0, 83, 76]);

pub fn is_bad_dns(addr: NetworkAddress) -> bool {
    addr == BAD_DNS
}
