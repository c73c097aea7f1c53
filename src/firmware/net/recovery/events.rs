/// Observations the engine feeds back after doing the I/O a phase asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecoveryEvent {
    Begin { associated: bool },
    Associated,
    AssociationTimedOut { credentials_known: bool },
    DnsNotReported,
    DnsGood,
    DnsBad,
    DhcpRequested,
    Disassociated,
}

impl RecoveryEvent {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Begin { .. } => "begin",
            Self::Associated => "associated",
            Self::AssociationTimedOut { .. } => "association_timeout",
            Self::DnsNotReported => "dns_not_reported",
            Self::DnsGood => "dns_good",
            Self::DnsBad => "dns_bad",
            Self::DhcpRequested => "dhcp_requested",
            Self::Disassociated => "disassociated",
        }
    }
}
