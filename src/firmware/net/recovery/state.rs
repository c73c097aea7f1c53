use crate::firmware::types::NetworkAddress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryPhase {
    Idle,
    Connecting,
    Checking,
    Resetting,
    Disconnecting,
    ResettingAgain,
    Success,
    GaveUp,
}

impl RecoveryPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Connecting => "Connecting",
            Self::Checking => "Checking",
            Self::Resetting => "Resetting",
            Self::Disconnecting => "Disconnecting",
            Self::ResettingAgain => "ResettingAgain",
            Self::Success => "Success",
            Self::GaveUp => "GaveUp",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::GaveUp)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GiveUpReason {
    /// The access point never came up within the association budget.
    AssociationTimeout { credentials_known: bool },
    /// Associated, but the radio never filled in a DNS address.
    DnsNotReported,
    /// Every attempt ended with the corrupted address still in place.
    Exhausted,
}

impl GiveUpReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssociationTimeout { .. } => "association_timeout",
            Self::DnsNotReported => "dns_not_reported",
            Self::Exhausted => "exhausted",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Success,
    GaveUp(GiveUpReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryReport {
    pub outcome: RecoveryOutcome,
    /// Attempt in which the outcome was decided, counted from 1.
    pub attempts: u8,
    /// Completed disconnect-and-reset cycles.
    pub reset_cycles: u8,
    /// DNS address the radio reported when recovery ended.
    pub dns: NetworkAddress,
}

impl RecoveryReport {
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, RecoveryOutcome::Success)
    }
}
