use thiserror::Error;

use crate::firmware::link::LinkError;

/// A request the current connection state does not allow. Raised before any
/// hardware call, so the state is unchanged when callers see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("radio must be enabled")]
    RadioOff,
    #[error("radio is already enabled")]
    RadioAlreadyOn,
    #[error("access point must be connected")]
    ApNotConnected,
    #[error("access point is already connected")]
    ApAlreadyConnected,
    #[error("cloud is not connected")]
    CloudNotConnected,
    #[error("cloud is already connected")]
    CloudAlreadyConnected,
    #[error("dns must be 76.83.0.0")]
    DnsNotBad,
    #[error("operation was not confirmed")]
    NotConfirmed,
    #[error("no credentials were compiled in")]
    CredentialsMissing,
}

impl UsageError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RadioOff => "radio_off",
            Self::RadioAlreadyOn => "radio_already_on",
            Self::ApNotConnected => "ap_not_connected",
            Self::ApAlreadyConnected => "ap_already_connected",
            Self::CloudNotConnected => "cloud_not_connected",
            Self::CloudAlreadyConnected => "cloud_already_connected",
            Self::DnsNotBad => "dns_not_bad",
            Self::NotConfirmed => "not_confirmed",
            Self::CredentialsMissing => "credentials_missing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl CommandError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usage(err) => err.as_str(),
            Self::Link(err) => err.as_str(),
        }
    }
}
