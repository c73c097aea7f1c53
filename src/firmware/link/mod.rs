//! Seams between the controller and the hardware it drives.
//!
//! Commands are async so a binding may wait on its driver; queries are plain
//! reads of state the binding already holds, so poll predicates can call them
//! between ticks.
#![allow(async_fn_in_trait)]

use thiserror::Error;

use super::types::{LinkInfo, NetworkAddress, StaticNetworkConfig, WifiCredentials};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("radio rejected the network configuration")]
    ConfigRejected,
    #[error("radio rejected the credentials")]
    CredentialsRejected,
    #[error("radio is not powered")]
    NotPowered,
    #[error("radio operation failed")]
    OperationFailed,
}

impl LinkError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigRejected => "config_rejected",
            Self::CredentialsRejected => "credentials_rejected",
            Self::NotPowered => "not_powered",
            Self::OperationFailed => "operation_failed",
        }
    }
}

pub trait RadioLink {
    async fn power_on(&mut self);
    async fn power_off(&mut self);
    fn is_powered(&self) -> bool;

    async fn associate(&mut self);
    async fn disassociate(&mut self);
    /// Joined to the access point at the link layer.
    fn is_associated(&self) -> bool;
    /// Joined and holding an IP configuration; the link is usable.
    fn is_ready(&self) -> bool;

    fn dns_address(&self) -> NetworkAddress;
    /// [`StaticNetworkConfig::DHCP`] switches the radio back to DHCP.
    async fn push_static_config(&mut self, config: StaticNetworkConfig) -> Result<(), LinkError>;

    fn has_stored_credentials(&self) -> bool;
    async fn set_credentials(&mut self, credentials: WifiCredentials) -> Result<(), LinkError>;
    async fn clear_credentials(&mut self) -> Result<(), LinkError>;

    fn link_info(&self) -> LinkInfo;
}

pub trait CloudLink {
    async fn connect(&mut self);
    async fn disconnect(&mut self);
    fn is_connected(&self) -> bool;
}

/// One raw `GET` round trip; true when the host answered at all.
pub trait HttpProbe {
    async fn get(&mut self, host: &str, port: u16) -> bool;
}

/// Cooperative wait hook called on every poll tick and for settle delays.
/// Implementations must yield to whatever drives the radio stack.
pub trait Pacer {
    async fn pause(&mut self, ms: u32);
}
