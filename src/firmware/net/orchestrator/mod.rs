//! Connection orchestration.
//!
//! [`NetController`] owns the links, the pacer and the one [`RadioState`].
//! Every transition checks its precondition, issues one request, waits with
//! [`poll_until`] and only then writes the flags it observed.

mod error;

#[cfg(test)]
mod tests;

pub use error::{CommandError, UsageError};

use super::{
    dns::is_bad_dns,
    poll::{poll_until, PollOutcome},
    probe::{run_probe, ProbeReport},
    recovery::{run_recovery, RecoveryReport},
};
use crate::firmware::{
    config::{NetPolicy, PROBE_PORT},
    link::{CloudLink, HttpProbe, Pacer, RadioLink},
    types::{LinkInfo, NetworkAddress, RadioState, StaticNetworkConfig, WifiCredentials},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    RadioEnable,
    RadioDisable,
    ApConnect,
    ApDisconnect,
    CloudConnect,
    CloudDisconnect,
}

impl TransitionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RadioEnable => "radio_enable",
            Self::RadioDisable => "radio_disable",
            Self::ApConnect => "ap_connect",
            Self::ApDisconnect => "ap_disconnect",
            Self::CloudConnect => "cloud_connect",
            Self::CloudDisconnect => "cloud_disconnect",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionReport {
    pub kind: TransitionKind,
    /// Flags after the transition settled.
    pub state: RadioState,
    pub timed_out: bool,
    pub ticks: u32,
}

pub struct NetController<R, C, P> {
    radio: R,
    cloud: C,
    pacer: P,
    policy: NetPolicy,
    state: RadioState,
}

impl<R, C, P> NetController<R, C, P>
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
{
    pub fn new(radio: R, cloud: C, pacer: P, policy: NetPolicy) -> Self {
        Self::with_state(radio, cloud, pacer, policy, RadioState::new())
    }

    pub fn with_state(radio: R, cloud: C, pacer: P, policy: NetPolicy, state: RadioState) -> Self {
        Self {
            radio,
            cloud,
            pacer,
            policy: policy.sanitized(),
            state: state.normalized(),
        }
    }

    pub fn state(&self) -> RadioState {
        self.state
    }

    pub fn policy(&self) -> &NetPolicy {
        &self.policy
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    pub fn cloud(&self) -> &C {
        &self.cloud
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn dns(&self) -> NetworkAddress {
        self.radio.dns_address()
    }

    pub fn dns_is_bad(&self) -> bool {
        is_bad_dns(self.radio.dns_address())
    }

    pub fn link_info(&self) -> LinkInfo {
        self.radio.link_info()
    }

    pub fn has_stored_credentials(&self) -> bool {
        self.radio.has_stored_credentials()
    }

    pub fn check(&self, kind: TransitionKind) -> Result<(), UsageError> {
        let state = self.state;
        match kind {
            TransitionKind::RadioEnable if state.radio_enabled => Err(UsageError::RadioAlreadyOn),
            TransitionKind::RadioDisable if !state.radio_enabled => Err(UsageError::RadioOff),
            TransitionKind::ApConnect | TransitionKind::ApDisconnect if !state.radio_enabled => {
                Err(UsageError::RadioOff)
            }
            TransitionKind::ApConnect if state.ap_connected => Err(UsageError::ApAlreadyConnected),
            TransitionKind::ApDisconnect if !state.ap_connected => Err(UsageError::ApNotConnected),
            TransitionKind::CloudConnect if !state.radio_enabled => Err(UsageError::RadioOff),
            TransitionKind::CloudConnect if state.cloud_connected => {
                Err(UsageError::CloudAlreadyConnected)
            }
            TransitionKind::CloudDisconnect if !state.cloud_connected => {
                Err(UsageError::CloudNotConnected)
            }
            _ => Ok(()),
        }
    }

    /// The transition that flips the radio from its current state.
    pub fn radio_toggle(&self) -> TransitionKind {
        if self.state.radio_enabled {
            TransitionKind::RadioDisable
        } else {
            TransitionKind::RadioEnable
        }
    }

    pub fn ap_toggle(&self) -> TransitionKind {
        if self.state.ap_connected {
            TransitionKind::ApDisconnect
        } else {
            TransitionKind::ApConnect
        }
    }

    pub fn cloud_toggle(&self) -> TransitionKind {
        if self.state.cloud_connected {
            TransitionKind::CloudDisconnect
        } else {
            TransitionKind::CloudConnect
        }
    }

    pub async fn transition(&mut self, kind: TransitionKind) -> Result<TransitionReport, UsageError> {
        if let Err(err) = self.check(kind) {
            log::warn!("net: {} rejected: {}", kind.as_str(), err.as_str());
            return Err(err);
        }
        log::info!("net: {} requested", kind.as_str());

        let outcome = match kind {
            TransitionKind::RadioEnable => self.radio_enable().await,
            TransitionKind::RadioDisable => self.radio_disable().await,
            TransitionKind::ApConnect => self.ap_connect().await,
            TransitionKind::ApDisconnect => self.ap_disconnect().await,
            TransitionKind::CloudConnect => self.cloud_connect().await,
            TransitionKind::CloudDisconnect => self.cloud_disconnect().await,
        };
        self.state = self.state.normalized();

        if outcome.timed_out {
            log::warn!(
                "net: {} timed out after {} ticks",
                kind.as_str(),
                outcome.ticks
            );
        } else {
            log::debug!("net: {} done after {} ticks", kind.as_str(), outcome.ticks);
        }
        log::info!(
            "net: state radio={} ap={} cloud={}",
            self.state.radio_enabled,
            self.state.ap_connected,
            self.state.cloud_connected
        );

        Ok(TransitionReport {
            kind,
            state: self.state,
            timed_out: outcome.timed_out,
            ticks: outcome.ticks,
        })
    }

    async fn radio_enable(&mut self) -> PollOutcome {
        self.radio.power_on().await;
        let radio = &self.radio;
        let outcome = poll_until(
            &mut self.pacer,
            self.policy.poll_interval_ms,
            self.policy.power_timeout_ticks,
            || radio.is_powered(),
        )
        .await;
        self.state.radio_enabled = self.radio.is_powered();
        self.settle().await;
        outcome
    }

    async fn radio_disable(&mut self) -> PollOutcome {
        let mut total = PollOutcome {
            ticks: 0,
            timed_out: false,
        };
        let closed = self.drop_cloud().await;
        total = merge(total, closed);
        if self.state.ap_connected {
            let dropped = self.drop_association().await;
            total = merge(total, dropped);
        }

        self.radio.power_off().await;
        let radio = &self.radio;
        let off = poll_until(
            &mut self.pacer,
            self.policy.poll_interval_ms,
            self.policy.power_timeout_ticks,
            || !radio.is_powered() && radio.dns_address().high_half_is_zero(),
        )
        .await;
        total = merge(total, off);

        self.state.radio_enabled = self.radio.is_powered();
        self.state.ap_connected = false;
        self.state.cloud_connected = false;
        self.settle().await;
        total
    }

    async fn ap_connect(&mut self) -> PollOutcome {
        self.radio.associate().await;
        let radio = &self.radio;
        let outcome = poll_until(
            &mut self.pacer,
            self.policy.poll_interval_ms,
            self.policy.association_timeout_ticks,
            || radio.is_ready(),
        )
        .await;
        if outcome.timed_out {
            log::warn!(
                "net: access point unreachable credentials_known={}",
                self.radio.has_stored_credentials()
            );
        }
        self.state.ap_connected = self.radio.is_ready();
        self.settle().await;
        outcome
    }

    async fn ap_disconnect(&mut self) -> PollOutcome {
        let closed = self.drop_cloud().await;
        let dropped = self.drop_association().await;
        self.state.ap_connected = self.radio.is_ready();
        self.state.cloud_connected = false;
        self.settle().await;
        merge(closed, dropped)
    }

    async fn cloud_connect(&mut self) -> PollOutcome {
        self.cloud.connect().await;
        let cloud = &self.cloud;
        let outcome = poll_until(
            &mut self.pacer,
            self.policy.poll_interval_ms,
            self.policy.cloud_timeout_ticks,
            || cloud.is_connected(),
        )
        .await;
        self.state.cloud_connected = self.cloud.is_connected();
        if self.state.cloud_connected {
            self.state.ap_connected = self.radio.is_ready();
        }
        outcome
    }

    async fn cloud_disconnect(&mut self) -> PollOutcome {
        let outcome = self.close_cloud().await;
        self.state.cloud_connected = self.cloud.is_connected();
        outcome
    }

    /// Ends the cloud session before the link goes down under it.
    async fn drop_cloud(&mut self) -> PollOutcome {
        if !self.state.cloud_connected && !self.cloud.is_connected() {
            return PollOutcome {
                ticks: 0,
                timed_out: false,
            };
        }
        let outcome = self.close_cloud().await;
        if outcome.timed_out {
            log::warn!("net: cloud session still open after {} ticks", outcome.ticks);
        }
        self.state.cloud_connected = false;
        outcome
    }

    async fn close_cloud(&mut self) -> PollOutcome {
        self.cloud.disconnect().await;
        let cloud = &self.cloud;
        poll_until(
            &mut self.pacer,
            self.policy.poll_interval_ms,
            self.policy.cloud_timeout_ticks,
            || !cloud.is_connected(),
        )
        .await
    }

    async fn drop_association(&mut self) -> PollOutcome {
        self.radio.disassociate().await;
        let radio = &self.radio;
        poll_until(
            &mut self.pacer,
            self.policy.poll_interval_ms,
            self.policy.disassociation_timeout_ticks,
            || !radio.is_ready() && radio.dns_address().high_half_is_zero(),
        )
        .await
    }

    async fn settle(&mut self) {
        self.pacer.pause(self.policy.settle_delay_ms).await;
    }

    pub fn check_fix_dns(&self) -> Result<(), UsageError> {
        if !self.state.ap_connected {
            return Err(UsageError::ApNotConnected);
        }
        if !self.dns_is_bad() {
            return Err(UsageError::DnsNotBad);
        }
        Ok(())
    }

    /// Runs the DNS recovery once the access point is up, the radio reports
    /// the corrupted address and the operator has confirmed.
    pub async fn fix_dns(&mut self, confirmed: bool) -> Result<RecoveryReport, UsageError> {
        self.check_fix_dns()?;
        if !confirmed {
            return Err(UsageError::NotConfirmed);
        }
        log::info!("net: fixing dns");
        self.drop_cloud().await;
        let report = run_recovery(
            &mut self.radio,
            &mut self.pacer,
            &mut self.state,
            &self.policy,
        )
        .await;
        self.state = self.state.normalized();
        Ok(report)
    }

    pub async fn test_dns<H: HttpProbe>(
        &mut self,
        probe: &mut H,
        host: &str,
    ) -> Result<ProbeReport, UsageError> {
        if !self.state.radio_enabled {
            return Err(UsageError::RadioOff);
        }
        if !self.state.ap_connected {
            return Err(UsageError::ApNotConnected);
        }
        Ok(run_probe(probe, &mut self.pacer, host, PROBE_PORT, &self.policy).await)
    }

    fn require_radio(&self) -> Result<(), UsageError> {
        if self.state.radio_enabled {
            Ok(())
        } else {
            Err(UsageError::RadioOff)
        }
    }

    pub async fn set_credentials(
        &mut self,
        credentials: Option<WifiCredentials>,
    ) -> Result<(), CommandError> {
        self.require_radio()?;
        let credentials = credentials.ok_or(UsageError::CredentialsMissing)?;
        self.radio.set_credentials(credentials).await?;
        log::info!("net: credentials stored");
        Ok(())
    }

    pub async fn clear_credentials(&mut self) -> Result<(), CommandError> {
        self.require_radio()?;
        self.radio.clear_credentials().await?;
        log::info!("net: credentials cleared");
        Ok(())
    }

    /// Stores a static configuration, or DHCP for
    /// [`StaticNetworkConfig::DHCP`], then waits the settle delay.
    pub async fn apply_network_config(
        &mut self,
        config: StaticNetworkConfig,
    ) -> Result<(), CommandError> {
        self.require_radio()?;
        let result = self.radio.push_static_config(config).await;
        self.settle().await;
        result?;
        if config.is_dhcp() {
            log::info!("net: dhcp enabled");
        } else {
            log::info!("net: static ip={} dns={}", config.ip, config.dns);
        }
        Ok(())
    }
}

fn merge(first: PollOutcome, second: PollOutcome) -> PollOutcome {
    PollOutcome {
        ticks: first.ticks.saturating_add(second.ticks),
        timed_out: first.timed_out || second.timed_out,
    }
}
