//! DNS-corruption recovery.
//!
//! The statig machine in `machine` decides what happens next; `run_recovery`
//! performs the radio I/O each phase calls for and feeds what it observed
//! back as an event until the machine lands in `Success` or `GaveUp`.

mod diag;
mod engine;
mod events;
mod machine;
mod state;


pub use state::{GiveUpReason, RecoveryOutcome, RecoveryPhase, RecoveryReport};

use engine::RecoveryEngine;
use events::RecoveryEvent;

use super::dns::is_bad_dns;
use super::poll::poll_until;
use crate::firmware::{
    config::NetPolicy,
    link::{Pacer, RadioLink},
    types::{RadioState, StaticNetworkConfig},
};

pub async fn run_recovery<R, P>(
    radio: &mut R,
    pacer: &mut P,
    state: &mut RadioState,
    policy: &NetPolicy,
) -> RecoveryReport
where
    R: RadioLink,
    P: Pacer,
{
    let policy = policy.sanitized();
    let mut engine = RecoveryEngine::new(policy.recovery_max_attempts);

    let associated = state.ap_connected && radio.is_associated();
    engine.apply(RecoveryEvent::Begin { associated });

    loop {
        let phase = engine.phase();
        if phase.is_terminal() {
            break;
        }
        let event = match phase {
            RecoveryPhase::Connecting => connect(radio, pacer, state, &policy).await,
            RecoveryPhase::Checking => check(radio),
            RecoveryPhase::Resetting | RecoveryPhase::ResettingAgain => {
                request_dhcp(radio, pacer, &policy).await;
                RecoveryEvent::DhcpRequested
            }
            RecoveryPhase::Disconnecting => {
                disconnect(radio, pacer, state, &policy).await;
                RecoveryEvent::Disassociated
            }
            // Begin always leaves Idle.
            RecoveryPhase::Idle | RecoveryPhase::Success | RecoveryPhase::GaveUp => break,
        };
        engine.apply(event);
    }

    *state = state.normalized();
    let dns = radio.dns_address();
    let report = match engine.report(dns) {
        Some(report) => report,
        None => RecoveryReport {
            outcome: RecoveryOutcome::GaveUp(GiveUpReason::Exhausted),
            attempts: engine.attempt(),
            reset_cycles: 0,
            dns,
        },
    };

    match report.outcome {
        RecoveryOutcome::Success => log::info!(
            "dns recovery: fixed after {} reset cycle(s), dns={}",
            report.reset_cycles,
            report.dns
        ),
        RecoveryOutcome::GaveUp(reason) => log::warn!(
            "dns recovery: gave up reason={} attempt={} dns={}",
            reason.as_str(),
            report.attempts,
            report.dns
        ),
    }
    report
}

async fn connect<R, P>(
    radio: &mut R,
    pacer: &mut P,
    state: &mut RadioState,
    policy: &NetPolicy,
) -> RecoveryEvent
where
    R: RadioLink,
    P: Pacer,
{
    radio.associate().await;

    let ready = poll_until(
        pacer,
        policy.poll_interval_ms,
        policy.association_timeout_ticks,
        || radio.is_ready(),
    )
    .await;
    if ready.timed_out {
        let credentials_known = radio.has_stored_credentials();
        log::warn!(
            "dns recovery: association timed out after {} ticks credentials_known={}",
            ready.ticks,
            credentials_known
        );
        state.ap_connected = false;
        return RecoveryEvent::AssociationTimedOut { credentials_known };
    }
    log::debug!("dns recovery: ready after {} ticks", ready.ticks);

    let reported = poll_until(
        pacer,
        policy.poll_interval_ms,
        policy.association_timeout_ticks,
        || !radio.dns_address().high_half_is_zero(),
    )
    .await;
    if reported.timed_out {
        log::warn!(
            "dns recovery: no dns address after {} ticks",
            reported.ticks
        );
        state.ap_connected = radio.is_ready();
        return RecoveryEvent::DnsNotReported;
    }
    log::debug!("dns recovery: dns reported after {} ticks", reported.ticks);

    let transient = poll_until(
        pacer,
        policy.poll_interval_ms,
        policy.transient_dns_timeout_ticks,
        || !is_bad_dns(radio.dns_address()),
    )
    .await;
    if transient.timed_out {
        log::debug!(
            "dns recovery: bad dns persisted for {} ticks",
            transient.ticks
        );
    }

    state.ap_connected = radio.is_ready();
    RecoveryEvent::Associated
}

fn check<R: RadioLink>(radio: &R) -> RecoveryEvent {
    let dns = radio.dns_address();
    if is_bad_dns(dns) {
        log::info!("dns recovery: dns={} is bad", dns);
        RecoveryEvent::DnsBad
    } else {
        log::info!("dns recovery: dns={} is good", dns);
        RecoveryEvent::DnsGood
    }
}

async fn request_dhcp<R, P>(radio: &mut R, pacer: &mut P, policy: &NetPolicy)
where
    R: RadioLink,
    P: Pacer,
{
    let connected = radio.is_ready();
    if let Err(err) = radio.push_static_config(StaticNetworkConfig::DHCP).await {
        log::warn!(
            "dns recovery: dhcp request failed connected={} err={}",
            connected,
            err.as_str()
        );
    }
    pacer.pause(policy.settle_delay_ms).await;
}

async fn disconnect<R, P>(radio: &mut R, pacer: &mut P, state: &mut RadioState, policy: &NetPolicy)
where
    R: RadioLink,
    P: Pacer,
{
    radio.disassociate().await;
    let dropped = poll_until(
        pacer,
        policy.poll_interval_ms,
        policy.disassociation_timeout_ticks,
        || !radio.is_ready() && radio.dns_address().high_half_is_zero(),
    )
    .await;
    if dropped.timed_out {
        log::warn!(
            "dns recovery: disassociation timed out after {} ticks",
            dropped.ticks
        );
    }
    state.ap_connected = false;
    state.cloud_connected = false;
}
