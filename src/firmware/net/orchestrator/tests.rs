use embassy_futures::block_on;

use super::{CommandError, NetController, TransitionKind, UsageError};
use crate::firmware::{
    config::NetPolicy,
    link::{CloudLink, LinkError},
    sim::{SimClock, SimCloud, SimPacer, SimProbe, SimRadio},
    types::{NetworkAddress, RadioState, StaticNetworkConfig, WifiCredentials},
};

type SimController<'a> = NetController<SimRadio<'a>, SimCloud<'a>, SimPacer<'a>>;

fn controller<'a>(
    clock: &'a SimClock,
    radio: SimRadio<'a>,
    cloud: SimCloud<'a>,
) -> SimController<'a> {
    NetController::new(radio, cloud, SimPacer::new(clock), NetPolicy::defaults())
}

fn controller_with<'a>(
    clock: &'a SimClock,
    radio: SimRadio<'a>,
    cloud: SimCloud<'a>,
    state: RadioState,
) -> SimController<'a> {
    NetController::with_state(
        radio,
        cloud,
        SimPacer::new(clock),
        NetPolicy::defaults(),
        state,
    )
}

const ALL_UP: RadioState = RadioState {
    radio_enabled: true,
    ap_connected: true,
    cloud_connected: true,
};

const AP_UP: RadioState = RadioState {
    radio_enabled: true,
    ap_connected: true,
    cloud_connected: false,
};

const RADIO_ONLY: RadioState = RadioState {
    radio_enabled: true,
    ap_connected: false,
    cloud_connected: false,
};

#[test]
fn enable_connect_then_cloud_timeout() {
    let clock = SimClock::new();
    let mut radio = SimRadio::new(&clock);
    radio.ready_delay = Some(3);
    let mut cloud = SimCloud::new(&clock);
    cloud.connect_delay = None;
    let mut net = controller(&clock, radio, cloud);

    let enabled = block_on(net.transition(TransitionKind::RadioEnable)).unwrap();
    assert!(enabled.state.radio_enabled);
    assert!(!enabled.timed_out);

    let joined = block_on(net.transition(TransitionKind::ApConnect)).unwrap();
    assert!(joined.state.ap_connected);
    assert!(!joined.timed_out);
    assert_eq!(joined.ticks, 3);

    let cloud = block_on(net.transition(TransitionKind::CloudConnect)).unwrap();
    assert!(cloud.timed_out);
    assert_eq!(cloud.ticks, 100);
    assert!(!cloud.state.cloud_connected);
    assert!(cloud.state.ap_connected);
    assert!(cloud.state.radio_enabled);
}

#[test]
fn disabling_the_radio_drops_every_flag() {
    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let cloud = SimCloud::already_connected(&clock);
    let mut net = controller_with(&clock, radio, cloud, ALL_UP);

    let report = block_on(net.transition(TransitionKind::RadioDisable)).unwrap();

    assert_eq!(report.state, RadioState::new());
    assert_eq!(net.state(), RadioState::new());
    assert!(!report.timed_out);
    assert_eq!(net.radio().calls, vec!["disassociate", "power_off"]);
}

#[test]
fn disabling_without_ap_skips_disassociation() {
    let clock = SimClock::new();
    let radio = SimRadio::powered_idle(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);

    block_on(net.transition(TransitionKind::RadioDisable)).unwrap();

    assert_eq!(net.radio().calls, vec!["power_off"]);
    assert!(!net.state().radio_enabled);
}

#[test]
fn ap_disconnect_also_clears_cloud() {
    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let cloud = SimCloud::already_connected(&clock);
    let mut net = controller_with(&clock, radio, cloud, ALL_UP);

    let report = block_on(net.transition(TransitionKind::ApDisconnect)).unwrap();

    assert!(report.state.radio_enabled);
    assert!(!report.state.ap_connected);
    assert!(!report.state.cloud_connected);
}

#[test]
fn cascading_disconnects_close_the_cloud_session() {
    for kind in [TransitionKind::ApDisconnect, TransitionKind::RadioDisable] {
        let clock = SimClock::new();
        let radio = SimRadio::connected_with_bad_dns(&clock);
        let cloud = SimCloud::already_connected(&clock);
        let mut net = controller_with(&clock, radio, cloud, ALL_UP);

        let report = block_on(net.transition(kind)).unwrap();

        assert!(!report.state.cloud_connected);
        assert_eq!(net.cloud().is_connected(), net.state().cloud_connected);
        assert_eq!(net.cloud().calls, vec!["disconnect"]);
        assert_eq!(net.radio().calls[0], "disassociate");
    }
}

#[test]
fn cloud_can_reconnect_after_the_access_point_returns() {
    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let cloud = SimCloud::already_connected(&clock);
    let mut net = controller_with(&clock, radio, cloud, ALL_UP);

    block_on(net.transition(TransitionKind::ApDisconnect)).unwrap();
    block_on(net.transition(TransitionKind::ApConnect)).unwrap();
    let report = block_on(net.transition(TransitionKind::CloudConnect)).unwrap();

    assert!(!report.timed_out);
    assert_eq!(report.state, ALL_UP);
    assert_eq!(net.cloud().calls, vec!["disconnect", "connect"]);
}

#[test]
fn ap_connect_timeout_is_reported_not_raised() {
    let clock = SimClock::new();
    let mut radio = SimRadio::powered_idle(&clock);
    radio.ready_delay = None;
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);

    let report = block_on(net.transition(TransitionKind::ApConnect)).unwrap();

    assert!(report.timed_out);
    assert!(!report.state.ap_connected);
    assert_eq!(report.ticks, 100);
}

#[test]
fn cloud_connect_marks_the_radio_path_up() {
    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let mut cloud = SimCloud::new(&clock);
    cloud.connect_delay = Some(2);
    let mut net = controller_with(&clock, radio, cloud, AP_UP);

    let report = block_on(net.transition(TransitionKind::CloudConnect)).unwrap();

    assert!(!report.timed_out);
    assert_eq!(report.ticks, 2);
    assert_eq!(report.state, ALL_UP);

    let report = block_on(net.transition(TransitionKind::CloudDisconnect)).unwrap();
    assert!(!report.state.cloud_connected);
    assert!(report.state.ap_connected);
}

#[test]
fn usage_errors_touch_no_hardware() {
    let clock = SimClock::new();
    let mut net = controller(&clock, SimRadio::new(&clock), SimCloud::new(&clock));

    assert_eq!(
        block_on(net.transition(TransitionKind::ApConnect)),
        Err(UsageError::RadioOff)
    );
    assert_eq!(
        block_on(net.transition(TransitionKind::RadioDisable)),
        Err(UsageError::RadioOff)
    );
    assert_eq!(
        block_on(net.transition(TransitionKind::CloudConnect)),
        Err(UsageError::RadioOff)
    );
    assert_eq!(
        block_on(net.transition(TransitionKind::CloudDisconnect)),
        Err(UsageError::CloudNotConnected)
    );

    assert!(net.radio().calls.is_empty());
    assert!(net.cloud().calls.is_empty());
    assert_eq!(net.state(), RadioState::new());
    assert_eq!(clock.now(), 0);
}

#[test]
fn redundant_requests_are_rejected() {
    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let cloud = SimCloud::already_connected(&clock);
    let net = controller_with(&clock, radio, cloud, ALL_UP);

    assert_eq!(
        net.check(TransitionKind::RadioEnable),
        Err(UsageError::RadioAlreadyOn)
    );
    assert_eq!(
        net.check(TransitionKind::ApConnect),
        Err(UsageError::ApAlreadyConnected)
    );
    assert_eq!(
        net.check(TransitionKind::CloudConnect),
        Err(UsageError::CloudAlreadyConnected)
    );
    assert_eq!(net.radio_toggle(), TransitionKind::RadioDisable);
    assert_eq!(net.ap_toggle(), TransitionKind::ApDisconnect);
    assert_eq!(net.cloud_toggle(), TransitionKind::CloudDisconnect);
}

#[test]
fn inconsistent_initial_flags_are_normalized() {
    let clock = SimClock::new();
    let state = RadioState {
        radio_enabled: false,
        ap_connected: true,
        cloud_connected: true,
    };
    let net = controller_with(&clock, SimRadio::new(&clock), SimCloud::new(&clock), state);
    assert_eq!(net.state(), RadioState::new());
}

#[test]
fn fix_dns_clears_corruption_in_one_reset_cycle() {
    let clock = SimClock::new();
    let mut radio = SimRadio::connected_with_bad_dns(&clock);
    radio.good_from_association = Some(1);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), AP_UP);
    assert!(net.dns_is_bad());

    let report = block_on(net.fix_dns(true)).unwrap();

    assert!(report.succeeded());
    assert_eq!(report.reset_cycles, 1);
    assert_eq!(net.radio().dhcp_pushes(), 2);
    assert!(!net.dns_is_bad());
    assert!(net.state().ap_connected);
}

#[test]
fn fix_dns_closes_the_cloud_session_first() {
    let clock = SimClock::new();
    let mut radio = SimRadio::connected_with_bad_dns(&clock);
    radio.good_from_association = Some(1);
    let cloud = SimCloud::already_connected(&clock);
    let mut net = controller_with(&clock, radio, cloud, ALL_UP);

    let report = block_on(net.fix_dns(true)).unwrap();

    assert!(report.succeeded());
    assert_eq!(net.cloud().calls, vec!["disconnect"]);
    assert!(!net.cloud().is_connected());
    assert!(!net.state().cloud_connected);
}

#[test]
fn fix_dns_requires_connection_bad_dns_and_confirmation() {
    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);
    assert_eq!(block_on(net.fix_dns(true)), Err(UsageError::ApNotConnected));

    let clock = SimClock::new();
    let radio = SimRadio::powered_idle(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);
    block_on(net.transition(TransitionKind::ApConnect)).unwrap();
    assert_eq!(block_on(net.fix_dns(true)), Err(UsageError::DnsNotBad));

    let clock = SimClock::new();
    let radio = SimRadio::connected_with_bad_dns(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), AP_UP);
    assert_eq!(block_on(net.fix_dns(false)), Err(UsageError::NotConfirmed));
    assert!(net.radio().pushes.is_empty());
    assert!(net.radio().calls.is_empty());
}

#[test]
fn dns_probe_needs_the_access_point() {
    let clock = SimClock::new();
    let mut probe = SimProbe::answering_on(Some(2));
    let radio = SimRadio::powered_idle(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);
    assert_eq!(
        block_on(net.test_dns(&mut probe, "data.sparkfun.com")),
        Err(UsageError::ApNotConnected)
    );
    assert_eq!(probe.attempts, 0);

    let radio = SimRadio::connected_with_bad_dns(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), AP_UP);
    let report = block_on(net.test_dns(&mut probe, "data.sparkfun.com")).unwrap();
    assert!(report.connected);
    assert_eq!(report.retries, 1);
    assert_eq!(
        probe.last_target,
        Some((String::from("data.sparkfun.com"), 80))
    );
}

#[test]
fn expert_commands_need_the_radio() {
    let clock = SimClock::new();
    let mut net = controller(&clock, SimRadio::new(&clock), SimCloud::new(&clock));

    assert_eq!(
        block_on(net.clear_credentials()),
        Err(CommandError::Usage(UsageError::RadioOff))
    );
    assert_eq!(
        block_on(net.apply_network_config(StaticNetworkConfig::DHCP)),
        Err(CommandError::Usage(UsageError::RadioOff))
    );
    assert!(net.radio().calls.is_empty());
}

#[test]
fn credentials_round_trip_through_the_radio() {
    let clock = SimClock::new();
    let radio = SimRadio::powered_idle(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);

    block_on(net.clear_credentials()).unwrap();
    assert!(!net.has_stored_credentials());

    assert_eq!(
        block_on(net.set_credentials(None)),
        Err(CommandError::Usage(UsageError::CredentialsMissing))
    );

    let credentials = WifiCredentials::from_parts(b"lab", b"hunter22");
    block_on(net.set_credentials(credentials)).unwrap();
    assert!(net.has_stored_credentials());
    assert_eq!(net.radio().calls, vec!["clear_credentials", "set_credentials"]);
}

#[test]
fn network_config_push_settles_and_surfaces_link_errors() {
    let clock = SimClock::new();
    let radio = SimRadio::powered_idle(&clock);
    let mut net = controller_with(&clock, radio, SimCloud::new(&clock), RADIO_ONLY);
    let config = StaticNetworkConfig {
        ip: NetworkAddress::from_octets(192, 168, 1, 104),
        subnet_mask: NetworkAddress::from_octets(255, 255, 255, 0),
        gateway: NetworkAddress::from_octets(192, 168, 1, 1),
        dns: NetworkAddress::from_octets(192, 168, 1, 1),
    };

    block_on(net.apply_network_config(config)).unwrap();
    assert_eq!(net.radio().pushes.len(), 1);
    assert_eq!(net.radio().pushes[0].config, config);
    assert_eq!(net.pacer().paused_ms(), 500);

    net.radio_mut().push_result = Err(LinkError::ConfigRejected);
    assert_eq!(
        block_on(net.apply_network_config(StaticNetworkConfig::DHCP)),
        Err(CommandError::Link(LinkError::ConfigRejected))
    );
    assert_eq!(net.pacer().paused_ms(), 1_000);
}
