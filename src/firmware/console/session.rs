use core::fmt::{self, Write};

use super::{
    commands::{MenuCommand, MenuLayout},
    menu::write_menu,
    parser::{is_confirmation, parse_menu_key},
    status::write_status,
};
use crate::firmware::{
    config::{compiled_static_config, compiled_wifi_credentials, probe_host},
    link::{CloudLink, HttpProbe, Pacer, RadioLink},
    net::{
        CommandError, GiveUpReason, NetController, RecoveryOutcome, RecoveryReport,
        TransitionKind, TransitionReport, UsageError,
    },
    types::StaticNetworkConfig,
};

/// Operator menu state. Everything but the fix-DNS confirmation lives in
/// the controller, so a session is just a layout plus that one pending prompt.
pub struct MenuSession {
    layout: MenuLayout,
    awaiting_confirmation: bool,
}

impl MenuSession {
    pub const fn new(layout: MenuLayout) -> Self {
        Self {
            layout,
            awaiting_confirmation: false,
        }
    }

    pub const fn layout(&self) -> MenuLayout {
        self.layout
    }

    pub const fn awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation
    }

    pub fn write_prompt<R, C, P, W>(&self, net: &NetController<R, C, P>, out: &mut W) -> fmt::Result
    where
        R: RadioLink,
        C: CloudLink,
        P: Pacer,
        W: Write,
    {
        if self.awaiting_confirmation {
            out.write_str("Type YES to continue --> ")
        } else {
            write_menu(out, self.layout, net.state(), net.dns_is_bad())
        }
    }

    pub async fn handle_line<R, C, P, H, W>(
        &mut self,
        net: &mut NetController<R, C, P>,
        probe: &mut H,
        line: &[u8],
        out: &mut W,
    ) -> fmt::Result
    where
        R: RadioLink,
        C: CloudLink,
        P: Pacer,
        H: HttpProbe,
        W: Write,
    {
        if self.awaiting_confirmation {
            self.awaiting_confirmation = false;
            return run_fix_dns(net, is_confirmation(line), out).await;
        }

        let Some(command) = parse_menu_key(line).and_then(|key| self.layout.command_for_key(key))
        else {
            return out.write_str("Invalid selection.\r\n");
        };
        log::info!("console: command={}", command.as_str());

        match command {
            MenuCommand::Status => {
                out.write_str("Print interface status\r\n")?;
                write_net_status(net, out)
            }
            MenuCommand::ToggleRadio => {
                let kind = net.radio_toggle();
                run_transition(net, kind, out).await
            }
            MenuCommand::ToggleAp => {
                let kind = net.ap_toggle();
                run_transition(net, kind, out).await
            }
            MenuCommand::ToggleCloud => {
                let kind = net.cloud_toggle();
                run_transition(net, kind, out).await
            }
            MenuCommand::ClearCredentials => {
                out.write_str("Clearing WiFi credentials\r\n")?;
                let result = net.clear_credentials().await;
                finish_command(net, result, out)
            }
            MenuCommand::SetCredentials => {
                out.write_str("Setting WiFi credentials\r\n")?;
                let result = net.set_credentials(compiled_wifi_credentials()).await;
                finish_command(net, result, out)
            }
            MenuCommand::SetDhcp => {
                out.write_str("Setting WiFi to DHCP\r\n")?;
                let result = net.apply_network_config(StaticNetworkConfig::DHCP).await;
                finish_command(net, result, out)
            }
            MenuCommand::SetStatic => {
                let config = compiled_static_config();
                write!(
                    out,
                    "Setting WiFi to static ip={} mask={} gw={} dns={}\r\n",
                    config.ip, config.subnet_mask, config.gateway, config.dns
                )?;
                let result = net.apply_network_config(config).await;
                finish_command(net, result, out)
            }
            MenuCommand::TestDns => run_test_dns(net, probe, out).await,
            MenuCommand::FixDns => {
                out.write_str("Fix DNS\r\n")?;
                match net.check_fix_dns() {
                    Ok(()) => {
                        self.awaiting_confirmation = true;
                        out.write_str(
                            "CAUTION: repeated resets stress the radio and may damage it.\r\n",
                        )
                    }
                    Err(err) => write_usage_error(out, err),
                }
            }
        }
    }
}

fn write_net_status<R, C, P, W>(net: &NetController<R, C, P>, out: &mut W) -> fmt::Result
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
    W: Write,
{
    write_status(out, net.state(), &net.link_info())
}

fn write_usage_error<W: Write>(out: &mut W, err: UsageError) -> fmt::Result {
    write!(out, "Error - {}\r\n", err)
}

fn write_credentials_hint<W: Write>(out: &mut W, credentials_known: bool) -> fmt::Result {
    let known = if credentials_known {
        "known"
    } else {
        "unknown"
    };
    write!(
        out,
        "Failed to connect to WiFi router - credentials {}\r\n",
        known
    )
}

const fn transition_label(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::RadioEnable => "Radio - enabling",
        TransitionKind::RadioDisable => "Radio - disabling",
        TransitionKind::ApConnect => "WiFi - connecting",
        TransitionKind::ApDisconnect => "WiFi - disconnecting",
        TransitionKind::CloudConnect => "Cloud - connecting",
        TransitionKind::CloudDisconnect => "Cloud - disconnecting",
    }
}

async fn run_transition<R, C, P, W>(
    net: &mut NetController<R, C, P>,
    kind: TransitionKind,
    out: &mut W,
) -> fmt::Result
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
    W: Write,
{
    write!(out, "{}\r\n", transition_label(kind))?;
    match net.transition(kind).await {
        Ok(report) => {
            write_transition_outcome(net, &report, out)?;
            write_net_status(net, out)
        }
        Err(err) => write_usage_error(out, err),
    }
}

fn write_transition_outcome<R, C, P, W>(
    net: &NetController<R, C, P>,
    report: &TransitionReport,
    out: &mut W,
) -> fmt::Result
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
    W: Write,
{
    if !report.timed_out {
        return Ok(());
    }
    match report.kind {
        TransitionKind::ApConnect => write_credentials_hint(out, net.has_stored_credentials()),
        TransitionKind::CloudConnect => out.write_str("Failed to connect to the cloud.\r\n"),
        TransitionKind::CloudDisconnect => out.write_str("Failed to disconnect from the cloud.\r\n"),
        kind => write!(
            out,
            "{} timed out after {} ticks\r\n",
            transition_label(kind),
            report.ticks
        ),
    }
}

fn finish_command<R, C, P, W>(
    net: &NetController<R, C, P>,
    result: Result<(), CommandError>,
    out: &mut W,
) -> fmt::Result
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
    W: Write,
{
    match result {
        Ok(()) => write_net_status(net, out),
        Err(CommandError::Usage(err)) => write_usage_error(out, err),
        Err(CommandError::Link(err)) => write!(out, "Failed - {}\r\n", err),
    }
}

async fn run_test_dns<R, C, P, H, W>(
    net: &mut NetController<R, C, P>,
    probe: &mut H,
    out: &mut W,
) -> fmt::Result
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
    H: HttpProbe,
    W: Write,
{
    let host = probe_host();
    write!(out, "Test DNS\r\n\r\nConnect to {} - ", host)?;
    let report = match net.test_dns(probe, host).await {
        Ok(report) => report,
        Err(err) => {
            out.write_str("\r\n")?;
            return write_usage_error(out, err);
        }
    };
    if report.connected {
        out.write_str("Connect successful! ")?;
    } else {
        out.write_str("Connect unsuccessful. ")?;
    }
    match report.retries {
        0 => {}
        1 => out.write_str("[1 retry]")?,
        retries => write!(out, "[{} retries]", retries)?,
    }
    out.write_str("\r\n")
}

async fn run_fix_dns<R, C, P, W>(
    net: &mut NetController<R, C, P>,
    confirmed: bool,
    out: &mut W,
) -> fmt::Result
where
    R: RadioLink,
    C: CloudLink,
    P: Pacer,
    W: Write,
{
    match net.fix_dns(confirmed).await {
        Ok(report) => {
            write_recovery_outcome(&report, out)?;
            write_net_status(net, out)
        }
        Err(UsageError::NotConfirmed) => out.write_str("Fix DNS cancelled.\r\n"),
        Err(err) => write_usage_error(out, err),
    }
}

fn write_recovery_outcome<W: Write>(report: &RecoveryReport, out: &mut W) -> fmt::Result {
    match report.outcome {
        RecoveryOutcome::Success => write!(
            out,
            "Success! Attempt #{} dns={}\r\n",
            report.attempts, report.dns
        ),
        RecoveryOutcome::GaveUp(GiveUpReason::AssociationTimeout { credentials_known }) => {
            write_credentials_hint(out, credentials_known)
        }
        RecoveryOutcome::GaveUp(GiveUpReason::DnsNotReported) => write!(
            out,
            "Attempt #{}: radio never reported a DNS address\r\n",
            report.attempts
        ),
        RecoveryOutcome::GaveUp(GiveUpReason::Exhausted) => write!(
            out,
            "DNS still bad after {} attempts\r\n",
            report.attempts
        ),
    }
}
