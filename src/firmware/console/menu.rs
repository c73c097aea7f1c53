use core::fmt::{self, Write};

use super::commands::{MenuCommand, MenuLayout};
use crate::firmware::types::RadioState;

pub fn write_menu<W: Write>(
    out: &mut W,
    layout: MenuLayout,
    state: RadioState,
    dns_bad: bool,
) -> fmt::Result {
    out.write_str("\r\nEnter\r\n")?;
    for (key, command) in layout.commands().iter().enumerate() {
        if !command.is_offered(state, dns_bad) {
            continue;
        }
        write!(out, "   [{}] {}\r\n", key, menu_label(*command, state))?;
    }
    out.write_str("   --> ")
}

fn menu_label(command: MenuCommand, state: RadioState) -> &'static str {
    match command {
        MenuCommand::Status => "Print interface status",
        MenuCommand::ToggleRadio if state.radio_enabled => "Radio Disable",
        MenuCommand::ToggleRadio => "Radio Enable",
        MenuCommand::ToggleAp if state.ap_connected => "WiFi Disconnect",
        MenuCommand::ToggleAp => "WiFi Connect",
        MenuCommand::ClearCredentials => "WiFi Clear Credentials",
        MenuCommand::SetCredentials => "WiFi Set Credentials",
        MenuCommand::SetDhcp => "Set WiFi to DHCP",
        MenuCommand::SetStatic => "Set WiFi to static IP/DNS",
        MenuCommand::ToggleCloud if state.cloud_connected => "Cloud Disconnect",
        MenuCommand::ToggleCloud => "Cloud Connect",
        MenuCommand::TestDns => "Test DNS lookup",
        MenuCommand::FixDns => "Fix DNS",
    }
}
