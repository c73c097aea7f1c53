use core::fmt::{self, Display, Write};

use crate::firmware::{
    net::is_bad_dns,
    types::{LinkInfo, RadioState},
};

const BORDER: &str = "+-------------+-------------------+\r\n";
const DIVIDER: &str = "|-------------+-------------------|\r\n";

/// Interface table in the fixed two-column layout operators diff between
/// runs. A corrupted DNS address is flagged with `*`.
pub fn write_status<W: Write>(out: &mut W, state: RadioState, info: &LinkInfo) -> fmt::Result {
    out.write_str("\r\n+---------------------------------+\r\n")?;
    write!(
        out,
        "|{:^33}|\r\n",
        concat!("DNS Test v", env!("CARGO_PKG_VERSION"))
    )?;
    out.write_str(BORDER)?;

    row(out, "Radio", on_off(state.radio_enabled))?;
    if state.radio_enabled {
        match info.mac {
            Some(mac) => row(out, "  Mac Addr", mac)?,
            None => row(out, "  Mac Addr", "unknown")?,
        }
    }
    out.write_str(DIVIDER)?;

    row(out, "WiFi", connected(state.ap_connected))?;
    if state.ap_connected {
        row(out, "  SSID", info.ssid.as_str())?;
        match info.rssi {
            Some(rssi) => row(out, "  RSSI", rssi)?,
            None => row(out, "  RSSI", "n/a")?,
        }
        row(out, "  Local IP", info.local_ip)?;
        row(out, "  Subnet", info.subnet_mask)?;
        row(out, "  Gateway", info.gateway)?;
        if is_bad_dns(info.dns) {
            write!(out, "| {:<11} | {:<15} * |\r\n", "  DNS IP", info.dns)?;
        } else {
            row(out, "  DNS IP", info.dns)?;
        }
    }
    out.write_str(DIVIDER)?;

    row(out, "Cloud", connected(state.cloud_connected))?;
    out.write_str(BORDER)
}

fn row<W: Write>(out: &mut W, label: &str, value: impl Display) -> fmt::Result {
    write!(out, "| {:<11} | {:<17} |\r\n", label, value)
}

const fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

const fn connected(value: bool) -> &'static str {
    if value {
        "Connected"
    } else {
        "Not Connected"
    }
}
