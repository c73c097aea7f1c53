mod policy;
mod user;

pub use policy::*;
pub use user::{
    cloud_host, compiled_static_config, compiled_wifi_credentials, probe_host,
    CLOUD_HOST_DEFAULT, CLOUD_PORT, PROBE_HOST_DEFAULT, PROBE_PORT,
};

/// Longest console line; a menu key or a confirmation word.
pub const CONSOLE_LINE_MAX: usize = 64;
/// Room for the status table plus one command reply.
pub const CONSOLE_REPLY_MAX: usize = 2048;
pub const UART_BAUD: u32 = 115_200;
