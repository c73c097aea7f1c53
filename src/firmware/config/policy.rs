// 100 ms poll quantum, a 10 s association cap, 5 recovery rounds and a
// 500 ms settle after config pushes.
pub const POLL_INTERVAL_DEFAULT_MS: u32 = 100;
pub const ASSOCIATION_TIMEOUT_DEFAULT_TICKS: u32 = 100;
// Half the association budget: long enough to ride out the bad value the
// radio reports transiently while negotiating.
pub const TRANSIENT_DNS_TIMEOUT_DEFAULT_TICKS: u32 = ASSOCIATION_TIMEOUT_DEFAULT_TICKS / 2;
pub const DISASSOCIATION_TIMEOUT_DEFAULT_TICKS: u32 = 100;
pub const POWER_TIMEOUT_DEFAULT_TICKS: u32 = 100;
pub const CLOUD_TIMEOUT_DEFAULT_TICKS: u32 = 100;
pub const RECOVERY_MAX_ATTEMPTS_DEFAULT: u8 = 5;
pub const SETTLE_DELAY_DEFAULT_MS: u32 = 500;
pub const PROBE_MAX_ATTEMPTS_DEFAULT: u8 = 5;
pub const PROBE_RETRY_DELAY_DEFAULT_MS: u32 = 100;

const TICKS_MAX: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetPolicy {
    pub poll_interval_ms: u32,
    pub association_timeout_ticks: u32,
    pub transient_dns_timeout_ticks: u32,
    pub disassociation_timeout_ticks: u32,
    pub power_timeout_ticks: u32,
    pub cloud_timeout_ticks: u32,
    pub recovery_max_attempts: u8,
    pub settle_delay_ms: u32,
    pub probe_max_attempts: u8,
    pub probe_retry_delay_ms: u32,
}

impl NetPolicy {
    pub const fn defaults() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_DEFAULT_MS,
            association_timeout_ticks: ASSOCIATION_TIMEOUT_DEFAULT_TICKS,
            transient_dns_timeout_ticks: TRANSIENT_DNS_TIMEOUT_DEFAULT_TICKS,
            disassociation_timeout_ticks: DISASSOCIATION_TIMEOUT_DEFAULT_TICKS,
            power_timeout_ticks: POWER_TIMEOUT_DEFAULT_TICKS,
            cloud_timeout_ticks: CLOUD_TIMEOUT_DEFAULT_TICKS,
            recovery_max_attempts: RECOVERY_MAX_ATTEMPTS_DEFAULT,
            settle_delay_ms: SETTLE_DELAY_DEFAULT_MS,
            probe_max_attempts: PROBE_MAX_ATTEMPTS_DEFAULT,
            probe_retry_delay_ms: PROBE_RETRY_DELAY_DEFAULT_MS,
        }
    }

    /// Every wait keeps a non-zero ceiling; nothing may poll forever.
    pub const fn sanitized(self) -> Self {
        let poll_interval_ms = clamp_u32(self.poll_interval_ms, 0, 10_000);
        let association_timeout_ticks = clamp_u32(self.association_timeout_ticks, 1, TICKS_MAX);
        let mut transient_dns_timeout_ticks =
            clamp_u32(self.transient_dns_timeout_ticks, 1, TICKS_MAX);
        if transient_dns_timeout_ticks > association_timeout_ticks {
            transient_dns_timeout_ticks = association_timeout_ticks;
        }
        let disassociation_timeout_ticks =
            clamp_u32(self.disassociation_timeout_ticks, 1, TICKS_MAX);
        let power_timeout_ticks = clamp_u32(self.power_timeout_ticks, 1, TICKS_MAX);
        let cloud_timeout_ticks = clamp_u32(self.cloud_timeout_ticks, 1, TICKS_MAX);
        let recovery_max_attempts = clamp_u8(self.recovery_max_attempts, 1, 16);
        let settle_delay_ms = clamp_u32(self.settle_delay_ms, 0, 10_000);
        let probe_max_attempts = clamp_u8(self.probe_max_attempts, 1, 16);
        let probe_retry_delay_ms = clamp_u32(self.probe_retry_delay_ms, 0, 10_000);
        Self {
            poll_interval_ms,
            association_timeout_ticks,
            transient_dns_timeout_ticks,
            disassociation_timeout_ticks,
            power_timeout_ticks,
            cloud_timeout_ticks,
            recovery_max_attempts,
            settle_delay_ms,
            probe_max_attempts,
            probe_retry_delay_ms,
        }
    }
}

impl Default for NetPolicy {
    fn default() -> Self {
        Self::defaults()
    }
}

const fn clamp_u32(value: u32, min: u32, max: u32) -> u32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

const fn clamp_u8(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
