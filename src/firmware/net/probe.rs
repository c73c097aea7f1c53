use crate::firmware::{
    config::NetPolicy,
    link::{HttpProbe, Pacer},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeReport {
    pub connected: bool,
    /// Failed attempts before the answer, or all of them when none came.
    pub retries: u8,
}

/// Opens `host:port` until it answers or `probe_max_attempts` tries have
/// failed, pausing `probe_retry_delay_ms` after every failure.
pub async fn run_probe<H, P>(
    probe: &mut H,
    pacer: &mut P,
    host: &str,
    port: u16,
    policy: &NetPolicy,
) -> ProbeReport
where
    H: HttpProbe,
    P: Pacer,
{
    let policy = policy.sanitized();
    let mut retries = 0u8;
    loop {
        if probe.get(host, port).await {
            log::info!("probe: {}:{} answered retries={}", host, port, retries);
            return ProbeReport {
                connected: true,
                retries,
            };
        }
        pacer.pause(policy.probe_retry_delay_ms).await;
        retries += 1;
        if retries >= policy.probe_max_attempts {
            log::warn!("probe: {}:{} unreachable after {} tries", host, port, retries);
            return ProbeReport {
                connected: false,
                retries,
            };
        }
    }
}
