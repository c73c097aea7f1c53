use crate::firmware::link::Pacer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOutcome {
    pub ticks: u32,
    pub timed_out: bool,
}

/// Checks `done` before every tick and pauses `interval_ms` between checks,
/// at most `max_ticks` times. The predicate gets one last look after the
/// final pause before the poll reports a timeout.
pub async fn poll_until<P, F>(
    pacer: &mut P,
    interval_ms: u32,
    max_ticks: u32,
    mut done: F,
) -> PollOutcome
where
    P: Pacer,
    F: FnMut() -> bool,
{
    let mut ticks = 0u32;
    loop {
        if done() {
            return PollOutcome {
                ticks,
                timed_out: false,
            };
        }
        if ticks >= max_ticks {
            return PollOutcome {
                ticks,
                timed_out: true,
            };
        }
        pacer.pause(interval_ms).await;
        ticks += 1;
    }
}
