use embassy_time::{Duration, Timer};

use crate::firmware::link::Pacer;

/// Sleeps on the embassy timer so the network runner keeps turning while a
/// poll waits.
pub(super) struct EmbassyPacer;

impl Pacer for EmbassyPacer {
    async fn pause(&mut self, ms: u32) {
        if ms == 0 {
            embassy_futures::yield_now().await;
        } else {
            Timer::after(Duration::from_millis(u64::from(ms))).await;
        }
    }
}
