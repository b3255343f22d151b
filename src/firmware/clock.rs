use embassy_time::{Duration, Instant, Timer};
use stackpet::PollClock;

#[derive(Clone, Copy, Default)]
pub(crate) struct EmbassyClock;

impl PollClock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    async fn pause_ms(&mut self, ms: u64) {
        Timer::after(Duration::from_millis(ms)).await;
    }
}
