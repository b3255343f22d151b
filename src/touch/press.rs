use embassy_time::Duration;
use embedded_graphics::prelude::Point;

use super::{bounds::Region, sampler::TouchSampler};

pub const HOLD_POLL_INTERVAL_MS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Pending,
    Confirmed,
    Released,
}

/// Time source for the suspending touch waits.
#[allow(async_fn_in_trait)]
pub trait PollClock {
    fn now_ms(&self) -> u64;
    async fn pause_ms(&mut self, ms: u64);
}

/// Hold-to-confirm tracker, stepped once per touch sample.
///
/// Leaving the region while still touching re-arms the timer instead of failing;
/// only a release after the press was armed fails.
#[derive(Clone, Copy, Debug)]
pub struct PressTimer {
    region: Region,
    duration_ms: u64,
    pressed_since_ms: Option<u64>,
}

impl PressTimer {
    pub fn new(region: Region, duration: Duration) -> Self {
        Self {
            region,
            duration_ms: duration.as_millis(),
            pressed_since_ms: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pressed_since_ms.is_some()
    }

    pub fn tick(&mut self, now_ms: u64, sample: Option<Point>) -> PressOutcome {
        match sample {
            Some(point) if self.region.contains(point) => {
                let since = *self.pressed_since_ms.get_or_insert(now_ms);
                if now_ms.saturating_sub(since) >= self.duration_ms {
                    PressOutcome::Confirmed
                } else {
                    PressOutcome::Pending
                }
            }
            Some(_) => {
                self.pressed_since_ms = None;
                PressOutcome::Pending
            }
            None if self.pressed_since_ms.is_some() => PressOutcome::Released,
            None => PressOutcome::Pending,
        }
    }
}

/// Suspends until `region` has been held for `duration` (`true`) or the armed press
/// is released (`false`). Waits indefinitely while nothing touches the panel.
pub async fn hold_to_confirm<S, C>(
    sampler: &mut S,
    clock: &mut C,
    region: Region,
    duration: Duration,
    poll_interval_ms: u64,
) -> bool
where
    S: TouchSampler,
    C: PollClock,
{
    let mut timer = PressTimer::new(region, duration);
    loop {
        let sample = sampler.poll();
        match timer.tick(clock.now_ms(), sample) {
            PressOutcome::Confirmed => {
                log::debug!("press: confirmed after {}ms", duration.as_millis());
                return true;
            }
            PressOutcome::Released => {
                log::debug!("press: released early");
                return false;
            }
            PressOutcome::Pending => clock.pause_ms(poll_interval_ms).await,
        }
    }
}

pub async fn wait_for_release<S, C>(sampler: &mut S, clock: &mut C, poll_interval_ms: u64)
where
    S: TouchSampler,
    C: PollClock,
{
    while sampler.poll().is_some() {
        clock.pause_ms(poll_interval_ms).await;
    }
}
