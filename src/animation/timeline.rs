use heapless::Vec;

use super::stack::{AnimationScheduler, LayerJob, ScheduleError, SpriteSurface};

#[derive(Clone, Copy, Debug)]
struct ActiveJob<H> {
    job: LayerJob<H>,
    started_ms: Option<u64>,
}

/// Linear tween scheduler driven from the render loop.
///
/// A job starts on the first `advance` after it was scheduled. Finished single-shot
/// jobs apply their end value once and are dropped.
pub struct Timeline<H, const N: usize> {
    jobs: Vec<ActiveJob<H>, N>,
}

impl<H: Copy + PartialEq, const N: usize> Default for Timeline<H, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + PartialEq, const N: usize> Timeline<H, N> {
    pub const fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_idle(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn is_running(&self, target: H) -> bool {
        self.jobs.iter().any(|active| active.job.target() == target)
    }

    /// Applies the pose of every running job at `now_ms`. Returns how many jobs remain.
    pub fn advance<S>(&mut self, now_ms: u64, surface: &mut S) -> usize
    where
        S: SpriteSurface<H>,
    {
        self.jobs.retain_mut(|active| {
            let started_ms = *active.started_ms.get_or_insert(now_ms);
            let (value, finished) = active.job.value_at(now_ms.saturating_sub(started_ms));
            surface.apply(active.job.target(), active.job.pose_at(value));
            !finished
        });
        self.jobs.len()
    }
}

impl<H: Copy + PartialEq, const N: usize> AnimationScheduler<H> for Timeline<H, N> {
    fn cancel(&mut self, target: H) {
        self.jobs.retain(|active| active.job.target() != target);
    }

    fn schedule(&mut self, job: LayerJob<H>) -> Result<(), ScheduleError> {
        self.jobs
            .push(ActiveJob {
                job,
                started_ms: None,
            })
            .map_err(|_| ScheduleError::Full)
    }
}
