use core::fmt;

use embassy_time::Duration;
use embedded_graphics::prelude::{Point, Size};
use heapless::Vec;

use super::kinematics::{Kinematics, Pose};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTiming {
    pub duration: Duration,
    pub repeat: Repeat,
}

impl AnimationTiming {
    pub const fn once(duration: Duration) -> Self {
        Self {
            duration,
            repeat: Repeat::Once,
        }
    }

    pub const fn infinite(duration: Duration) -> Self {
        Self {
            duration,
            repeat: Repeat::Infinite,
        }
    }
}

/// Cumulative stack rotation in tenths of a degree.
///
/// Holds the intended end angle of the last triggered animation, not what is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AngleAccumulator(i32);

impl AngleAccumulator {
    pub const fn new(angle: i32) -> Self {
        Self(angle)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn set(&mut self, angle: i32) {
        self.0 = angle;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteLayer<H> {
    pub handle: H,
    pub base: Point,
    pub image: Size,
    pub index: u16,
    pub total: u16,
}

/// One interpolation request: drive `layer` from `start` to `end` over `duration`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerJob<H> {
    pub layer: SpriteLayer<H>,
    pub kinematics: Kinematics,
    pub start: i32,
    pub end: i32,
    pub duration: Duration,
    pub repeat: Repeat,
}

impl<H: Copy> LayerJob<H> {
    pub fn target(&self) -> H {
        self.layer.handle
    }

    pub fn pose_at(&self, angle_v: i32) -> Pose {
        self.kinematics.pose(angle_v, &self.layer)
    }

    /// Interpolated value after `elapsed_ms`, and whether the job has finished.
    pub fn value_at(&self, elapsed_ms: u64) -> (i32, bool) {
        let duration_ms = self.duration.as_millis();
        if duration_ms == 0 {
            return (self.end, matches!(self.repeat, Repeat::Once));
        }

        let progress_ms = match self.repeat {
            Repeat::Once if elapsed_ms >= duration_ms => return (self.end, true),
            Repeat::Once => elapsed_ms,
            Repeat::Infinite => elapsed_ms % duration_ms,
        };

        let span = i64::from(self.end) - i64::from(self.start);
        let step = span * progress_ms as i64 / duration_ms as i64;
        ((i64::from(self.start) + step) as i32, false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    Full,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("animation scheduler is full"),
        }
    }
}

impl core::error::Error for ScheduleError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackError {
    Full { capacity: usize },
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { capacity } => write!(f, "sprite stack holds at most {capacity} layers"),
        }
    }
}

impl core::error::Error for StackError {}

/// Timed value interpolation service that owns frame pacing.
pub trait AnimationScheduler<H> {
    fn cancel(&mut self, target: H);
    fn schedule(&mut self, job: LayerJob<H>) -> Result<(), ScheduleError>;
}

/// Drawable that accepts layer poses.
pub trait SpriteSurface<H> {
    fn set_rotation(&mut self, target: H, tenths_of_degree: i32);
    fn set_pivot(&mut self, target: H, pivot: Point);
    fn set_position(&mut self, target: H, position: Point);

    fn apply(&mut self, target: H, pose: Pose)
    where
        H: Copy,
    {
        self.set_rotation(target, pose.rotation);
        self.set_pivot(target, pose.pivot);
        self.set_position(target, pose.position);
    }
}

/// Layers of one sprite stack, bottom first, with the job last scheduled on each.
pub struct AnimationStack<H, const N: usize> {
    layers: Vec<SpriteLayer<H>, N>,
    jobs: Vec<Option<LayerJob<H>>, N>,
}

impl<H: Copy, const N: usize> Default for AnimationStack<H, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy, const N: usize> AnimationStack<H, N> {
    pub const fn new() -> Self {
        Self {
            layers: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn from_sprites<I>(base: Point, sprites: I) -> Result<Self, StackError>
    where
        I: IntoIterator<Item = (H, Size)>,
    {
        let mut stack = Self::new();
        for (handle, image) in sprites {
            stack.push(handle, base, image)?;
        }
        Ok(stack)
    }

    /// Adds a layer on top of the stack and renumbers `total` on every layer.
    pub fn push(&mut self, handle: H, base: Point, image: Size) -> Result<u16, StackError> {
        let full = StackError::Full { capacity: N };
        let index = u16::try_from(self.layers.len()).map_err(|_| full)?;
        self.layers
            .push(SpriteLayer {
                handle,
                base,
                image,
                index,
                total: 0,
            })
            .map_err(|_| full)?;
        self.jobs.push(None).map_err(|_| full)?;

        let total = index + 1;
        for layer in &mut self.layers {
            layer.total = total;
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[SpriteLayer<H>] {
        &self.layers
    }

    pub fn job(&self, index: usize) -> Option<&LayerJob<H>> {
        self.jobs.get(index).and_then(Option::as_ref)
    }

    /// Restarts every layer on a new interpolation from the accumulated angle to
    /// `angle + delta`, then advances the accumulator to that end angle.
    pub fn animate<S>(
        &mut self,
        scheduler: &mut S,
        angle: &mut AngleAccumulator,
        delta: i32,
        timing: AnimationTiming,
        kinematics: Kinematics,
    ) where
        S: AnimationScheduler<H>,
    {
        let start = angle.get();
        let end = start.wrapping_add(delta);

        for (layer, slot) in self.layers.iter().zip(self.jobs.iter_mut()) {
            // Two live jobs on one layer would fight over its position.
            scheduler.cancel(layer.handle);

            let job = LayerJob {
                layer: *layer,
                kinematics,
                start,
                end,
                duration: timing.duration,
                repeat: timing.repeat,
            };
            *slot = match scheduler.schedule(job) {
                Ok(()) => Some(job),
                Err(err) => {
                    log::warn!("stack: layer={} not scheduled: {}", layer.index, err);
                    None
                }
            };
        }

        log::debug!(
            "stack: {} layers={} {}->{} over {}ms {:?}",
            kinematics,
            self.layers.len(),
            start,
            end,
            timing.duration.as_millis(),
            timing.repeat
        );
        angle.set(end);
    }
}
