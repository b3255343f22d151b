use embassy_time::Duration;

use crate::{
    animation::{AngleAccumulator, AnimationScheduler, AnimationStack, AnimationTiming, Kinematics},
    config::GestureConfig,
    touch::{
        bounds::Region,
        sampler::TouchSampler,
        swipe::{SwipeDetector, SwipeLimits, SwipePhase},
        types::SwipeDirection,
    },
};

/// Animation started by a gesture: which kinematics to run and how far to turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub kinematics: Kinematics,
    /// Angular delta in tenths of a degree.
    pub offset: i32,
}

impl Binding {
    pub const fn new(kinematics: Kinematics, offset: i32) -> Self {
        Self { kinematics, offset }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeMapping {
    pub left: Binding,
    pub right: Binding,
    pub up: Binding,
    pub down: Binding,
}

impl SwipeMapping {
    pub const fn binding(&self, direction: SwipeDirection) -> Binding {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Right => self.right,
            SwipeDirection::Up => self.up,
            SwipeDirection::Down => self.down,
        }
    }
}

pub struct GestureDispatcher {
    detector: SwipeDetector,
    region: Region,
    min_swipe_length: i32,
    mapping: SwipeMapping,
    timing: AnimationTiming,
}

impl GestureDispatcher {
    pub fn new(
        region: Region,
        min_swipe_length: i32,
        mapping: SwipeMapping,
        timing: AnimationTiming,
    ) -> Self {
        Self::with_detector(
            SwipeDetector::new(),
            region,
            min_swipe_length,
            mapping,
            timing,
        )
    }

    pub fn with_detector(
        detector: SwipeDetector,
        region: Region,
        min_swipe_length: i32,
        mapping: SwipeMapping,
        timing: AnimationTiming,
    ) -> Self {
        Self {
            detector,
            region,
            min_swipe_length,
            mapping,
            timing,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        let limits = SwipeLimits {
            outlier_jump_px: config.swipe.outlier_jump_px,
            release_confirm_reads: config.swipe.release_confirm_reads,
        };
        Self::with_detector(
            SwipeDetector::with_limits(limits),
            config.swipe.region,
            config.swipe.min_length,
            config.bindings,
            AnimationTiming {
                duration: Duration::from_millis(config.animation.duration_ms),
                repeat: config.animation.repeat,
            },
        )
    }

    pub fn detector(&self) -> &SwipeDetector {
        &self.detector
    }

    pub fn phase(&self) -> SwipePhase {
        self.detector.phase()
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    /// Samples once and steps the swipe detector. A completed swipe animates `stack`
    /// with the bound kinematics and is returned.
    pub fn poll_swipe<T, H, const N: usize, S>(
        &mut self,
        sampler: &mut T,
        stack: &mut AnimationStack<H, N>,
        angle: &mut AngleAccumulator,
        scheduler: &mut S,
    ) -> Option<SwipeDirection>
    where
        T: TouchSampler,
        H: Copy,
        S: AnimationScheduler<H>,
    {
        let event = self
            .detector
            .poll(sampler.poll(), self.region, self.min_swipe_length)?;
        let binding = self.mapping.binding(event.direction);
        log::info!(
            "gesture: swipe {} -> {} {:+}",
            event.direction,
            binding.kinematics,
            binding.offset
        );
        stack.animate(
            scheduler,
            angle,
            binding.offset,
            self.timing,
            binding.kinematics,
        );
        Some(event.direction)
    }

    /// Samples once and, if the contact lies inside `region`, animates `stack` with
    /// `binding`. Fires on every call that sees contact; callers that poll each frame
    /// restart the animation for as long as the finger stays down.
    pub fn poll_tap<T, H, const N: usize, S>(
        &self,
        sampler: &mut T,
        region: Region,
        binding: Binding,
        stack: &mut AnimationStack<H, N>,
        angle: &mut AngleAccumulator,
        scheduler: &mut S,
    ) -> bool
    where
        T: TouchSampler,
        H: Copy,
        S: AnimationScheduler<H>,
    {
        match sampler.poll() {
            Some(point) if region.contains(point) => {
                stack.animate(
                    scheduler,
                    angle,
                    binding.offset,
                    self.timing,
                    binding.kinematics,
                );
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec as StdVec;

    use embedded_graphics::prelude::{Point, Size};

    use super::*;
    use crate::{
        animation::{LayerJob, Repeat, ScheduleError},
        touch::sampler::script::ScriptedSampler,
    };

    #[derive(Default)]
    struct JobLog {
        jobs: StdVec<LayerJob<u8>>,
        cancels: usize,
    }

    impl AnimationScheduler<u8> for JobLog {
        fn cancel(&mut self, _target: u8) {
            self.cancels += 1;
        }

        fn schedule(&mut self, job: LayerJob<u8>) -> Result<(), ScheduleError> {
            self.jobs.push(job);
            Ok(())
        }
    }

    const MAPPING: SwipeMapping = SwipeMapping {
        left: Binding::new(Kinematics::Rotate, -3600),
        right: Binding::new(Kinematics::Rotate, 3600),
        up: Binding::new(Kinematics::Item, 7200),
        down: Binding::new(Kinematics::Pet, 1800),
    };

    fn dispatcher() -> GestureDispatcher {
        GestureDispatcher::new(
            Region::rect(20, 220, 20, 220),
            20,
            MAPPING,
            AnimationTiming::once(Duration::from_millis(600)),
        )
    }

    fn stack() -> AnimationStack<u8, 4> {
        AnimationStack::from_sprites(
            Point::new(120, 120),
            [(10u8, Size::new(32, 32)), (11, Size::new(32, 32))],
        )
        .expect("stack fits")
    }

    fn drag(from: Point, to: Point) -> StdVec<Option<Point>> {
        std::vec![Some(from), Some(to), None, None]
    }

    #[test]
    fn each_direction_runs_its_binding() {
        let center = Point::new(120, 120);
        let cases = [
            (Point::new(30, 120), SwipeDirection::Left),
            (Point::new(210, 120), SwipeDirection::Right),
            (Point::new(120, 30), SwipeDirection::Up),
            (Point::new(120, 210), SwipeDirection::Down),
        ];

        for (end, direction) in cases {
            let mut dispatcher = dispatcher();
            let mut sampler = ScriptedSampler::new(&drag(center, end));
            let mut stack = stack();
            let mut angle = AngleAccumulator::new(100);
            let mut scheduler = JobLog::default();

            let mut detected = StdVec::new();
            for _ in 0..4 {
                if let Some(dir) =
                    dispatcher.poll_swipe(&mut sampler, &mut stack, &mut angle, &mut scheduler)
                {
                    detected.push(dir);
                }
            }

            let binding = MAPPING.binding(direction);
            assert_eq!(detected, std::vec![direction]);
            assert_eq!(angle.get(), 100 + binding.offset);
            assert_eq!(scheduler.jobs.len(), 2);
            assert_eq!(scheduler.cancels, 2);
            assert!(scheduler
                .jobs
                .iter()
                .all(|job| job.kinematics == binding.kinematics
                    && job.duration == Duration::from_millis(600)
                    && job.repeat == Repeat::Once));
        }
    }

    #[test]
    fn short_drag_schedules_nothing() {
        let mut dispatcher = dispatcher();
        let mut sampler = ScriptedSampler::new(&drag(Point::new(120, 120), Point::new(130, 125)));
        let mut stack = stack();
        let mut angle = AngleAccumulator::default();
        let mut scheduler = JobLog::default();

        for _ in 0..4 {
            assert_eq!(
                dispatcher.poll_swipe(&mut sampler, &mut stack, &mut angle, &mut scheduler),
                None
            );
        }
        assert!(scheduler.jobs.is_empty());
        assert_eq!(angle.get(), 0);
        assert_eq!(dispatcher.phase(), SwipePhase::Idle);
    }

    #[test]
    fn each_poll_consumes_exactly_one_sample() {
        let mut dispatcher = dispatcher();
        let mut sampler = ScriptedSampler::new(&[Some(Point::new(50, 50)), None]);
        let mut stack = stack();
        let mut angle = AngleAccumulator::default();
        let mut scheduler = JobLog::default();

        dispatcher.poll_swipe(&mut sampler, &mut stack, &mut angle, &mut scheduler);
        assert_eq!(sampler.polls, 1);
        assert_eq!(dispatcher.phase(), SwipePhase::Pressed);
    }

    #[test]
    fn tap_fires_on_every_touched_call() {
        let dispatcher = dispatcher();
        let region = Region::circle(Point::new(120, 120), 40);
        let binding = Binding::new(Kinematics::Pet, 900);
        let mut sampler = ScriptedSampler::new(&[
            Some(Point::new(130, 110)),
            Some(Point::new(125, 125)),
            Some(Point::new(10, 10)),
            None,
        ]);
        let mut stack = stack();
        let mut angle = AngleAccumulator::default();
        let mut scheduler = JobLog::default();

        let fired: StdVec<bool> = (0..4)
            .map(|_| {
                dispatcher.poll_tap(
                    &mut sampler,
                    region,
                    binding,
                    &mut stack,
                    &mut angle,
                    &mut scheduler,
                )
            })
            .collect();

        assert_eq!(fired, std::vec![true, true, false, false]);
        assert_eq!(angle.get(), 1800);
        assert_eq!(scheduler.jobs.len(), 4);
        assert_eq!(scheduler.cancels, 4);
    }

    #[test]
    fn built_from_compiled_config() {
        let config = crate::config::active_config();
        let dispatcher = GestureDispatcher::from_config(config);
        assert_eq!(
            dispatcher.timing().duration,
            Duration::from_millis(config.animation.duration_ms)
        );
        assert_eq!(dispatcher.phase(), SwipePhase::Idle);
    }
}
