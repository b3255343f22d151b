use super::*;
use statig::prelude::*;

pub(super) struct SwipeHsm {
    limits: SwipeLimits,
    pub(super) phase: SwipePhase,
    pub(super) start: Point,
    pub(super) current: Point,
    pub(super) last_good: Point,
    pub(super) release_reads: u8,
}

impl SwipeHsm {
    pub(super) fn new(limits: SwipeLimits) -> Self {
        Self {
            limits,
            phase: SwipePhase::Idle,
            start: Point::zero(),
            current: Point::zero(),
            last_good: Point::zero(),
            release_reads: 0,
        }
    }

    fn begin_press(&mut self, point: Point) {
        self.start = point;
        self.accept(point);
        self.release_reads = 0;
        self.phase = SwipePhase::Pressed;
    }

    fn accept(&mut self, point: Point) {
        self.current = point;
        self.last_good = point;
    }

    fn is_outlier(&self, point: Point) -> bool {
        let jump_x = (point.x - self.last_good.x).abs();
        let jump_y = (point.y - self.last_good.y).abs();
        jump_x > self.limits.outlier_jump_px || jump_y > self.limits.outlier_jump_px
    }

    fn enter_idle(&mut self) {
        self.phase = SwipePhase::Idle;
        self.release_reads = 0;
    }

    fn finalize(&mut self, context: &mut DispatchContext, min_swipe_length: i32) {
        let start = self.start;
        let end = self.current;
        log::debug!(
            "swipe: finalize start=({},{}) end=({},{}) dx={} dy={}",
            start.x,
            start.y,
            end.x,
            end.y,
            end.x - start.x,
            end.y - start.y
        );

        match compute_swipe_dir(start, end, min_swipe_length) {
            Some(direction) => {
                log::info!("swipe: detected direction={}", direction);
                context.event = Some(SwipeEvent {
                    direction,
                    start,
                    end,
                });
            }
            None => log::debug!("swipe: dragging -> idle (short swipe)"),
        }
        self.enter_idle();
    }
}

#[state_machine(initial = "State::idle()")]
impl SwipeHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &SwipeHsmEvent) -> Outcome<State> {
        let _ = context;
        match event {
            SwipeHsmEvent::Sample {
                point: Some(point),
                bounds,
                ..
            } if bounds.contains(*point) => {
                self.begin_press(*point);
                log::debug!("swipe: idle -> pressed at ({},{})", point.x, point.y);
                Transition(State::pressed())
            }
            SwipeHsmEvent::Sample { .. } => {
                self.release_reads = 0;
                Handled
            }
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &SwipeHsmEvent) -> Outcome<State> {
        let _ = context;
        match event {
            SwipeHsmEvent::Sample {
                point: Some(point), ..
            } => {
                self.release_reads = 0;
                self.accept(*point);
                self.phase = SwipePhase::Dragging;
                log::debug!("swipe: pressed -> dragging");
                Transition(State::dragging())
            }
            SwipeHsmEvent::Sample { point: None, .. } => {
                // Lifted before a second contact sample: not a drag.
                self.enter_idle();
                log::debug!("swipe: pressed -> idle (released quickly)");
                Transition(State::idle())
            }
        }
    }

    #[state]
    fn dragging(&mut self, context: &mut DispatchContext, event: &SwipeHsmEvent) -> Outcome<State> {
        match event {
            SwipeHsmEvent::Sample {
                point: Some(point), ..
            } => {
                self.release_reads = 0;
                if self.is_outlier(*point) {
                    log::trace!("swipe: ignoring outlier ({},{})", point.x, point.y);
                } else {
                    self.accept(*point);
                }
                Handled
            }
            SwipeHsmEvent::Sample {
                point: None,
                min_swipe_length,
                ..
            } => {
                self.release_reads = self.release_reads.saturating_add(1);
                if self.release_reads < self.limits.release_confirm_reads {
                    return Handled;
                }
                self.finalize(context, *min_swipe_length);
                Transition(State::idle())
            }
        }
    }
}
