use embedded_graphics::prelude::Point;
use statig::blocking::IntoStateMachineExt as _;

mod hsm;

use hsm::SwipeHsm;

use super::{bounds::Region, types::SwipeDirection};

pub const SWIPE_OUTLIER_JUMP_PX: i32 = 80;
pub const SWIPE_RELEASE_CONFIRM_READS: u8 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwipePhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeEvent {
    pub direction: SwipeDirection,
    pub start: Point,
    pub end: Point,
}

/// Observable state of one interactive surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwipeTracker {
    pub phase: SwipePhase,
    pub start: Point,
    pub current: Point,
    pub last_good: Point,
    pub release_reads: u8,
    pub swipe_detected: bool,
    pub swipe_dir: Option<SwipeDirection>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeLimits {
    pub outlier_jump_px: i32,
    pub release_confirm_reads: u8,
}

impl Default for SwipeLimits {
    fn default() -> Self {
        Self {
            outlier_jump_px: SWIPE_OUTLIER_JUMP_PX,
            release_confirm_reads: SWIPE_RELEASE_CONFIRM_READS,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum SwipeHsmEvent {
    Sample {
        point: Option<Point>,
        bounds: Region,
        min_swipe_length: i32,
    },
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    event: Option<SwipeEvent>,
}

pub struct SwipeDetector {
    machine: statig::blocking::StateMachine<SwipeHsm>,
    last_event: Option<SwipeEvent>,
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeDetector {
    pub fn new() -> Self {
        Self::with_limits(SwipeLimits::default())
    }

    pub fn with_limits(limits: SwipeLimits) -> Self {
        Self {
            machine: SwipeHsm::new(limits).state_machine(),
            last_event: None,
        }
    }

    /// Feeds one sample. Returns the swipe completed by this sample, if any.
    ///
    /// Only the initial press has to land inside `bounds`; the drag may leave it.
    pub fn poll(
        &mut self,
        point: Option<Point>,
        bounds: Region,
        min_swipe_length: i32,
    ) -> Option<SwipeEvent> {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(
            &SwipeHsmEvent::Sample {
                point,
                bounds,
                min_swipe_length,
            },
            &mut context,
        );
        self.last_event = context.event;
        context.event
    }

    pub fn tracker(&self) -> SwipeTracker {
        let inner = self.machine.inner();
        SwipeTracker {
            phase: inner.phase,
            start: inner.start,
            current: inner.current,
            last_good: inner.last_good,
            release_reads: inner.release_reads,
            swipe_detected: self.last_event.is_some(),
            swipe_dir: self.last_event.map(|event| event.direction),
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.machine.inner().phase
    }

    pub fn swipe_detected(&self) -> bool {
        self.last_event.is_some()
    }

    pub fn swipe_dir(&self) -> Option<SwipeDirection> {
        self.last_event.map(|event| event.direction)
    }
}

/// Classifies the net displacement of a finished drag.
///
/// Ties between the axes resolve to the vertical direction.
pub fn compute_swipe_dir(start: Point, end: Point, min_swipe_length: i32) -> Option<SwipeDirection> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let abs_x = dx.abs();
    let abs_y = dy.abs();

    if abs_x < min_swipe_length && abs_y < min_swipe_length {
        return None;
    }

    if abs_x > abs_y {
        Some(if dx < 0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    } else {
        Some(if dy < 0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        })
    }
}
