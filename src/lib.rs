#![no_std]

#[cfg(test)]
extern crate std;

pub mod animation;
pub mod config;
pub mod dispatch;
pub mod touch;

pub use animation::{
    AngleAccumulator, AnimationScheduler, AnimationStack, AnimationTiming, Kinematics, LayerJob,
    Pose, Repeat, SpriteLayer, SpriteSurface, Timeline,
};
pub use dispatch::{Binding, GestureDispatcher, SwipeMapping};
pub use touch::{
    bounds::Region,
    press::{hold_to_confirm, wait_for_release, PollClock, PressOutcome, PressTimer},
    sampler::{Clamped, PanelExtent, TouchSampler},
    swipe::{compute_swipe_dir, SwipeDetector, SwipeEvent, SwipePhase, SwipeTracker},
    types::SwipeDirection,
};
