use embedded_graphics::prelude::Point;

use crate::{
    animation::{Kinematics, Repeat},
    dispatch::{Binding, SwipeMapping},
    touch::{bounds::Region, sampler::PanelExtent},
};

#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    pub region: Region,
    pub min_length: i32,
    pub outlier_jump_px: i32,
    pub release_confirm_reads: u8,
}

#[derive(Clone, Copy, Debug)]
pub struct TapConfig {
    pub region: Region,
    pub binding: Binding,
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub repeat: Repeat,
}

#[derive(Clone, Copy, Debug)]
pub struct PollingConfig {
    pub hold_interval_ms: u64,
    pub loop_interval_ms: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    pub panel: PanelExtent,
    pub swipe: SwipeConfig,
    pub bindings: SwipeMapping,
    pub tap: TapConfig,
    pub animation: AnimationConfig,
    pub polling: PollingConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureConfig {
    &GESTURE_CONFIG
}
