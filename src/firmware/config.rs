use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embedded_graphics::prelude::{Point, Size};

use super::types::PoseUpdate;

pub(crate) const I2C_FREQUENCY_KHZ: u32 = 400;
pub(crate) const I2C_TIMEOUT_MS: u64 = 20;

pub(crate) const STACK_CAPACITY: usize = 12;
pub(crate) const STACK_BASE: Point = Point::new(120, 132);
/// Bottom layer first.
pub(crate) const STACK_LAYERS: [Size; 8] = [
    Size::new(64, 64),
    Size::new(64, 64),
    Size::new(64, 64),
    Size::new(60, 60),
    Size::new(60, 60),
    Size::new(56, 56),
    Size::new(48, 48),
    Size::new(40, 40),
];

pub(crate) const WAKE_HOLD_MS: u64 = 800;

pub(crate) static POSE_UPDATES: Channel<CriticalSectionRawMutex, PoseUpdate, 64> = Channel::new();
