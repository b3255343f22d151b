use embedded_graphics::prelude::Point;
use stackpet::SpriteSurface;

use super::config::POSE_UPDATES;

/// Layer handle understood by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SpriteId(pub(crate) u8);

#[derive(Clone, Copy, Debug)]
pub(crate) enum PoseChange {
    Rotation(i32),
    Pivot(Point),
    Position(Point),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PoseUpdate {
    pub(crate) sprite: SpriteId,
    pub(crate) change: PoseChange,
}

/// Forwards layer poses to the renderer. Updates are dropped while the renderer lags;
/// the next tick carries a fresh pose anyway.
#[derive(Default)]
pub(crate) struct ChannelSurface {
    pub(crate) dropped: u32,
}

impl ChannelSurface {
    fn push(&mut self, sprite: SpriteId, change: PoseChange) {
        if POSE_UPDATES.try_send(PoseUpdate { sprite, change }).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

impl SpriteSurface<SpriteId> for ChannelSurface {
    fn set_rotation(&mut self, target: SpriteId, tenths_of_degree: i32) {
        self.push(target, PoseChange::Rotation(tenths_of_degree));
    }

    fn set_pivot(&mut self, target: SpriteId, pivot: Point) {
        self.push(target, PoseChange::Pivot(pivot));
    }

    fn set_position(&mut self, target: SpriteId, position: Point) {
        self.push(target, PoseChange::Position(position));
    }
}
