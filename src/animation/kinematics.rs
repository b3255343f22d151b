use core::fmt;

use embedded_graphics::prelude::Point;
use fixed::types::I16F16;

use super::stack::SpriteLayer;

pub type Fx = I16F16;

pub const ANGLE_UNITS_PER_TURN: i32 = 3600;

const FX_ONE: Fx = Fx::from_bits(1 << 16);
const FX_TWO: Fx = Fx::from_bits(2 << 16);
const FX_THREE: Fx = Fx::from_bits(3 << 16);
const FX_FOUR: Fx = Fx::from_bits(4 << 16);
const FX_SIX: Fx = Fx::from_bits(6 << 16);
const FX_TEN: Fx = Fx::from_bits(10 << 16);
const FX_20: Fx = Fx::from_bits(20 << 16);
const FX_42: Fx = Fx::from_bits(42 << 16);
const FX_72: Fx = Fx::from_bits(72 << 16);
const FX_HALF_PI: Fx = Fx::from_bits(102_944);

const ITEM_RISE_AMPLITUDE: Fx = FX_TEN;
const ITEM_LAYER_SPACING: Fx = FX_TWO;
const ITEM_LAYER_WAVE: Fx = FX_THREE;

/// Per-tick placement of one layer. `rotation` is in tenths of a degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pose {
    pub rotation: i32,
    pub pivot: Point,
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kinematics {
    /// Spin with a per-layer pivot wobble and a fixed per-layer lift.
    Pet,
    /// Spin while the whole stack bobs once per turn and layers spread apart mid-turn.
    Item,
    /// Plain spin with a one-pixel stagger per layer.
    Rotate,
}

impl Kinematics {
    pub const ALL: [Kinematics; 3] = [Self::Pet, Self::Item, Self::Rotate];

    pub fn pose<H>(self, angle_v: i32, layer: &SpriteLayer<H>) -> Pose {
        match self {
            Self::Pet => pet_pose(angle_v, layer),
            Self::Item => item_pose(angle_v, layer),
            Self::Rotate => rotate_pose(angle_v, layer),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::Item => "item",
            Self::Rotate => "rotate",
        }
    }
}

impl fmt::Display for Kinematics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn pet_pose<H>(angle_v: i32, layer: &SpriteLayer<H>) -> Pose {
    let (w, h) = image_extent(layer);
    let index = i32::from(layer.index);

    let wobble = sin_turn(angle_v, ANGLE_UNITS_PER_TURN) * Fx::saturating_from_num(index) / FX_FOUR;
    let pivot_offset_y = trunc_px(wobble);

    // base_y - (1 + 1.2 * index) * 2, kept in tenths of a pixel.
    let lift_tenths = 20 + 24 * index;
    let y = (layer.base.y * 10 - lift_tenths) / 10;

    Pose {
        rotation: angle_v,
        pivot: Point::new(w / 2, h / 2 - pivot_offset_y),
        position: Point::new(layer.base.x - w / 2, y),
    }
}

pub fn item_pose<H>(angle_v: i32, layer: &SpriteLayer<H>) -> Pose {
    let (w, h) = image_extent(layer);
    let index = Fx::saturating_from_num(layer.index);
    let wrapped = wrap_angle(angle_v);

    let rise = (sin_turn(wrapped, ANGLE_UNITS_PER_TURN) + FX_ONE) / FX_TWO * ITEM_RISE_AMPLITUDE;
    // sin(pi * f): half a sine period per turn, zero at both ends.
    let wave = sin_turn(wrapped, 2 * ANGLE_UNITS_PER_TURN);
    let layer_offset = index * ITEM_LAYER_SPACING + wave * ITEM_LAYER_WAVE * index;

    Pose {
        rotation: wrapped,
        pivot: Point::new(w / 2, h / 2),
        position: Point::new(
            layer.base.x - w / 2,
            layer.base.y - trunc_px(rise) - trunc_px(layer_offset),
        ),
    }
}

pub fn rotate_pose<H>(angle_v: i32, layer: &SpriteLayer<H>) -> Pose {
    let (w, h) = image_extent(layer);
    Pose {
        rotation: angle_v,
        pivot: Point::new(w / 2, h / 2),
        position: Point::new(layer.base.x - w / 2, layer.base.y - i32::from(layer.index)),
    }
}

#[inline]
pub fn wrap_angle(angle_v: i32) -> i32 {
    angle_v.rem_euclid(ANGLE_UNITS_PER_TURN)
}

/// `sin(2 * pi * numer / period)`, folded into the first quadrant before evaluation so
/// the result is exactly periodic in `period` and exact at the quarter points.
pub fn sin_turn(numer: i32, period: i32) -> Fx {
    let period = i64::from(period);
    let scaled = (i64::from(numer)).rem_euclid(period) * 4;
    let quadrant = scaled / period;
    let offset = scaled % period;
    let folded = if quadrant % 2 == 0 {
        offset
    } else {
        period - offset
    };
    let s = if folded == period {
        FX_ONE
    } else {
        sin_quadrant(Fx::from_bits(
            (folded * i64::from(FX_HALF_PI.to_bits()) / period) as i32,
        ))
    };
    if quadrant < 2 {
        s
    } else {
        -s
    }
}

#[inline]
fn sin_quadrant(x: Fx) -> Fx {
    // Taylor series through x^9 in Horner form.
    let x2 = x * x;
    let series = FX_ONE - x2 / FX_72;
    let series = FX_ONE - x2 / FX_42 * series;
    let series = FX_ONE - x2 / FX_20 * series;
    let series = FX_ONE - x2 / FX_SIX * series;
    (x * series).min(FX_ONE)
}

#[inline]
fn trunc_px(value: Fx) -> i32 {
    value.round_to_zero().to_num::<i32>()
}

#[inline]
fn image_extent<H>(layer: &SpriteLayer<H>) -> (i32, i32) {
    (
        layer.image.width.min(i32::MAX as u32) as i32,
        layer.image.height.min(i32::MAX as u32) as i32,
    )
}
