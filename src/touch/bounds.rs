use embedded_graphics::prelude::Point;

/// Touch-sensitive area, supplied by the caller on every check.
///
/// Rectangle bounds are inclusive on all four edges, circle bounds include the rim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Rect {
        x_min: i32,
        x_max: i32,
        y_min: i32,
        y_max: i32,
    },
    Circle {
        center: Point,
        radius: i32,
    },
}

impl Region {
    pub const fn rect(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self::Rect {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub const fn centered(center: Point, half_width: i32, half_height: i32) -> Self {
        Self::Rect {
            x_min: center.x - half_width,
            x_max: center.x + half_width,
            y_min: center.y - half_height,
            y_max: center.y + half_height,
        }
    }

    pub const fn circle(center: Point, radius: i32) -> Self {
        Self::Circle { center, radius }
    }

    pub fn contains(&self, point: Point) -> bool {
        match *self {
            Self::Rect {
                x_min,
                x_max,
                y_min,
                y_max,
            } => is_within_square_bounds(point, x_min, x_max, y_min, y_max),
            Self::Circle { center, radius } => is_within_circle_bounds(point, center, radius),
        }
    }
}

pub fn is_within_square_bounds(point: Point, x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> bool {
    (x_min..=x_max).contains(&point.x) && (y_min..=y_max).contains(&point.y)
}

pub fn is_within_square_bounds_center(
    point: Point,
    center: Point,
    half_width: i32,
    half_height: i32,
) -> bool {
    Region::centered(center, half_width, half_height).contains(point)
}

pub fn is_within_circle_bounds(point: Point, center: Point, radius: i32) -> bool {
    let dx = i64::from(point.x) - i64::from(center.x);
    let dy = i64::from(point.y) - i64::from(center.y);
    let radius = i64::from(radius);
    dx * dx + dy * dy <= radius * radius
}
