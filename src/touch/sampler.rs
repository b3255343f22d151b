use embedded_graphics::prelude::{Point, Size};

/// Single-contact touch source. `None` means no contact at this instant.
pub trait TouchSampler {
    fn poll(&mut self) -> Option<Point>;
}

impl<T: TouchSampler + ?Sized> TouchSampler for &mut T {
    fn poll(&mut self) -> Option<Point> {
        (**self).poll()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelExtent {
    pub max_x: i32,
    pub max_y: i32,
}

impl PanelExtent {
    pub const fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }

    pub const fn from_size(size: Size) -> Self {
        Self {
            max_x: size.width as i32,
            max_y: size.height as i32,
        }
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0, self.max_x), point.y.clamp(0, self.max_y))
    }
}

/// Clamps raw controller coordinates into the panel instead of rejecting them.
///
/// The controller occasionally reports coordinates just past the edge while a
/// finger rests on the bezel; those still count as contact.
pub struct Clamped<S> {
    inner: S,
    extent: PanelExtent,
}

impl<S: TouchSampler> Clamped<S> {
    pub fn new(inner: S, extent: PanelExtent) -> Self {
        Self { inner, extent }
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

impl<S: TouchSampler> TouchSampler for Clamped<S> {
    fn poll(&mut self) -> Option<Point> {
        self.inner.poll().map(|point| self.extent.clamp(point))
    }
}
