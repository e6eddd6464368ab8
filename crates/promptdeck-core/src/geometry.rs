#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are abstract screen units supplied by whatever host surface
//! is rendering (browser pixels, terminal cells). Floating point so that
//! centering math does not lose half-unit offsets.

/// An axis-aligned rectangle, origin at top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in units.
    pub width: f32,
    /// Height in units.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Grow the rectangle by `pad` units on every side.
    ///
    /// Width and height never go negative when `pad` is negative.
    pub fn inflate(&self, pad: f32) -> Self {
        Self {
            x: self.x - pad,
            y: self.y - pad,
            width: (self.width + pad * 2.0).max(0.0),
            height: (self.height + pad * 2.0).max(0.0),
        }
    }

    /// Whether a point lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A viewport size in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in units.
    pub width: f32,
    /// Height in units.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn inflate_grows_every_side() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(8.0);
        assert_eq!(r, Rect::new(2.0, 2.0, 36.0, 36.0));
    }

    #[test]
    fn inflate_negative_clamps_to_zero_size() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0).inflate(-10.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.9, 9.9));
        assert!(!r.contains(10.0, 5.0));
        assert!(!r.contains(5.0, 10.0));
    }
}
