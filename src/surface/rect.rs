//! Rect: Axis-aligned pixel rectangles and surface sizes.

/// Pixel dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Get the area (number of pixels).
    #[inline]
    pub const fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A half-open rectangle `[x0, x1) x [y0, y1)` in pixel coordinates.
///
/// Coordinates are signed: figures near the canvas edge produce
/// rectangles that extend past it, and surfaces clip on fill.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl Rect {
    /// Create a rectangle from two arbitrary corners.
    ///
    /// The corners are swapped as needed so that `x0 <= x1` and `y0 <= y1`.
    #[inline]
    pub const fn from_corners(xa: i32, ya: i32, xb: i32, yb: i32) -> Self {
        let (x0, x1) = if xa <= xb { (xa, xb) } else { (xb, xa) };
        let (y0, y1) = if ya <= yb { (ya, yb) } else { (yb, ya) };
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle covering a whole surface of the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: clamp_dim(size.width),
            y1: clamp_dim(size.height),
        }
    }

    /// Check if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Intersection with another rectangle (empty if disjoint).
    #[inline]
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1).max(x0);
        let y1 = self.y1.min(other.y1).max(y0);
        Self { x0, y0, x1, y1 }
    }
}

const fn clamp_dim(v: u32) -> i32 {
    if v > i32::MAX as u32 {
        i32::MAX
    } else {
        v as i32
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {})-({}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}
