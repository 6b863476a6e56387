//! Pixmap: A grid of pixels used as the default surface backend.
//!
//! Pixels are stored in row-major order in one contiguous allocation.

use super::{Rect, Rgb, Size, Surface, SurfaceFactory};

/// An in-memory RGB surface.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    /// Contiguous pixel storage (row-major order).
    pixels: Vec<Rgb>,
    /// Dimensions in pixels.
    size: Size,
}

impl Pixmap {
    /// Create a new pixmap with every pixel black.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(size: Size) -> Self {
        assert!(!size.is_empty(), "Pixmap dimensions must be non-zero");
        Self {
            pixels: vec![Rgb::BLACK; size.area()],
            size,
        }
    }

    /// Get the pixmap dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Get a reference to the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some((y as usize) * (self.size.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Read the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.size.width as usize)
    }

    /// Count the pixels equal to `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}

impl Surface for Pixmap {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    fn fill(&mut self, rect: Rect, color: Rgb) {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return;
        }
        let width = self.size.width as usize;
        // Clipped against bounds, so every edge is non-negative.
        let (x0, x1) = (clipped.x0.unsigned_abs() as usize, clipped.x1.unsigned_abs() as usize);
        for row in clipped.y0.unsigned_abs()..clipped.y1.unsigned_abs() {
            let start = row as usize * width;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}

/// Factory producing black [`Pixmap`] surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixmapFactory;

impl SurfaceFactory for PixmapFactory {
    type Surface = Pixmap;

    fn new_surface(&self, size: Size) -> Pixmap {
        Pixmap::new(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixmap_new() {
        let pixmap = Pixmap::new(Size::new(80, 24));
        assert_eq!(pixmap.size(), Size::new(80, 24));
        assert_eq!(pixmap.pixels().len(), 80 * 24);
        assert_eq!(pixmap.count(Rgb::BLACK), 80 * 24);
    }

    #[test]
    #[should_panic]
    fn test_pixmap_zero_width() {
        let _ = Pixmap::new(Size::new(0, 24));
    }

    #[test]
    fn test_pixmap_fill_rect() {
        let mut pixmap = Pixmap::new(Size::new(80, 24));
        pixmap.fill(Rect::from_corners(10, 5, 13, 7), Rgb::WHITE);

        assert_eq!(pixmap.pixel(10, 5), Some(Rgb::WHITE));
        assert_eq!(pixmap.pixel(12, 6), Some(Rgb::WHITE));
        assert_eq!(pixmap.pixel(13, 6), Some(Rgb::BLACK)); // Right edge is exclusive
        assert_eq!(pixmap.pixel(9, 5), Some(Rgb::BLACK));
        assert_eq!(pixmap.count(Rgb::WHITE), 3 * 2);
    }

    #[test]
    fn test_pixmap_fill_clips() {
        let mut pixmap = Pixmap::new(Size::new(10, 10));
        pixmap.fill(Rect::from_corners(-5, -5, 3, 3), Rgb::GREEN);
        assert_eq!(pixmap.count(Rgb::GREEN), 9);

        pixmap.fill(Rect::from_corners(50, 50, 60, 60), Rgb::RED);
        assert_eq!(pixmap.count(Rgb::RED), 0);
    }

    #[test]
    fn test_pixmap_bounds() {
        let pixmap = Pixmap::new(Size::new(80, 24));
        assert!(pixmap.pixel(79, 23).is_some());
        assert!(pixmap.pixel(80, 23).is_none());
        assert!(pixmap.pixel(79, 24).is_none());
        assert_eq!(pixmap.bounds(), Rect::from_corners(0, 0, 80, 24));
    }

    #[test]
    fn test_factory_closure() {
        let factory = |size: Size| Pixmap::new(size);
        let surface = factory.new_surface(Size::new(4, 4));
        assert_eq!(surface.size(), Size::new(4, 4));
        assert_eq!(PixmapFactory.new_surface(Size::new(2, 3)).size(), Size::new(2, 3));
    }
}
