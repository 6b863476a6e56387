//! Surface module: The drawable targets operations are applied to.
//!
//! This module contains:
//! - [`Surface`]: The write-only fill primitive the core draws through
//! - [`SurfaceFactory`]: Allocates surfaces for the execution loop
//! - [`Pixmap`]: An in-memory RGB surface backend
//! - [`Rgb`], [`Rect`], [`Size`]: Colors and pixel geometry
//!
//! The core never reads pixels back; readback on [`Pixmap`] exists for
//! receivers and tests.

mod color;
mod pixmap;
mod rect;

pub use color::Rgb;
pub use pixmap::{Pixmap, PixmapFactory};
pub use rect::{Rect, Size};

/// A drawable target exposing only a solid fill.
pub trait Surface {
    /// The full extent of the surface.
    fn bounds(&self) -> Rect;

    /// Fill `rect` with `color`, clipped to [`Surface::bounds`].
    fn fill(&mut self, rect: Rect, color: Rgb);
}

/// Allocates surfaces of a requested size.
///
/// Any `Fn(Size) -> S` closure is a factory.
pub trait SurfaceFactory {
    /// The surface type produced.
    type Surface: Surface;

    /// Allocate a new surface.
    fn new_surface(&self, size: Size) -> Self::Surface;
}

impl<F, S> SurfaceFactory for F
where
    F: Fn(Size) -> S,
    S: Surface,
{
    type Surface = S;

    fn new_surface(&self, size: Size) -> S {
        self(size)
    }
}
