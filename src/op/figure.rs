//! Figures: Shared, mutable glyph records and the moves that translate them.
//!
//! Figures live in a [`FigureArena`]. Draw operations and moves refer to
//! them by [`FigureId`], so a move mutates the very record a later draw
//! reads. A [`Move`] captures the ids that existed when it was created;
//! figures inserted afterwards are never touched by it.

use crate::surface::{Rect, Rgb, Surface};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Half-width of the glyph's horizontal bar.
const BAR_HALF_WIDTH: i32 = 75;
/// Half-width of the glyph's vertical stem.
const STEM_HALF_WIDTH: i32 = 30;
/// Vertical reach of the glyph above and below its center.
const HALF_HEIGHT: i32 = 70;

/// A fixed-shape glyph positioned by its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    /// Center X in pixels.
    pub x: i32,
    /// Center Y in pixels.
    pub y: i32,
    /// Fill color.
    pub color: Rgb,
}

impl Figure {
    /// Create a figure centered at (x, y).
    #[inline]
    pub const fn new(x: i32, y: i32, color: Rgb) -> Self {
        Self { x, y, color }
    }

    /// The two rectangles making up the glyph: bar, then stem.
    ///
    /// Edges saturate at the `i32` range, so a figure parked far off the
    /// canvas still yields valid (clipped-away) rectangles.
    pub const fn rects(&self) -> [Rect; 2] {
        let (x, y) = (self.x, self.y);
        let top = y.saturating_sub(HALF_HEIGHT);
        [
            Rect::from_corners(
                x.saturating_sub(BAR_HALF_WIDTH),
                y,
                x.saturating_add(BAR_HALF_WIDTH),
                top,
            ),
            Rect::from_corners(
                x.saturating_sub(STEM_HALF_WIDTH),
                top,
                x.saturating_add(STEM_HALF_WIDTH),
                y.saturating_add(HALF_HEIGHT),
            ),
        ]
    }

    /// Draw the glyph onto a surface.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for rect in self.rects() {
            surface.fill(rect, self.color);
        }
    }
}

/// Index of a figure inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FigureId(usize);

impl FigureId {
    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Growable, shared storage for figures.
///
/// Cloning the arena clones the handle, not the figures: every clone sees
/// the same records. A fresh arena is started on interpreter reset so that
/// operations already in flight keep their own records alive.
#[derive(Clone, Default)]
pub struct FigureArena {
    figures: Arc<Mutex<Vec<Figure>>>,
}

impl FigureArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Figure>> {
        // Every write leaves the vector consistent.
        self.figures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a figure, returning its id.
    pub fn insert(&self, figure: Figure) -> FigureId {
        let mut figures = self.lock();
        figures.push(figure);
        FigureId(figures.len() - 1)
    }

    /// Read a figure by id.
    pub fn get(&self, id: FigureId) -> Option<Figure> {
        self.lock().get(id.0).copied()
    }

    /// Translate every listed figure in place.
    pub fn translate(&self, ids: &[FigureId], dx: i32, dy: i32) {
        let mut figures = self.lock();
        for id in ids {
            if let Some(figure) = figures.get_mut(id.0) {
                figure.x = figure.x.saturating_add(dx);
                figure.y = figure.y.saturating_add(dy);
            }
        }
    }

    /// Number of figures stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no figure has been stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Check whether two handles refer to the same storage.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.figures, &other.figures)
    }
}

impl std::fmt::Debug for FigureArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigureArena").field("len", &self.len()).finish()
    }
}

/// A reference to one figure in an arena.
#[derive(Clone)]
pub struct FigureHandle {
    arena: FigureArena,
    id: FigureId,
}

impl FigureHandle {
    /// Create a handle to `id` in `arena`.
    pub const fn new(arena: FigureArena, id: FigureId) -> Self {
        Self { arena, id }
    }

    /// The referenced id.
    #[inline]
    pub const fn id(&self) -> FigureId {
        self.id
    }

    /// Current state of the figure.
    pub fn get(&self) -> Option<Figure> {
        self.arena.get(self.id)
    }

    /// Draw the figure at its current position.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(figure) = self.get() {
            figure.draw(surface);
        }
    }
}

impl PartialEq for FigureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.arena.same_as(&other.arena)
    }
}

impl std::fmt::Debug for FigureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigureHandle")
            .field("id", &self.id)
            .field("figure", &self.get())
            .finish()
    }
}

/// Translation of a fixed set of figures.
#[derive(Clone)]
pub struct Move {
    /// Offset along X in pixels.
    pub dx: i32,
    /// Offset along Y in pixels.
    pub dy: i32,
    arena: FigureArena,
    targets: Vec<FigureId>,
}

impl Move {
    /// Create a move over a snapshot of `targets`.
    pub fn new(dx: i32, dy: i32, arena: FigureArena, targets: &[FigureId]) -> Self {
        Self {
            dx,
            dy,
            arena,
            targets: targets.to_vec(),
        }
    }

    /// The figures this move translates.
    pub fn targets(&self) -> &[FigureId] {
        &self.targets
    }

    /// Shift every target by (dx, dy).
    pub fn apply(&self) {
        self.arena.translate(&self.targets, self.dx, self.dy);
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.dx == other.dx
            && self.dy == other.dy
            && self.targets == other.targets
            && self.arena.same_as(&other.arena)
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Move")
            .field("dx", &self.dx)
            .field("dy", &self.dy)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Pixmap, Size};

    #[test]
    fn test_figure_rects() {
        let [bar, stem] = Figure::new(200, 200, Rgb::RED).rects();
        assert_eq!(bar, Rect::from_corners(125, 130, 275, 200));
        assert_eq!(stem, Rect::from_corners(170, 130, 230, 270));
    }

    #[test]
    fn test_figure_draw() {
        let mut pixmap = Pixmap::new(Size::new(400, 400));
        Figure::new(200, 200, Rgb::RED).draw(&mut pixmap);

        assert_eq!(pixmap.pixel(200, 200), Some(Rgb::RED)); // Stem
        assert_eq!(pixmap.pixel(130, 150), Some(Rgb::RED)); // Bar
        assert_eq!(pixmap.pixel(130, 250), Some(Rgb::BLACK)); // Beside the stem
    }

    #[test]
    fn test_figure_at_integer_extremes() {
        let mut pixmap = Pixmap::new(Size::new(100, 100));
        for (x, y) in [(i32::MAX, 50), (i32::MIN, 50), (50, i32::MAX), (i32::MIN, i32::MIN)] {
            let figure = Figure::new(x, y, Rgb::RED);
            for rect in figure.rects() {
                assert!(rect.x0 <= rect.x1 && rect.y0 <= rect.y1);
            }
            figure.draw(&mut pixmap);
        }
        // Every glyph lies entirely off the canvas.
        assert_eq!(pixmap.count(Rgb::RED), 0);
    }

    #[test]
    fn test_translate_saturates() {
        let arena = FigureArena::new();
        let id = arena.insert(Figure::new(200, -200, Rgb::RED));
        arena.translate(&[id], i32::MAX, i32::MIN);
        assert_eq!(arena.get(id), Some(Figure::new(i32::MAX, i32::MIN, Rgb::RED)));
    }

    #[test]
    fn test_arena_shared_between_clones() {
        let arena = FigureArena::new();
        let id = arena.insert(Figure::new(1, 2, Rgb::RED));
        let clone = arena.clone();

        clone.translate(&[id], 10, 20);
        assert_eq!(arena.get(id), Some(Figure::new(11, 22, Rgb::RED)));
        assert!(arena.same_as(&clone));
        assert!(!arena.same_as(&FigureArena::new()));
    }

    #[test]
    fn test_move_is_a_snapshot() {
        let arena = FigureArena::new();
        let first = arena.insert(Figure::new(0, 0, Rgb::RED));
        let mv = Move::new(5, 5, arena.clone(), &[first]);
        let second = arena.insert(Figure::new(0, 0, Rgb::RED));

        mv.apply();
        assert_eq!(arena.get(first).map(|f| (f.x, f.y)), Some((5, 5)));
        assert_eq!(arena.get(second).map(|f| (f.x, f.y)), Some((0, 0)));
    }

    #[test]
    fn test_handle_equality() {
        let arena = FigureArena::new();
        let id = arena.insert(Figure::new(0, 0, Rgb::RED));
        let a = FigureHandle::new(arena.clone(), id);
        let b = FigureHandle::new(arena, id);
        let other = FigureHandle::new(FigureArena::new(), id);
        assert_eq!(a, b);
        assert_ne!(a, other);
    }
}
