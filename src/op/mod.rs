//! Operation model: The closed set of edits applied to a surface.
//!
//! Every [`Operation`] exposes [`Operation::apply`], which draws onto a
//! surface and reports whether the surface is now ready to present.
//!
//! - [`Operation::Fill`]: whole-surface solid fill
//! - [`Operation::BackgroundRect`]: black rectangle overlay
//! - [`Operation::Figure`]: draw a shared figure at its current position
//! - [`Operation::Move`]: translate figures in place, no drawing
//! - [`Operation::Present`]: no drawing, signals present-ready
//! - [`Operation::Batch`]: ordered group, present-ready if any member is

mod figure;

pub use figure::{Figure, FigureArena, FigureHandle, FigureId, Move};

use crate::surface::{Rect, Rgb, Surface};

/// Color of [`Operation::BackgroundRect`].
pub const BACKGROUND_RECT_COLOR: Rgb = Rgb::BLACK;

/// A single edit of the in-progress surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Fill the entire surface with a color.
    Fill(Rgb),

    /// Fill a rectangle with [`BACKGROUND_RECT_COLOR`].
    BackgroundRect(Rect),

    /// Draw a figure at its current position.
    Figure(FigureHandle),

    /// Translate figures in place.
    Move(Move),

    /// Signal that the surface is ready to present.
    Present,

    /// An ordered group of operations.
    Batch(Batch),
}

impl Operation {
    /// Apply the operation to `surface`.
    ///
    /// Returns `true` if the surface should now be presented.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        match self {
            Self::Fill(color) => {
                let bounds = surface.bounds();
                surface.fill(bounds, *color);
                false
            }
            Self::BackgroundRect(rect) => {
                surface.fill(*rect, BACKGROUND_RECT_COLOR);
                false
            }
            Self::Figure(handle) => {
                handle.draw(surface);
                false
            }
            Self::Move(mv) => {
                mv.apply();
                false
            }
            Self::Present => true,
            Self::Batch(batch) => batch.apply(surface),
        }
    }

    /// Short name of the variant, used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fill(_) => "fill",
            Self::BackgroundRect(_) => "bgrect",
            Self::Figure(_) => "figure",
            Self::Move(_) => "move",
            Self::Present => "present",
            Self::Batch(_) => "batch",
        }
    }
}

impl From<Batch> for Operation {
    fn from(batch: Batch) -> Self {
        Self::Batch(batch)
    }
}

/// An ordered sequence of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    ops: Vec<Operation>,
}

impl Batch {
    /// Create an empty batch.
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Append an operation.
    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    /// Number of top-level operations.
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the batch holds no operations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the operations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.ops.iter()
    }

    /// The operations as a slice.
    pub fn as_slice(&self) -> &[Operation] {
        &self.ops
    }

    /// Apply every operation in order.
    ///
    /// All members are applied even after one reports present-ready.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        self.ops
            .iter()
            .fold(false, |ready, op| op.apply(surface) || ready)
    }

    /// Check if applying the batch would request a present.
    pub fn presents(&self) -> bool {
        self.ops.iter().any(|op| match op {
            Operation::Present => true,
            Operation::Batch(inner) => inner.presents(),
            _ => false,
        })
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<Operation> {
        self.ops
    }
}

impl From<Vec<Operation>> for Batch {
    fn from(ops: Vec<Operation>) -> Self {
        Self { ops }
    }
}

impl FromIterator<Operation> for Batch {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Batch {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Pixmap, Size};

    /// Surface that records fills instead of drawing them.
    #[derive(Default)]
    struct Recorder {
        fills: Vec<(Rect, Rgb)>,
    }

    impl Surface for Recorder {
        fn bounds(&self) -> Rect {
            Rect::from_corners(0, 0, 800, 800)
        }

        fn fill(&mut self, rect: Rect, color: Rgb) {
            self.fills.push((rect, color));
        }
    }

    #[test]
    fn test_fill_covers_bounds() {
        let mut surface = Recorder::default();
        assert!(!Operation::Fill(Rgb::WHITE).apply(&mut surface));
        assert_eq!(surface.fills, vec![(surface.bounds(), Rgb::WHITE)]);
    }

    #[test]
    fn test_background_rect_is_black() {
        let mut surface = Recorder::default();
        let rect = Rect::from_corners(40, 40, 360, 360);
        assert!(!Operation::BackgroundRect(rect).apply(&mut surface));
        assert_eq!(surface.fills, vec![(rect, Rgb::BLACK)]);
    }

    #[test]
    fn test_present_draws_nothing() {
        let mut surface = Recorder::default();
        assert!(Operation::Present.apply(&mut surface));
        assert!(surface.fills.is_empty());
    }

    #[test]
    fn test_batch_applies_all_members() {
        let mut surface = Recorder::default();
        let batch: Batch = vec![
            Operation::Fill(Rgb::WHITE),
            Operation::Present,
            Operation::Fill(Rgb::GREEN),
        ]
        .into();

        assert!(batch.presents());
        assert!(Operation::Batch(batch).apply(&mut surface));
        // The fill after Present still runs.
        assert_eq!(surface.fills.len(), 2);
        assert_eq!(surface.fills[1].1, Rgb::GREEN);
    }

    #[test]
    fn test_nested_batch_presents() {
        let inner: Batch = vec![Operation::Present].into();
        let outer: Batch = vec![Operation::Fill(Rgb::WHITE), inner.into()].into();
        assert!(outer.presents());
        assert!(!Batch::new().presents());
    }

    #[test]
    fn test_move_then_draw() {
        let arena = FigureArena::new();
        let id = arena.insert(Figure::new(200, 200, Rgb::RED));
        let batch: Batch = vec![
            Operation::Move(Move::new(40, 40, arena.clone(), &[id])),
            Operation::Figure(FigureHandle::new(arena.clone(), id)),
        ]
        .into();

        let mut pixmap = Pixmap::new(Size::new(800, 800));
        assert!(!batch.apply(&mut pixmap));
        assert_eq!(arena.get(id).map(|f| (f.x, f.y)), Some((240, 240)));
        assert_eq!(pixmap.pixel(240, 300), Some(Rgb::RED));
        // The pre-move position was never drawn.
        assert_eq!(pixmap.pixel(200, 265), Some(Rgb::BLACK));
    }
}
