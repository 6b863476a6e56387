//! Terminal output: Presenting surfaces on a true-color terminal.
//!
//! - [`OutputBuffer`]: accumulates a frame and flushes it in one write
//! - [`TerminalPresenter`]: samples a [`Pixmap`](crate::surface::Pixmap)
//!   down to half-block cells
//! - [`TerminalSession`]: alternate-screen guard

mod output;
mod presenter;

pub use output::OutputBuffer;
pub use presenter::{TerminalPresenter, TerminalSession};
