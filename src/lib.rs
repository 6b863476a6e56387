//! # Painter
//!
//! A script-driven canvas painter with a double-buffered execution loop.
//!
//! Scripts describe canvas edits line by line. The [`Interpreter`] compiles
//! them into a [`Batch`] of [`Operation`]s in a fixed category order, and
//! the [`EventLoop`] applies posted operations on a dedicated worker,
//! presenting and swapping surfaces when a batch asks for it.
//!
//! ## Core Concepts
//!
//! - **Operation compiler**: backgrounds, rectangles, moves, figures and
//!   present requests are reordered so moves run before any figure draws
//! - **Shared figures**: moves translate figures in place through an arena,
//!   bound to the figures that existed when the move was written
//! - **Single consumer**: one worker drains a blocking FIFO in push order
//! - **Double buffering**: presenting swaps surfaces instead of copying
//!
//! ## Example
//!
//! ```rust
//! use painter::{EventLoop, Interpreter, LoopConfig, Pixmap, PixmapFactory};
//!
//! let receiver = |frame: &Pixmap| println!("presented {:?}", frame.size());
//! let event_loop = EventLoop::start(LoopConfig::default(), &PixmapFactory, receiver).unwrap();
//!
//! let mut interpreter = Interpreter::new();
//! let batch = interpreter.parse("green\nfigure 0.5 0.5\nmove 0.1 0.1\nupdate").unwrap();
//! event_loop.post_batch(batch);
//!
//! let stats = event_loop.stop();
//! assert_eq!(stats.presented, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod lang;
pub mod op;
pub mod surface;
pub mod terminal;

// Re-exports for convenience
pub use actor::{BlockingQueue, ChannelReceiver, EventLoop, LoopConfig, LoopState, LoopStats, Poster, Receiver};
pub use lang::{Interpreter, InterpreterConfig, ParseError};
pub use op::{Batch, Figure, FigureArena, Move, Operation};
pub use surface::{Pixmap, PixmapFactory, Rect, Rgb, Size, Surface, SurfaceFactory};
pub use terminal::{TerminalPresenter, TerminalSession};
