//! Script language: Lexing and compiling canvas scripts.
//!
//! A script is UTF-8 text with one command per line:
//!
//! ```text
//! white                      fill the background white
//! green                      fill the background green
//! bgrect 0.1 0.1 0.9 0.9     black rectangle, normalized corners
//! figure 0.5 0.5             add a figure at a normalized center
//! move 0.1 0.1               move every figure created so far
//! update                     present when the batch is applied
//! reset                      drop all state, clear to black
//! ```
//!
//! # Example
//!
//! ```
//! use painter::lang::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! let batch = interpreter.parse("white\nfigure 0.5 0.5\nupdate").unwrap();
//! assert_eq!(batch.len(), 3);
//! assert!(batch.presents());
//! ```

mod command;
mod error;
mod interpreter;

pub use command::{Background, Command};
pub use error::{ParseError, ParseResult};
pub use interpreter::{Interpreter, InterpreterConfig, CANVAS_UNIT, FIGURE_COLOR};
