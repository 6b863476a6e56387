//! Interpreter: Compiles script text into an ordered batch of operations.
//!
//! Commands accumulate into a session; at the end of each pass the session
//! is flattened in a fixed category order, regardless of script order:
//!
//! ```text
//! background fill -> background rect -> moves -> figures -> present
//! ```
//!
//! Moves run before any figure is drawn, so a figure that is created and
//! then moved is drawn once, at its final position.

use super::command::{Background, Command};
use super::error::ParseResult;
use crate::op::{Batch, FigureArena, FigureHandle, FigureId, Move, Operation};
use crate::surface::{Rect, Rgb};
use std::io::BufRead;
use tracing::{debug, trace};

/// Normalized-to-pixel scale applied to script coordinates.
///
/// Independent of the surface size, so scripts stay resolution-agnostic.
pub const CANVAS_UNIT: f64 = 400.0;

/// Accent color of figures created by `figure`.
pub const FIGURE_COLOR: Rgb = Rgb::RED;

/// Configuration for the [`Interpreter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpreterConfig {
    /// Scale from normalized script coordinates to pixels.
    pub canvas_unit: f64,
    /// Color of new figures.
    pub figure_color: Rgb,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            canvas_unit: CANVAS_UNIT,
            figure_color: FIGURE_COLOR,
        }
    }
}

/// State accumulated across the lines of a script.
#[derive(Debug, Default)]
struct Session {
    /// Last-wins background fill.
    background: Option<Background>,
    /// Last-wins rectangle overlay.
    background_rect: Option<Rect>,
    /// Storage shared with every emitted figure and move.
    arena: FigureArena,
    /// Figures created this session, in creation order.
    figures: Vec<FigureId>,
    /// Moves not yet emitted, each bound to a snapshot of `figures`.
    pending_moves: Vec<Move>,
    /// Set by `update`, cleared at the start of each pass.
    present_requested: bool,
}

impl Session {
    /// Nothing has been accumulated (the present flag aside).
    fn is_untouched(&self) -> bool {
        self.background.is_none()
            && self.background_rect.is_none()
            && self.figures.is_empty()
            && self.pending_moves.is_empty()
    }

    /// The only request is to present over the default background.
    fn is_bare_present(&self) -> bool {
        self.present_requested
            && self.background == Some(Background::Reset)
            && self.background_rect.is_none()
            && self.figures.is_empty()
            && self.pending_moves.is_empty()
    }
}

/// Turns script text into batches of [`Operation`]s.
///
/// Session state carries over between [`Interpreter::parse`] calls until a
/// `reset` command (or [`Interpreter::reset`]) clears it.
#[derive(Debug, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
    session: Session,
}

impl Interpreter {
    /// Create an interpreter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with a custom configuration.
    pub fn with_config(config: InterpreterConfig) -> Self {
        Self {
            config,
            session: Session::default(),
        }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Number of figures in the current session.
    pub fn figure_count(&self) -> usize {
        self.session.figures.len()
    }

    /// Discard all session state, as the `reset` command does.
    pub fn reset(&mut self) {
        self.session = Session {
            background: Some(Background::Reset),
            ..Session::default()
        };
    }

    /// Parse a script and return the batch it describes.
    ///
    /// On error nothing is applied to the session and no batch is returned.
    #[tracing::instrument(skip_all, fields(bytes = script.len()))]
    pub fn parse(&mut self, script: &str) -> ParseResult<Batch> {
        let commands = script
            .lines()
            .enumerate()
            .filter_map(|(i, text)| Command::parse_line(text, i + 1).transpose())
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(self.run(commands))
    }

    /// Parse a script read line by line from `reader`.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> ParseResult<Batch> {
        let mut commands = Vec::new();
        for (i, text) in reader.lines().enumerate() {
            if let Some(command) = Command::parse_line(&text?, i + 1)? {
                commands.push(command);
            }
        }
        Ok(self.run(commands))
    }

    fn run(&mut self, commands: Vec<Command>) -> Batch {
        if self.session.is_untouched() {
            self.session.background = Some(Background::Reset);
        }
        self.session.present_requested = false;

        for command in commands {
            trace!(command = command.name(), "execute");
            self.execute(command);
        }

        let batch = self.assemble();
        debug!(ops = batch.len(), presents = batch.presents(), "script compiled");
        batch
    }

    fn execute(&mut self, command: Command) {
        let session = &mut self.session;
        match command {
            Command::Background(background) => session.background = Some(background),
            Command::Update => session.present_requested = true,
            Command::BgRect { x1, y1, x2, y2 } => {
                session.background_rect = Some(Rect::from_corners(
                    self.config.scale(x1),
                    self.config.scale(y1),
                    self.config.scale(x2),
                    self.config.scale(y2),
                ));
            }
            Command::Figure { x, y } => {
                let figure = crate::op::Figure::new(
                    self.config.scale(x),
                    self.config.scale(y),
                    self.config.figure_color,
                );
                let id = session.arena.insert(figure);
                session.figures.push(id);
            }
            Command::Move { dx, dy } => {
                let mv = Move::new(
                    self.config.scale(dx),
                    self.config.scale(dy),
                    session.arena.clone(),
                    &session.figures,
                );
                session.pending_moves.push(mv);
            }
            Command::Reset => self.reset(),
        }
    }

    /// Flatten the session into a batch. Pending moves are consumed.
    fn assemble(&mut self) -> Batch {
        let session = &mut self.session;
        if session.is_bare_present() {
            return vec![Operation::Present].into();
        }

        let mut batch = Batch::new();
        if let Some(background) = session.background {
            batch.push(Operation::Fill(background.color()));
        }
        if let Some(rect) = session.background_rect {
            batch.push(Operation::BackgroundRect(rect));
        }
        for mv in session.pending_moves.drain(..) {
            batch.push(Operation::Move(mv));
        }
        for &id in &session.figures {
            batch.push(Operation::Figure(FigureHandle::new(session.arena.clone(), id)));
        }
        if session.present_requested {
            batch.push(Operation::Present);
        }
        batch
    }
}

impl InterpreterConfig {
    /// Scale a normalized coordinate to a pixel, truncating toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale(&self, c: f64) -> i32 {
        (c * self.canvas_unit).trunc() as i32
    }
}
