//! Command: One lexed script line.
//!
//! A line is split on whitespace; the first token names the command and
//! the rest are its arguments. Coordinates stay normalized here; scaling
//! to pixels happens when the interpreter applies the command.

use super::error::{ParseError, ParseResult};
use crate::surface::Rgb;

/// Whole-surface background selected by a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    /// Clear to black. Installed by `reset` and on a fresh session.
    Reset,
    /// `white`
    White,
    /// `green`
    Green,
}

impl Background {
    /// Fill color of the background.
    pub const fn color(self) -> Rgb {
        match self {
            Self::Reset => Rgb::BLACK,
            Self::White => Rgb::WHITE,
            Self::Green => Rgb::GREEN,
        }
    }
}

/// A parsed script command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `white` / `green`
    Background(Background),
    /// `update`
    Update,
    /// `bgrect x1 y1 x2 y2`
    BgRect {
        /// First corner X.
        x1: f64,
        /// First corner Y.
        y1: f64,
        /// Second corner X.
        x2: f64,
        /// Second corner Y.
        y2: f64,
    },
    /// `figure x y`
    Figure {
        /// Center X.
        x: f64,
        /// Center Y.
        y: f64,
    },
    /// `move dx dy`
    Move {
        /// Offset X.
        dx: f64,
        /// Offset Y.
        dy: f64,
    },
    /// `reset`
    Reset,
}

impl Command {
    /// Lex a single line.
    ///
    /// Returns `Ok(None)` for blank lines. `line` is the 1-based line
    /// number reported in errors.
    pub fn parse_line(text: &str, line: usize) -> ParseResult<Option<Self>> {
        let mut tokens = text.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match name {
            "white" => {
                expect_args::<0>(name, &args, line)?;
                Self::Background(Background::White)
            }
            "green" => {
                expect_args::<0>(name, &args, line)?;
                Self::Background(Background::Green)
            }
            "update" => {
                expect_args::<0>(name, &args, line)?;
                Self::Update
            }
            "reset" => {
                expect_args::<0>(name, &args, line)?;
                Self::Reset
            }
            "bgrect" => {
                let [x1, y1, x2, y2] = expect_args::<4>(name, &args, line)?;
                Self::BgRect { x1, y1, x2, y2 }
            }
            "figure" => {
                let [x, y] = expect_args::<2>(name, &args, line)?;
                Self::Figure { x, y }
            }
            "move" => {
                let [dx, dy] = expect_args::<2>(name, &args, line)?;
                Self::Move { dx, dy }
            }
            other => {
                return Err(ParseError::UnknownCommand {
                    line,
                    command: other.to_string(),
                })
            }
        };

        Ok(Some(command))
    }

    /// The script keyword for this command.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Background(Background::White) => "white",
            Self::Background(Background::Green) => "green",
            Self::Background(Background::Reset) | Self::Reset => "reset",
            Self::Update => "update",
            Self::BgRect { .. } => "bgrect",
            Self::Figure { .. } => "figure",
            Self::Move { .. } => "move",
        }
    }
}

/// Check the argument count and parse every argument as a finite float.
fn expect_args<const N: usize>(command: &str, args: &[&str], line: usize) -> ParseResult<[f64; N]> {
    let malformed = |invalid: Option<&str>| ParseError::MalformedArguments {
        line,
        command: command.to_string(),
        expected: N,
        actual: args.len(),
        invalid: invalid.map(str::to_string),
    };

    if args.len() != N {
        return Err(malformed(None));
    }

    let mut values = [0.0; N];
    for (slot, token) in values.iter_mut().zip(args) {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(Some(*token)))?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> ParseResult<Option<Command>> {
        Command::parse_line(text, 1)
    }

    #[test]
    fn test_blank_lines() {
        assert!(lex("").unwrap().is_none());
        assert!(lex("   \t ").unwrap().is_none());
    }

    #[test]
    fn test_zero_arg_commands() {
        assert_eq!(lex("white").unwrap(), Some(Command::Background(Background::White)));
        assert_eq!(lex("green").unwrap(), Some(Command::Background(Background::Green)));
        assert_eq!(lex("update").unwrap(), Some(Command::Update));
        assert_eq!(lex("  reset  ").unwrap(), Some(Command::Reset));
    }

    #[test]
    fn test_float_args() {
        assert_eq!(
            lex("bgrect 0.1\t0.2   0.3 0.4").unwrap(),
            Some(Command::BgRect { x1: 0.1, y1: 0.2, x2: 0.3, y2: 0.4 })
        );
        assert_eq!(lex("move -0.5 1").unwrap(), Some(Command::Move { dx: -0.5, dy: 1.0 }));
    }

    #[test]
    fn test_unknown_command() {
        match lex("draw circle") {
            Err(ParseError::UnknownCommand { command, line }) => {
                assert_eq!(command, "draw");
                assert_eq!(line, 1);
            }
            other => panic!("Expected unknown command, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_arg_count() {
        match lex("figure 0.5") {
            Err(ParseError::MalformedArguments { command, expected, actual, invalid, .. }) => {
                assert_eq!(command, "figure");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
                assert!(invalid.is_none());
            }
            other => panic!("Expected malformed arguments, got {other:?}"),
        }

        assert!(matches!(
            lex("white now"),
            Err(ParseError::MalformedArguments { expected: 0, actual: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_arg() {
        match lex("move 0.1 up") {
            Err(ParseError::MalformedArguments { expected, actual, invalid, .. }) => {
                assert_eq!((expected, actual), (2, 2));
                assert_eq!(invalid.as_deref(), Some("up"));
            }
            other => panic!("Expected malformed arguments, got {other:?}"),
        }

        assert!(lex("figure inf 0.5").is_err());
        assert!(lex("figure NaN 0.5").is_err());
    }

    #[test]
    fn test_name_round_trips_keyword() {
        assert_eq!(lex("bgrect 0 0 1 1").unwrap().unwrap().name(), "bgrect");
        assert_eq!(lex("reset").unwrap().unwrap().name(), "reset");
    }
}
