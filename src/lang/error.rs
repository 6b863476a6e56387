//! Parse errors raised by the script interpreter.

use thiserror::Error;

/// Result alias for interpreter operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A script could not be turned into a batch.
///
/// Every variant aborts the whole parse pass: no partial batch is
/// returned and the session state is left as it was before the pass.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The first token of a line is not a known command.
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand {
        /// 1-based line number.
        line: usize,
        /// The unrecognized token.
        command: String,
    },

    /// Wrong number of arguments, or an argument is not a number.
    #[error(
        "line {line}: `{command}` expects {expected} argument(s), got {actual}{}",
        invalid_suffix(.invalid)
    )]
    MalformedArguments {
        /// 1-based line number.
        line: usize,
        /// The command being parsed.
        command: String,
        /// Number of arguments the command takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
        /// The first argument that failed to parse as a number, if any.
        invalid: Option<String>,
    },

    /// Reading the script failed.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

fn invalid_suffix(invalid: &Option<String>) -> String {
    invalid
        .as_ref()
        .map(|tok| format!(" (`{tok}` is not a number)"))
        .unwrap_or_default()
}

impl ParseError {
    /// The command named by the error, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::UnknownCommand { command, .. } | Self::MalformedArguments { command, .. } => {
                Some(command)
            }
            Self::Io(_) => None,
        }
    }

    /// The 1-based line the error occurred on, if any.
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UnknownCommand { line, .. } | Self::MalformedArguments { line, .. } => {
                Some(*line)
            }
            Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_display() {
        let err = ParseError::UnknownCommand {
            line: 3,
            command: "draw".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: unknown command `draw`");
        assert_eq!(err.command(), Some("draw"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_malformed_arguments_display() {
        let count = ParseError::MalformedArguments {
            line: 1,
            command: "figure".to_string(),
            expected: 2,
            actual: 1,
            invalid: None,
        };
        assert_eq!(count.to_string(), "line 1: `figure` expects 2 argument(s), got 1");

        let number = ParseError::MalformedArguments {
            line: 2,
            command: "move".to_string(),
            expected: 2,
            actual: 2,
            invalid: Some("abc".to_string()),
        };
        assert!(number.to_string().contains("`abc` is not a number"));
    }

    #[test]
    fn test_io_preserves_source() {
        let err = ParseError::from(std::io::Error::other("boom"));
        assert!(err.to_string().contains("boom"));
        assert!(err.command().is_none());
    }
}
