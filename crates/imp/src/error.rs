use imp_options::ParseError;
use thiserror::Error;

use crate::manifest::BootError;

/// Failure reported by an action handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArgs(String),
    #[error("{0}")]
    Failed(String),
    #[error("{0}")]
    Io(String),
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgs(msg) | Self::Failed(msg) | Self::Io(msg) => msg,
        }
    }
}

impl From<String> for CommandError {
    fn from(s: String) -> Self {
        CommandError::Failed(s)
    }
}

impl From<&str> for CommandError {
    fn from(s: &str) -> Self {
        CommandError::Failed(s.to_string())
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        CommandError::Io(e.to_string())
    }
}

impl From<std::num::ParseIntError> for CommandError {
    fn from(e: std::num::ParseIntError) -> Self {
        CommandError::InvalidArgs(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for CommandError {
    fn from(e: std::num::ParseFloatError) -> Self {
        CommandError::InvalidArgs(e.to_string())
    }
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        CommandError::InvalidArgs(e.to_string())
    }
}

/// Exit status returned by a successful action.
pub type ExitCode = u32;

pub type CommandResult = Result<ExitCode, CommandError>;

/// Errors surfaced by [`Application`](crate::Application) and
/// [`Command::dispatch`](crate::Command::dispatch).
#[derive(Debug, Error)]
pub enum ImpError {
    /// No registered route matched the argument vector.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Action '{action}' was not found in {command}")]
    ActionNotFound { action: String, command: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Boot(#[from] BootError),
}

impl ImpError {
    /// Whether the error came from the option parser.
    pub fn is_option_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

pub type ImpResult<T> = Result<T, ImpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_are_failures() {
        assert_eq!(
            CommandError::from("boom"),
            CommandError::Failed("boom".to_string())
        );
        assert_eq!(
            CommandError::from(String::from("boom")).message(),
            "boom"
        );
    }

    #[test]
    fn number_parse_errors_are_invalid_args() {
        let err: CommandError = "x".parse::<i32>().unwrap_err().into();
        assert!(matches!(err, CommandError::InvalidArgs(_)));
    }

    #[test]
    fn io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CommandError::from(io), CommandError::Io("gone".to_string()));
    }

    #[test]
    fn messages() {
        let err = ImpError::ActionNotFound {
            action: "invalid".to_string(),
            command: "simple".to_string(),
        };
        assert_eq!(err.to_string(), "Action 'invalid' was not found in simple");

        let err = ImpError::from(ParseError::InvalidSwitch("-a".to_string()));
        assert_eq!(err.to_string(), "An invalid option was specified: -a");
        assert!(err.is_option_error());

        let err = ImpError::UnknownCommand("nothing".to_string());
        assert_eq!(err.to_string(), "Unknown command: nothing");
        assert!(!err.is_option_error());
    }
}
