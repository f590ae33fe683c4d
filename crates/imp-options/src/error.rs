use thiserror::Error;

/// Errors raised while binding an argument vector to an option schema.
///
/// Every variant is fatal to the `parse` call that produced it; no partial
/// result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token looked like a switch but resolved to no declared option.
    #[error("An invalid option was specified: {0}")]
    InvalidSwitch(String),

    /// A required or numeric switch had no following value, or the following
    /// token was itself a known switch.
    #[error("Switch requires a value: {0}")]
    MissingValue(String),

    /// A numeric switch was given a value outside `[0-9.]`.
    #[error("Switch requires numeric argument: {0}")]
    NonNumeric(String),

    /// Raised once after all tokens are consumed, naming every missing long form.
    #[error(
        "The following options are required, but were not given: {}",
        .0.join(", ")
    )]
    MissingRequiredOption(Vec<String>),
}

impl ParseError {
    /// Whether this is one of the value-binding conditions (missing or
    /// non-numeric value).
    pub fn is_option_error(&self) -> bool {
        matches!(self, Self::MissingValue(_) | Self::NonNumeric(_))
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
