use thiserror::Error;

/// A fatal parse failure.
///
/// The token loop stops accepting the offending input as soon as a failure
/// is found, but keeps scanning so a declared help switch later in the
/// token list can still win (see [`ArgParser::parse_tokens`]). Only the
/// first failure is reported.
///
/// Values accumulated before a failed parse are unspecified; callers must
/// not read accessors after an `Err` outcome.
///
/// [`ArgParser::parse_tokens`]: crate::ArgParser::parse_tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A bare `-` token, which is neither an option nor a positional.
    #[error("ambiguous bare '-' token")]
    BareDash,

    /// A long option name with no matching declaration.
    #[error("unknown option: --{0}")]
    UnknownLong(String),

    /// A short option character with no matching declaration.
    #[error("unknown option: -{0}")]
    UnknownShort(char),

    /// A flag was given an inline `=value`.
    #[error("flag --{0} does not take a value")]
    FlagTakesNoValue(String),

    /// A value-taking option reached the end of the token list.
    #[error("missing value for option '{0}'")]
    MissingValue(String),

    /// A value for an integer argument did not parse as an integer.
    #[error("invalid integer '{value}' for '{name}'")]
    InvalidInt { name: String, value: String },

    /// A positional token arrived with no positional slot left to fill.
    #[error("unexpected positional argument '{0}'")]
    UnexpectedPositional(String),

    /// A required argument with no default was never supplied.
    #[error("missing required argument '{0}'")]
    MissingRequired(String),

    /// A multi-value argument accumulated fewer values than its minimum.
    #[error("argument '{name}' needs at least {min} values, got {got}")]
    TooFewValues {
        name: String,
        min: usize,
        got: usize,
    },
}

/// Parse outcome alias used across the crate.
pub type ParseResult<T> = Result<T, ParseError>;
