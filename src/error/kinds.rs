use std::{fmt, io};

/// Crate-wide `Result` type using [`TypeaheadError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, TypeaheadError>;

/// Top-level error type for typeahead operations.
///
/// The engine itself never fails: provider failures and invalid options are
/// recovered locally. This type covers configuration loading and the terminal
/// host.
#[derive(Debug)]
pub enum TypeaheadError {
    /// Configuration errors.
    Config(ConfigError),

    /// Match provider errors.
    Provider(ProviderError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Failure reported by a match provider.
///
/// Providers wrap whatever went wrong on their side into a message; the engine
/// treats the failure as an empty result set and forwards it to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Create a provider error from any displayable cause.
    pub fn new(cause: impl fmt::Display) -> Self {
        Self {
            message: cause.to_string(),
        }
    }

    /// Message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for TypeaheadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeaheadError::Config(e) => write!(f, "Configuration error: {e}"),
            TypeaheadError::Provider(e) => write!(f, "{e}"),
            TypeaheadError::Io(e) => write!(f, "I/O error: {e}"),
            TypeaheadError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match provider failed: {}", self.message)
    }
}

impl std::error::Error for TypeaheadError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ProviderError {}

/* ========================= Conversions to TypeaheadError ========================= */

impl From<io::Error> for TypeaheadError {
    fn from(err: io::Error) -> Self {
        TypeaheadError::Io(err)
    }
}

impl From<ConfigError> for TypeaheadError {
    fn from(err: ConfigError) -> Self {
        TypeaheadError::Config(err)
    }
}

impl From<ProviderError> for TypeaheadError {
    fn from(err: ProviderError) -> Self {
        TypeaheadError::Provider(err)
    }
}

impl From<toml::de::Error> for TypeaheadError {
    fn from(err: toml::de::Error) -> Self {
        TypeaheadError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<serde_json::Error> for TypeaheadError {
    fn from(err: serde_json::Error) -> Self {
        TypeaheadError::Generic(format!("JSON error: {err}"))
    }
}

impl From<String> for TypeaheadError {
    fn from(msg: String) -> Self {
        TypeaheadError::Generic(msg)
    }
}

impl From<&str> for TypeaheadError {
    fn from(msg: &str) -> Self {
        TypeaheadError::Generic(msg.to_owned())
    }
}
