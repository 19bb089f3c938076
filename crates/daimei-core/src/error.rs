use thiserror::Error;

/// Errors that can occur while configuring the Daimei parser.
///
/// Parsing itself is total and never fails; errors only arise at the
/// configuration seam.
#[derive(Debug, Error)]
pub enum DaimeiError {
    /// A parser configuration value was rejected.
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(String),

    /// An unrecognised subtitle language code.
    #[error("unknown subtitle language code: {0:?}")]
    UnknownLanguage(String),

    /// An unrecognised resolution label.
    #[error("unknown resolution: {0:?}")]
    UnknownResolution(String),
}

/// Result type alias for Daimei operations.
pub type Result<T> = std::result::Result<T, DaimeiError>;
