use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for tocspy operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for tocspy operations
///
/// Only the outer surfaces (config files, selectors, file IO, the CLI) produce
/// these. The widget itself degrades silently instead of failing.
#[derive(Debug)]
pub enum TocError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Selector syntax error
    Selector(String),
    /// Input document could not be processed
    Parse(String),
    /// File handling error
    File(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for TocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TocError::Io(err) => write!(f, "IO error: {}", err),
            TocError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TocError::Selector(msg) => write!(f, "Selector error: {}", msg),
            TocError::Parse(msg) => write!(f, "Parse error: {}", msg),
            TocError::File(msg) => write!(f, "File error: {}", msg),
            TocError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for TocError {}

impl From<io::Error> for TocError {
    fn from(err: io::Error) -> Self {
        TocError::Io(err)
    }
}

impl From<String> for TocError {
    fn from(msg: String) -> Self {
        TocError::Generic(msg)
    }
}

impl From<&str> for TocError {
    fn from(msg: &str) -> Self {
        TocError::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            TocError::Config("bad level".to_string()).to_string(),
            "Configuration error: bad level"
        );
        assert_eq!(
            TocError::Selector("unexpected ']'".to_string()).to_string(),
            "Selector error: unexpected ']'"
        );
        assert_eq!(TocError::from("plain").to_string(), "plain");
    }

    #[test]
    fn test_io_conversion_boxes() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let boxed: Box<dyn Error> = TocError::from(io_err).into();
        assert!(boxed.to_string().starts_with("IO error"));
    }
}
