use thiserror::Error;

/// Dataset failures callers may want to tell apart. Everything else from the
/// loader (I/O, CSV framing, JSON syntax) arrives as context-wrapped
/// `anyhow` errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Dataset has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Expected a top-level JSON array of records")]
    NotAnArray,
}
