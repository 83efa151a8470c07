use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SourceError {
    /// File could not be read or written.
    Io { path: PathBuf, message: String },
    /// File is not a valid JSON array of rows.
    Parse { path: PathBuf, message: String },
    /// A product with the same normalized name and origin already exists.
    DuplicateProduct { name: String, origin: String },
    /// Product name or origin is empty.
    InvalidProduct(String),
}

impl SourceError {
    pub(crate) fn io(path: &std::path::Path, err: impl fmt::Display) -> Self {
        Self::Io { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn parse(path: &std::path::Path, err: impl fmt::Display) -> Self {
        Self::Parse { path: path.to_path_buf(), message: err.to_string() }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Parse { path, message } => write!(f, "{}: invalid rows: {message}", path.display()),
            Self::DuplicateProduct { name, origin } => {
                write!(f, "product '{name}' is already registered for '{origin}'")
            }
            Self::InvalidProduct(msg) => write!(f, "invalid product: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}
