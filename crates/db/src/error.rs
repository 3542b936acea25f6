use core::fmt::{self, Display};
use serde_json::error::Category;

#[derive(Debug)]
pub enum Error {
    /// The backing store could not be read or written.
    Io,
    /// The stored payload is not valid JSON.
    Syntax,
    /// The stored payload does not match the expected schema.
    Schema,
    /// Unrecoverable error.
    Fatal,
}

impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Self::Io
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Eof => Self::Syntax,
            Category::Data => Self::Schema,
            Category::Io => Self::Io,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Io => "Storage could not be accessed.",
            Self::Syntax => "Stored payload is not valid JSON.",
            Self::Schema => "Stored payload has an unexpected shape.",
            Self::Fatal => "Oops! Storage is in an unrecoverable state.",
        })
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
