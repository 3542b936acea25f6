use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The attempt route was opened without a quiz name.
    MissingQuizName,
    UnknownRoute,
    /// The editor refused to hand over its quiz.
    Store(crate::store::error::Error),
}

impl From<crate::store::error::Error> for Error {
    fn from(err: crate::store::error::Error) -> Self {
        Self::Store(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingQuizName => f.write_str("Error: Quiz name is required"),
            Self::UnknownRoute => f.write_str("Page not found."),
            Self::Store(err) => err.fmt(f),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
