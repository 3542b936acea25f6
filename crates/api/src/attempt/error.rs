use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The attempt already ended.
    Finished,
    /// There is no question to respond to.
    NoQuestion,
    /// Free-text questions have no answers to select.
    NotChoice,
    UnknownAnswer,
    /// The current question has no response yet.
    EmptyResponse,
    /// The session driving the attempt has stopped.
    Closed,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finished => "The quiz has already finished.",
            Self::NoQuestion => "There is no question to answer.",
            Self::NotChoice => "This question expects a written answer.",
            Self::UnknownAnswer => "Answer not found.",
            Self::EmptyResponse => "Answer the question before moving on.",
            Self::Closed => "The quiz is no longer running.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
