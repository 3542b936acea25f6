use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The question text is blank.
    EmptyQuestion,
    /// A choice question was given an answer without text.
    EmptyAnswer,
    UnknownQuestion,
    UnknownAnswer,
    UnknownQuiz,
    /// The quiz cannot be started without questions.
    NoQuestions,
    /// Durable storage rejected the write.
    Storage,
}

impl From<db::error::Error> for Error {
    fn from(err: db::error::Error) -> Self {
        log::error!("Cannot persist quizzes: {err}");
        Self::Storage
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyQuestion => "The question must not be empty.",
            Self::EmptyAnswer => "The answer must not be empty.",
            Self::UnknownQuestion => "Question not found.",
            Self::UnknownAnswer => "Answer not found.",
            Self::UnknownQuiz => "Quiz not found.",
            Self::NoQuestions => "Add at least one question before starting the quiz.",
            Self::Storage => "Oops! The quizzes could not be saved.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
