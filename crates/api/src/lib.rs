pub mod app;
pub mod attempt;
pub mod store;

pub use app::{App, Page, Route};
pub use attempt::{Attempt, AttemptHandle, AttemptSession, Outcome, Transition};
pub use store::{Editor, QuizStore};

pub use db::{FileStorage, MemoryStorage, SharedStorage, Storage};
pub use model::{format_clock, Answer, AttemptProgress, LaunchPayload, Question, QuestionStatus, QuestionType, Quiz};
