use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// A possible answer to a [`Question`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Text shown next to the selection control.
    pub text: String,
    /// Whether selecting this answer counts towards the score.
    pub is_correct: bool,
}

impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self { text: text.into(), is_correct }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuestionType {
    /// Exactly one answer may be selected.
    #[serde(rename = "radio")]
    SingleChoice,
    /// Any subset of the answers may be selected.
    #[serde(rename = "checkbox")]
    MultiChoice,
    /// One line of free text.
    #[serde(rename = "short_answer")]
    ShortAnswer,
    /// Multiple lines of free text.
    #[serde(rename = "long_answer")]
    LongAnswer,
}

impl QuestionType {
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }

    pub const fn is_text(self) -> bool {
        !self.is_choice()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Prompt of the question. Unique within a quiz.
    pub question: String,
    /// Ignored for free-text questions.
    pub answers: Vec<Answer>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

impl Question {
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }
}

/// A named quiz as kept in durable storage.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub name: String,
    pub questions: Vec<Question>,
    /// Minutes allotted for a full attempt.
    pub time_limit: u32,
}

/// Snapshot handed over to an attempt when leaving the editor. It is never
/// written to storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchPayload {
    pub questions: Vec<Question>,
    pub time_limit: u32,
}
