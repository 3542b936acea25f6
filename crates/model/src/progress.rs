use alloc::{string::String, vec, vec::Vec};
use serde::{Deserialize, Serialize};

/// Everything needed to resume an attempt after a reload. The field names are
/// those of the stored session payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptProgress {
    pub current_question_index: usize,
    /// Treated as a set. Insertion order is kept so that a restored payload
    /// serializes back to the same bytes.
    pub selected_answer_indexes: Vec<usize>,
    pub short_answer: String,
    pub long_answer: String,
    pub correct_answers_count: usize,
    pub quiz_finished: bool,
    /// Seconds remaining. Drops to zero or below when the countdown expires.
    pub time_left: i64,
    /// One flag per question.
    pub answered_questions: Vec<bool>,
}

impl AttemptProgress {
    pub fn fresh(question_count: usize, time_limit: u32) -> Self {
        Self {
            current_question_index: 0,
            selected_answer_indexes: Vec::new(),
            short_answer: String::new(),
            long_answer: String::new(),
            correct_answers_count: 0,
            quiz_finished: false,
            time_left: i64::from(time_limit) * 60,
            answered_questions: vec![false; question_count],
        }
    }

    /// Clears the response fields of the current question.
    pub fn reset_response(&mut self) {
        self.selected_answer_indexes.clear();
        self.short_answer.clear();
        self.long_answer.clear();
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_answer_indexes.contains(&index)
    }

    pub fn status(&self, index: usize) -> QuestionStatus {
        if self.answered_questions.get(index).copied().unwrap_or(false) {
            QuestionStatus::Answered
        } else if index == self.current_question_index {
            QuestionStatus::Current
        } else {
            QuestionStatus::Pending
        }
    }
}

/// State of a single cell in the progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionStatus {
    Answered,
    Current,
    Pending,
}

/// Renders the countdown as `m:ss`.
pub fn format_clock(time_left: i64) -> String {
    let secs = time_left.max(0);
    alloc::format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_progress_starts_at_first_question() {
        let progress = AttemptProgress::fresh(3, 2);
        assert_eq!(progress.current_question_index, 0);
        assert_eq!(progress.time_left, 120);
        assert_eq!(progress.answered_questions, [false, false, false]);
        assert!(!progress.quiz_finished);
        assert_eq!(progress.status(0), QuestionStatus::Current);
        assert_eq!(progress.status(1), QuestionStatus::Pending);
    }

    #[test]
    fn restored_payload_serializes_to_same_bytes() {
        let json = r#"{"currentQuestionIndex":1,"selectedAnswerIndexes":[2,0],"shortAnswer":"","longAnswer":"draft","correctAnswersCount":1,"quizFinished":false,"timeLeft":95,"answeredQuestions":[true,false,false]}"#;
        let progress: AttemptProgress = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&progress).unwrap(), json);
    }

    #[test]
    fn answered_status_wins_over_current() {
        let mut progress = AttemptProgress::fresh(2, 1);
        progress.answered_questions[0] = true;
        assert_eq!(progress.status(0), QuestionStatus::Answered);
        assert_eq!(progress.status(7), QuestionStatus::Pending);
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(605), "10:05");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(-3), "0:00");
    }
}
