pub mod error;

mod session;

use db::SharedStorage;
use model::{format_clock, AttemptProgress, LaunchPayload, Question, QuestionStatus, QuestionType};

pub use session::{AttemptHandle, AttemptSession, Outcome};

/// Result of an operation that may end the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Reported exactly once, on the operation that ended the attempt.
    Finished,
}

/// One run through a quiz. Every successful mutation writes the full progress
/// to session storage so that the attempt can be resumed after a reload.
pub struct Attempt {
    name: Box<str>,
    key: Box<str>,
    questions: Vec<Question>,
    progress: AttemptProgress,
    session: SharedStorage,
}

impl Attempt {
    /// Resumes the saved progress for this quiz if there is any. Nothing is
    /// written here, so a restored payload is never clobbered by defaults.
    pub fn restore(name: &str, payload: LaunchPayload, session: SharedStorage) -> Self {
        let LaunchPayload { questions, time_limit } = payload;
        let key = db::progress_key(name);
        let progress = match db::load_json(session.as_ref(), &key) {
            Ok(Some(progress)) => {
                log::info!("Resuming attempt at \"{name}\".");
                progress
            }
            Ok(None) => AttemptProgress::fresh(questions.len(), time_limit),
            Err(err) => {
                log::warn!("Discarding saved progress for \"{name}\": {err}");
                AttemptProgress::fresh(questions.len(), time_limit)
            }
        };
        Self { name: name.into(), key: key.into_boxed_str(), questions, progress, session }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn progress(&self) -> &AttemptProgress {
        &self.progress
    }

    pub const fn is_finished(&self) -> bool {
        self.progress.quiz_finished
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.progress.current_question_index)
    }

    /// Whether advancing from here finishes the attempt.
    pub fn is_last_question(&self) -> bool {
        self.progress.current_question_index + 1 >= self.questions.len()
    }

    pub fn statuses(&self) -> impl Iterator<Item = QuestionStatus> + '_ {
        (0..self.questions.len()).map(|index| self.progress.status(index))
    }

    pub fn clock(&self) -> String {
        format_clock(self.progress.time_left)
    }

    pub fn can_advance(&self) -> bool {
        if self.is_finished() {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        match question.kind {
            QuestionType::SingleChoice | QuestionType::MultiChoice => !self.progress.selected_answer_indexes.is_empty(),
            QuestionType::ShortAnswer => !self.progress.short_answer.trim().is_empty(),
            QuestionType::LongAnswer => !self.progress.long_answer.trim().is_empty(),
        }
    }

    /// Counts down one second.
    pub fn tick(&mut self) -> Transition {
        if self.is_finished() {
            return Transition::Stay;
        }

        self.progress.time_left -= 1;
        log::debug!("{} left for \"{}\".", self.clock(), self.name);
        let transition = if self.progress.time_left <= 0 {
            log::info!("Time is up for \"{}\".", self.name);
            self.progress.quiz_finished = true;
            Transition::Finished
        } else {
            Transition::Stay
        };

        self.persist();
        transition
    }

    pub fn select_answer(&mut self, index: usize) -> error::Result<()> {
        if self.is_finished() {
            return Err(error::Error::Finished);
        }

        let question = self.current_question().ok_or(error::Error::NoQuestion)?;
        let kind = question.kind;
        if !kind.is_choice() {
            return Err(error::Error::NotChoice);
        }
        if index >= question.answers.len() {
            return Err(error::Error::UnknownAnswer);
        }

        let selection = &mut self.progress.selected_answer_indexes;
        if kind == QuestionType::SingleChoice {
            selection.clear();
            selection.push(index);
        } else if let Some(pos) = selection.iter().position(|&i| i == index) {
            selection.remove(pos);
        } else {
            selection.push(index);
        }

        self.persist();
        Ok(())
    }

    pub fn set_short_answer(&mut self, text: impl Into<String>) -> error::Result<()> {
        if self.is_finished() {
            return Err(error::Error::Finished);
        }
        self.progress.short_answer = text.into();
        self.persist();
        Ok(())
    }

    pub fn set_long_answer(&mut self, text: impl Into<String>) -> error::Result<()> {
        if self.is_finished() {
            return Err(error::Error::Finished);
        }
        self.progress.long_answer = text.into();
        self.persist();
        Ok(())
    }

    /// Grades the current question and moves on to the next one.
    pub fn advance(&mut self) -> error::Result<Transition> {
        if self.is_finished() {
            return Err(error::Error::Finished);
        }
        if !self.can_advance() {
            return Err(error::Error::EmptyResponse);
        }

        let index = self.progress.current_question_index;
        if self.is_correct() {
            self.progress.correct_answers_count += 1;
        }
        if let Some(answered) = self.progress.answered_questions.get_mut(index) {
            *answered = true;
        }

        let transition = if index + 1 < self.questions.len() {
            self.progress.current_question_index = index + 1;
            self.progress.reset_response();
            Transition::Stay
        } else {
            log::info!(
                "Finished \"{}\" with {} of {} correct.",
                self.name,
                self.progress.correct_answers_count,
                self.questions.len()
            );
            self.progress.quiz_finished = true;
            Transition::Finished
        };

        self.persist();
        Ok(transition)
    }

    fn is_correct(&self) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let is_correct = |&index: &usize| question.answers.get(index).is_some_and(|answer| answer.is_correct);
        let selection = &self.progress.selected_answer_indexes;
        match question.kind {
            QuestionType::SingleChoice => selection.first().is_some_and(is_correct),
            // Selecting only a subset of the correct answers still counts.
            QuestionType::MultiChoice => selection.iter().all(is_correct),
            QuestionType::ShortAnswer => !self.progress.short_answer.trim().is_empty(),
            QuestionType::LongAnswer => !self.progress.long_answer.trim().is_empty(),
        }
    }

    fn persist(&self) {
        if let Err(err) = db::save_json(self.session.as_ref(), &self.key, &self.progress) {
            log::warn!("Cannot save progress for \"{}\": {err}", self.name);
        }
    }
}
