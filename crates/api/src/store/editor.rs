use super::{error, QuizStore};
use model::{Answer, LaunchPayload, Question, QuestionType};

/// Working copy of the quiz being authored. Structural edits are written
/// through to the store right away; the name and the time limit are only
/// persisted with the next save.
pub struct Editor {
    store: QuizStore,
    name: String,
    questions: Vec<Question>,
    time_limit: u32,
}

impl From<QuizStore> for Editor {
    fn from(store: QuizStore) -> Self {
        Self { store, name: String::new(), questions: Vec::new(), time_limit: 0 }
    }
}

impl Editor {
    pub fn store(&self) -> &QuizStore {
        &self.store
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub const fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// Loads a stored quiz into the working copy.
    pub fn select(&mut self, name: &str) -> error::Result<()> {
        let quiz = self.store.load_quiz(name).ok_or(error::Error::UnknownQuiz)?;
        self.name = quiz.name.clone();
        self.questions = quiz.questions.clone();
        self.time_limit = quiz.time_limit;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_time_limit(&mut self, minutes: u32) {
        self.time_limit = minutes;
    }

    pub fn save_time_limit(&mut self) -> error::Result<()> {
        self.save()
    }

    pub fn add_question_answer(&mut self, text: &str, answer: Answer, kind: QuestionType) -> error::Result<()> {
        super::add_question_answer(&mut self.questions, text, answer, kind)?;
        self.save()
    }

    pub fn delete_question(&mut self, index: usize) -> error::Result<()> {
        super::delete_question(&mut self.questions, index)?;
        self.save()
    }

    pub fn delete_answer(&mut self, question: usize, answer: usize) -> error::Result<()> {
        super::delete_answer(&mut self.questions, question, answer)?;
        self.save()
    }

    /// Empties the working copy without touching storage.
    pub fn clear(&mut self) {
        self.name.clear();
        self.questions.clear();
        self.time_limit = 0;
    }

    pub fn can_start(&self) -> bool {
        !self.questions.is_empty()
    }

    /// Snapshot handed to the attempt.
    pub fn start(&self) -> error::Result<LaunchPayload> {
        if !self.can_start() {
            return Err(error::Error::NoQuestions);
        }
        Ok(LaunchPayload { questions: self.questions.clone(), time_limit: self.time_limit })
    }

    fn save(&mut self) -> error::Result<()> {
        self.store.upsert_quiz(&self.name, self.questions.clone(), self.time_limit)
    }
}
