pub mod error;

mod editor;

use db::{SharedStorage, QUIZZES_KEY};
use model::{Answer, Question, QuestionType, Quiz};

pub use editor::Editor;

/// The durable collection of quizzes, keyed by name.
pub struct QuizStore {
    storage: SharedStorage,
    quizzes: Vec<Quiz>,
}

impl QuizStore {
    /// Reads the collection from durable storage. A missing or unreadable
    /// payload simply means that no quizzes exist yet.
    pub fn open(storage: SharedStorage) -> Self {
        let quizzes = match db::load_json(storage.as_ref(), QUIZZES_KEY) {
            Ok(Some(quizzes)) => quizzes,
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("Ignoring stored quizzes: {err}");
                Vec::new()
            }
        };
        Self { storage, quizzes }
    }

    pub fn list_quizzes(&self) -> Vec<&str> {
        self.quizzes.iter().map(|quiz| quiz.name.as_str()).collect()
    }

    pub fn load_quiz(&self, name: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|quiz| quiz.name == name)
    }

    /// Replaces the quiz with the same name (or appends a new one) and writes
    /// the entire collection back to durable storage.
    pub fn upsert_quiz(&mut self, name: &str, questions: Vec<Question>, time_limit: u32) -> error::Result<()> {
        self.quizzes.retain(|quiz| quiz.name != name);
        self.quizzes.push(Quiz { name: name.into(), questions, time_limit });
        db::save_json(self.storage.as_ref(), QUIZZES_KEY, &self.quizzes)?;
        log::info!("Saved quiz \"{name}\" ({} quizzes stored).", self.quizzes.len());
        Ok(())
    }
}

/// Records `answer` under the question with the given text, creating the
/// question if it does not exist yet.
pub fn add_question_answer(
    questions: &mut Vec<Question>,
    text: &str,
    answer: Answer,
    mut kind: QuestionType,
) -> error::Result<()> {
    if text.is_empty() {
        return Err(error::Error::EmptyQuestion);
    }

    if kind.is_choice() && answer.text.is_empty() {
        return Err(error::Error::EmptyAnswer);
    }

    if let Some(question) = questions.iter_mut().find(|q| q.question == text) {
        question.answers.push(answer);
        let single = kind == QuestionType::SingleChoice || question.kind == QuestionType::SingleChoice;
        if single && question.correct_count() > 1 {
            question.kind = QuestionType::MultiChoice;
        }
        return Ok(());
    }

    // NOTE: This counts correct answers across the whole quiz rather than
    // within the new question. Stored quizzes were built under this rule.
    if kind == QuestionType::SingleChoice && answer.is_correct {
        let correct: usize = questions.iter().map(Question::correct_count).sum();
        if correct > 1 {
            kind = QuestionType::MultiChoice;
        }
    }

    questions.push(Question { question: text.into(), answers: Vec::from([answer]), kind });
    Ok(())
}

pub fn delete_question(questions: &mut Vec<Question>, index: usize) -> error::Result<Question> {
    if index >= questions.len() {
        return Err(error::Error::UnknownQuestion);
    }
    Ok(questions.remove(index))
}

pub fn delete_answer(questions: &mut [Question], question: usize, answer: usize) -> error::Result<Answer> {
    let answers = &mut questions.get_mut(question).ok_or(error::Error::UnknownQuestion)?.answers;
    if answer >= answers.len() {
        return Err(error::Error::UnknownAnswer);
    }
    Ok(answers.remove(answer))
}
