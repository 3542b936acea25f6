pub mod error;

mod route;

use crate::{
    attempt::Attempt,
    store::{Editor, QuizStore},
};
use db::SharedStorage;
use model::LaunchPayload;

pub use route::Route;

/// What the front-end should show after a navigation.
pub enum Page {
    Entry,
    Attempt(Attempt),
}

/// Owns both stores and knows which page is mounted. Navigation away from the
/// entry page wipes session storage, which ends every attempt in progress.
pub struct App {
    durable: SharedStorage,
    session: SharedStorage,
    editor: Editor,
    route: Route,
    /// Handed over with the last navigation and kept for reloads.
    payload: Option<LaunchPayload>,
}

impl App {
    pub fn new(durable: SharedStorage, session: SharedStorage) -> Self {
        let editor = Editor::from(QuizStore::open(durable.clone()));
        Self { durable, session, editor, route: Route::Entry, payload: None }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn navigate(&mut self, route: Route, payload: Option<LaunchPayload>) -> Page {
        if self.route == Route::Entry && route != Route::Entry {
            self.unmount_entry();
        }
        log::info!("Navigating to {}.", route.path());
        self.route = route;
        self.payload = payload;
        self.mount()
    }

    pub fn open(&mut self, path: &str, payload: Option<LaunchPayload>) -> error::Result<Page> {
        let route = Route::parse(path)?;
        Ok(self.navigate(route, payload))
    }

    /// Hands the quiz in the editor over to a new attempt.
    pub fn start_quiz(&mut self) -> error::Result<Page> {
        let payload = self.editor.start()?;
        let route = Route::attempt(self.editor.name())?;
        Ok(self.navigate(route, Some(payload)))
    }

    /// Returns to the entry page once the attempt has finished. Only the first
    /// call after an attempt navigates.
    pub fn finish(&mut self) -> Option<Page> {
        if self.route == Route::Entry {
            return None;
        }
        Some(self.navigate(Route::Entry, None))
    }

    /// Mounts the current page again without leaving it.
    pub fn reload(&mut self) -> Page {
        log::info!("Reloading {}.", self.route.path());
        self.mount()
    }

    fn mount(&mut self) -> Page {
        match &self.route {
            Route::Entry => {
                self.editor = Editor::from(QuizStore::open(self.durable.clone()));
                Page::Entry
            }
            Route::Attempt { name } => {
                let payload = self.payload.clone().unwrap_or_else(|| {
                    log::warn!("No quiz was handed over to \"{name}\".");
                    LaunchPayload::default()
                });
                Page::Attempt(Attempt::restore(name, payload, self.session.clone()))
            }
        }
    }

    fn unmount_entry(&mut self) {
        match self.session.clear() {
            Ok(()) => log::info!("Cleared session storage."),
            Err(err) => log::warn!("Cannot clear session storage: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{error::Error, App, Page, Route};
    use crate::{attempt::Attempt, store::error::Error as StoreError};
    use db::{progress_key, MemoryStorage, SharedStorage, Storage};
    use model::{Answer, QuestionType};
    use std::sync::Arc;

    fn app() -> (SharedStorage, App) {
        let durable: SharedStorage = Arc::new(MemoryStorage::default());
        let session: SharedStorage = Arc::new(MemoryStorage::default());
        (session.clone(), App::new(durable, session))
    }

    fn author(app: &mut App, name: &str) {
        let editor = app.editor_mut();
        editor.set_name(name);
        editor.set_time_limit(1);
        editor.add_question_answer("Capital?", Answer::new("Paris", true), QuestionType::SingleChoice).unwrap();
        editor.add_question_answer("Capital?", Answer::new("Lyon", false), QuestionType::SingleChoice).unwrap();
    }

    fn expect_attempt(page: Page) -> Attempt {
        match page {
            Page::Attempt(attempt) => attempt,
            Page::Entry => panic!("expected the attempt page"),
        }
    }

    #[test]
    fn starting_hands_over_a_snapshot() {
        let (_, mut app) = app();
        author(&mut app, "Geo");
        let attempt = expect_attempt(app.start_quiz().unwrap());
        assert_eq!(app.route(), &Route::Attempt { name: "Geo".into() });
        assert_eq!(attempt.name(), "Geo");
        assert_eq!(attempt.questions().len(), 1);
        assert_eq!(attempt.progress().time_left, 60);
    }

    #[test]
    fn start_is_refused_without_questions_or_name() {
        let (_, mut app) = app();
        assert!(matches!(app.start_quiz(), Err(Error::Store(StoreError::NoQuestions))));
        author(&mut app, "");
        assert!(matches!(app.start_quiz(), Err(Error::MissingQuizName)));
        assert_eq!(app.route(), &Route::Entry);
    }

    #[test]
    fn leaving_entry_wipes_session_storage() {
        let (session, mut app) = app();
        author(&mut app, "Geo");
        session.save(&progress_key("Geo"), "{}").unwrap();
        session.save(&progress_key("Other"), "{}").unwrap();
        session.save("unrelated", "1").unwrap();

        let _ = app.start_quiz().unwrap();
        assert!(session.load(&progress_key("Other")).unwrap().is_none());
        assert!(session.load("unrelated").unwrap().is_none());
    }

    #[test]
    fn reload_resumes_progress() {
        let (_, mut app) = app();
        author(&mut app, "Geo");
        let mut attempt = expect_attempt(app.start_quiz().unwrap());
        attempt.select_answer(1).unwrap();
        attempt.tick();
        drop(attempt);

        let resumed = expect_attempt(app.reload());
        assert_eq!(resumed.progress().selected_answer_indexes, [1]);
        assert_eq!(resumed.progress().time_left, 59);
    }

    #[test]
    fn finishing_navigates_home_once() {
        let (_, mut app) = app();
        author(&mut app, "Geo");
        let mut attempt = expect_attempt(app.start_quiz().unwrap());
        attempt.select_answer(0).unwrap();
        attempt.advance().unwrap();

        assert!(matches!(app.finish(), Some(Page::Entry)));
        assert!(app.finish().is_none());
        assert_eq!(app.route(), &Route::Entry);

        // The entry page reads the quizzes again when it mounts.
        assert!(app.editor().name().is_empty());
        assert_eq!(app.editor().store().list_quizzes(), ["Geo"]);
    }

    #[test]
    fn attempt_route_without_payload_is_empty() {
        let (_, mut app) = app();
        let attempt = expect_attempt(app.open("/quiz/Geo", None).unwrap());
        assert!(attempt.questions().is_empty());
        assert!(attempt.current_question().is_none());
        assert_eq!(attempt.progress().time_left, 0);
    }

    #[test]
    fn attempt_route_requires_name() {
        let (_, mut app) = app();
        assert!(matches!(app.open("/quiz/", None), Err(Error::MissingQuizName)));
        assert_eq!(app.route(), &Route::Entry);
    }
}
