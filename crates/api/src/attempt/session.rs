use super::{error, Attempt, Transition};
use core::time::Duration;
use model::{AttemptProgress, Question};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

enum Command {
    Select(usize),
    ShortAnswer(String),
    LongAnswer(String),
    Advance,
}

struct Request {
    command: Command,
    reply: oneshot::Sender<error::Result<Transition>>,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Finished { correct: usize, total: usize },
    /// Every handle went away while the attempt was still running.
    Abandoned,
}

impl Outcome {
    fn of(attempt: &Attempt) -> Self {
        Self::Finished { correct: attempt.progress().correct_answers_count, total: attempt.questions().len() }
    }
}

/// Drives an [`Attempt`] in real time. Timer ticks and user commands are
/// funnelled through a single loop so that they never interleave.
pub struct AttemptSession {
    attempt: Attempt,
    requests: mpsc::UnboundedReceiver<Request>,
    progress: watch::Sender<AttemptProgress>,
}

impl AttemptSession {
    const PERIOD: Duration = Duration::from_secs(1);

    /// Starts the countdown on a new task.
    pub fn spawn(attempt: Attempt) -> AttemptHandle {
        let (tx, requests) = mpsc::unbounded_channel();
        let (progress, watcher) = watch::channel(attempt.progress().clone());
        let name = attempt.name().into();
        let questions = attempt.questions().into();
        let task = tokio::spawn(Self { attempt, requests, progress }.run());
        AttemptHandle { name, questions, requests: tx, progress: watcher, task }
    }

    /// Runs until the attempt finishes or every handle is dropped. The interval
    /// is owned by this future, so it stops on every exit path.
    pub async fn run(self) -> Outcome {
        let Self { mut attempt, mut requests, progress } = self;
        if attempt.is_finished() {
            return Outcome::of(&attempt);
        }

        let mut ticker = time::interval_at(Instant::now() + Self::PERIOD, Self::PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let transition = tokio::select! {
                biased;
                request = requests.recv() => {
                    let Some(Request { command, reply }) = request else {
                        log::info!("Left \"{}\" before finishing.", attempt.name());
                        return Outcome::Abandoned;
                    };
                    let result = apply(&mut attempt, command);
                    if let Err(err) = &result {
                        log::debug!("Rejected command for \"{}\": {err}", attempt.name());
                    }
                    progress.send_replace(attempt.progress().clone());
                    let transition = *result.as_ref().unwrap_or(&Transition::Stay);
                    // The requester may have given up waiting.
                    let _ = reply.send(result);
                    transition
                }
                _ = ticker.tick() => {
                    let transition = attempt.tick();
                    progress.send_replace(attempt.progress().clone());
                    transition
                }
            };

            if transition == Transition::Finished {
                return Outcome::of(&attempt);
            }
        }
    }
}

fn apply(attempt: &mut Attempt, command: Command) -> error::Result<Transition> {
    match command {
        Command::Select(index) => attempt.select_answer(index).map(|_| Transition::Stay),
        Command::ShortAnswer(text) => attempt.set_short_answer(text).map(|_| Transition::Stay),
        Command::LongAnswer(text) => attempt.set_long_answer(text).map(|_| Transition::Stay),
        Command::Advance => attempt.advance(),
    }
}

/// Front-end side of a running [`AttemptSession`]. Dropping it tears the
/// session down.
pub struct AttemptHandle {
    name: Box<str>,
    questions: Box<[Question]>,
    requests: mpsc::UnboundedSender<Request>,
    progress: watch::Receiver<AttemptProgress>,
    task: JoinHandle<Outcome>,
}

impl AttemptHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Latest progress, updated after every tick and command.
    pub fn watch(&self) -> watch::Receiver<AttemptProgress> {
        self.progress.clone()
    }

    pub async fn select(&self, index: usize) -> error::Result<Transition> {
        self.request(Command::Select(index)).await
    }

    pub async fn short_answer(&self, text: impl Into<String>) -> error::Result<Transition> {
        self.request(Command::ShortAnswer(text.into())).await
    }

    pub async fn long_answer(&self, text: impl Into<String>) -> error::Result<Transition> {
        self.request(Command::LongAnswer(text.into())).await
    }

    pub async fn advance(&self) -> error::Result<Transition> {
        self.request(Command::Advance).await
    }

    /// Waits for the attempt to finish on its own.
    pub async fn finished(self) -> Outcome {
        let Self { requests, task, .. } = self;
        let outcome = join(task).await;
        drop(requests);
        outcome
    }

    /// Tears the session down and reports how far it got.
    pub async fn leave(self) -> Outcome {
        let Self { requests, task, .. } = self;
        drop(requests);
        join(task).await
    }

    async fn request(&self, command: Command) -> error::Result<Transition> {
        let (reply, response) = oneshot::channel();
        self.requests.send(Request { command, reply }).map_err(|_| error::Error::Closed)?;
        response.await.map_err(|_| error::Error::Closed)?
    }
}

async fn join(task: JoinHandle<Outcome>) -> Outcome {
    task.await.unwrap_or_else(|err| {
        log::error!("Attempt session stopped unexpectedly: {err}");
        Outcome::Abandoned
    })
}

#[cfg(test)]
mod tests {
    use super::{super::error::Error, Attempt, AttemptSession, Outcome, Transition};
    use core::time::Duration;
    use db::{progress_key, MemoryStorage, SharedStorage, Storage};
    use model::{Answer, AttemptProgress, LaunchPayload, Question, QuestionType};
    use std::sync::Arc;

    fn capital() -> Question {
        let answers = Vec::from([Answer::new("Paris", true), Answer::new("Lyon", false)]);
        Question { question: "Capital of France?".into(), answers, kind: QuestionType::SingleChoice }
    }

    fn attempt(session: &SharedStorage, time_limit: u32) -> Attempt {
        let payload = LaunchPayload { questions: Vec::from([capital()]), time_limit };
        Attempt::restore("Geo", payload, session.clone())
    }

    fn saved(session: &SharedStorage) -> AttemptProgress {
        let text = session.load(&progress_key("Geo")).unwrap().unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn countdown_ends_the_session() {
        let session: SharedStorage = Arc::new(MemoryStorage::default());
        let handle = AttemptSession::spawn(attempt(&session, 1));
        assert_eq!(handle.finished().await, Outcome::Finished { correct: 0, total: 1 });

        let progress = saved(&session);
        assert!(progress.quiz_finished);
        assert!(progress.time_left <= 0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn answering_the_last_question_ends_the_session() {
        let session: SharedStorage = Arc::new(MemoryStorage::default());
        let handle = AttemptSession::spawn(attempt(&session, 5));
        assert_eq!(handle.advance().await, Err(Error::EmptyResponse));
        assert_eq!(handle.select(0).await, Ok(Transition::Stay));
        assert_eq!(handle.advance().await, Ok(Transition::Finished));
        assert_eq!(handle.finished().await, Outcome::Finished { correct: 1, total: 1 });
        assert_eq!(saved(&session).correct_answers_count, 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn watchers_see_every_tick() {
        let session: SharedStorage = Arc::new(MemoryStorage::default());
        let handle = AttemptSession::spawn(attempt(&session, 1));
        let watcher = handle.watch();
        assert_eq!(watcher.borrow().time_left, 60);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(watcher.borrow().time_left, 58);
        assert_eq!(handle.leave().await, Outcome::Abandoned);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn leaving_keeps_saved_progress() {
        let session: SharedStorage = Arc::new(MemoryStorage::default());
        let handle = AttemptSession::spawn(attempt(&session, 1));
        handle.select(1).await.unwrap();
        assert_eq!(handle.leave().await, Outcome::Abandoned);
        assert_eq!(saved(&session).selected_answer_indexes, [1]);

        // A reload picks up where the previous session left off.
        let handle = AttemptSession::spawn(attempt(&session, 1));
        assert_eq!(handle.watch().borrow().selected_answer_indexes, [1]);
        assert_eq!(handle.advance().await, Ok(Transition::Finished));
        assert_eq!(handle.finished().await, Outcome::Finished { correct: 0, total: 1 });
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn restored_finished_attempt_ends_immediately() {
        let session: SharedStorage = Arc::new(MemoryStorage::default());
        let mut progress = AttemptProgress::fresh(1, 1);
        progress.quiz_finished = true;
        progress.correct_answers_count = 1;
        session.save(&progress_key("Geo"), &serde_json::to_string(&progress).unwrap()).unwrap();

        let handle = AttemptSession::spawn(attempt(&session, 1));
        assert_eq!(handle.select(0).await, Err(Error::Closed));
        assert_eq!(handle.finished().await, Outcome::Finished { correct: 1, total: 1 });
    }
}
