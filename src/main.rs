mod command;

use anyhow::Context;
use api::{
    Answer, App, AttemptHandle, AttemptProgress, AttemptSession, Editor, FileStorage, MemoryStorage, Outcome, Page,
    QuestionStatus, QuestionType, Route, SharedStorage, Transition,
};
use command::Command;
use std::{env, sync::Arc};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    runtime,
};

type Input = Lines<BufReader<Stdin>>;

enum Screen {
    Entry,
    Attempt(AttemptHandle),
}

impl From<Page> for Screen {
    fn from(page: Page) -> Self {
        match page {
            Page::Entry => Self::Entry,
            Page::Attempt(attempt) => Self::Attempt(AttemptSession::spawn(attempt)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let data = env::var("QUIZBOOK_DATA").unwrap_or_else(|_| String::from(".quizbook"));
    let durable: SharedStorage = Arc::new(FileStorage::open(&data).context("cannot open quiz storage")?);
    let session: SharedStorage = match env::var("QUIZBOOK_SESSION") {
        Ok(dir) => Arc::new(FileStorage::open(dir).context("cannot open session storage")?),
        _ => Arc::new(MemoryStorage::default()),
    };
    log::info!("Keeping quizzes in {data}.");

    // Timer ticks and typed commands share one thread
    let runtime = runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(run(App::new(durable, session)))
}

async fn run(mut app: App) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!("{}\n", command::HELP);
    print_editor(app.editor());

    let mut screen = Screen::Entry;
    loop {
        screen = match screen {
            Screen::Entry => {
                let Some(line) = input.next_line().await? else {
                    return Ok(());
                };
                match on_entry(&mut app, &line) {
                    Flow::Stay => Screen::Entry,
                    Flow::Switch(page) => page.into(),
                    Flow::Quit => return Ok(()),
                }
            }
            Screen::Attempt(handle) => match on_attempt(&mut app, handle, &mut input).await? {
                Some(screen) => screen,
                None => return Ok(()),
            },
        };
    }
}

enum Flow {
    Stay,
    Switch(Page),
    Quit,
}

/// Handles one line on the entry page.
fn on_entry(app: &mut App, line: &str) -> Flow {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(err) => {
            println!("{err}");
            return Flow::Stay;
        }
    };

    let editor = app.editor_mut();
    let result = match command {
        Command::Help => {
            println!("{}", command::HELP);
            Ok(())
        }
        Command::Quit => return Flow::Quit,
        Command::List => {
            let names = editor.store().list_quizzes();
            if names.is_empty() {
                println!("No quizzes yet.");
            }
            for name in names {
                println!("  {name}");
            }
            Ok(())
        }
        Command::Show => {
            print_editor(editor);
            Ok(())
        }
        Command::Select(name) => editor.select(&name).map(|_| print_editor(editor)),
        Command::New | Command::Clear => {
            editor.clear();
            Ok(())
        }
        Command::Name(name) => {
            editor.set_name(name);
            Ok(())
        }
        Command::Time(minutes) => {
            editor.set_time_limit(minutes);
            Ok(())
        }
        Command::SaveTime => editor.save_time_limit(),
        Command::Add { kind, question, answer, correct } => {
            editor.add_question_answer(&question, Answer::new(answer, correct), kind).map(|_| print_editor(editor))
        }
        Command::DeleteQuestion(index) => editor.delete_question(index).map(|_| print_editor(editor)),
        Command::DeleteAnswer(question, answer) => {
            editor.delete_answer(question, answer).map(|_| print_editor(editor))
        }
        Command::Start => return switch(app.start_quiz()),
        Command::Open(path) => return switch(app.open(&path, None)),
        Command::Reload => return Flow::Switch(app.reload()),
        Command::Pick(_) | Command::Write(_) | Command::Next | Command::Leave => {
            println!("Start a quiz first.");
            Ok(())
        }
    };

    if let Err(err) = result {
        println!("{err}");
    }
    Flow::Stay
}

fn switch(result: api::app::error::Result<Page>) -> Flow {
    match result {
        Ok(page) => Flow::Switch(page),
        Err(err) => {
            println!("{err}");
            Flow::Stay
        }
    }
}

enum Event {
    Line(Option<String>),
    Changed(bool),
}

/// Runs the attempt page until the quiz ends or the user leaves. Returns the
/// next screen, or `None` when the program should exit.
async fn on_attempt(app: &mut App, handle: AttemptHandle, input: &mut Input) -> anyhow::Result<Option<Screen>> {
    let mut progress = handle.watch();
    print_question(&handle, &progress.borrow());

    loop {
        if progress.borrow().quiz_finished {
            break;
        }

        let event = tokio::select! {
            line = input.next_line() => Event::Line(line?),
            changed = progress.changed() => Event::Changed(changed.is_ok()),
        };

        let line = match event {
            Event::Changed(true) => continue,
            Event::Changed(false) => break,
            Event::Line(None) => {
                handle.leave().await;
                return Ok(None);
            }
            Event::Line(Some(line)) => line,
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let result = match command {
            Command::Pick(index) => handle.select(index).await,
            Command::Write(text) => {
                let current = progress.borrow().current_question_index;
                match handle.questions().get(current).map(|question| question.kind) {
                    Some(QuestionType::LongAnswer) => handle.long_answer(text).await,
                    _ => handle.short_answer(text).await,
                }
            }
            Command::Next => handle.advance().await,
            Command::Show => {
                print_question(&handle, &progress.borrow());
                continue;
            }
            Command::Help => {
                println!("{}", command::HELP);
                continue;
            }
            Command::Reload => {
                handle.leave().await;
                return Ok(Some(app.reload().into()));
            }
            Command::Leave => {
                handle.leave().await;
                let page = app.navigate(Route::Entry, None);
                print_editor(app.editor());
                return Ok(Some(page.into()));
            }
            Command::Quit => {
                handle.leave().await;
                return Ok(None);
            }
            _ => {
                println!("Leave the quiz first.");
                continue;
            }
        };

        match result {
            Ok(Transition::Stay) => print_question(&handle, &progress.borrow()),
            Ok(Transition::Finished) => {}
            Err(err) => println!("{err}"),
        }
    }

    match handle.finished().await {
        Outcome::Finished { correct, total } => println!("Finished: {correct} of {total} correct."),
        Outcome::Abandoned => println!("The quiz was interrupted."),
    }

    let page = app.finish().unwrap_or(Page::Entry);
    if matches!(page, Page::Entry) {
        print_editor(app.editor());
    }
    Ok(Some(page.into()))
}

fn kind_label(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::SingleChoice => "single choice",
        QuestionType::MultiChoice => "multiple choice",
        QuestionType::ShortAnswer => "short answer",
        QuestionType::LongAnswer => "long answer",
    }
}

fn print_editor(editor: &Editor) {
    let name = if editor.name().is_empty() { "(untitled)" } else { editor.name() };
    println!("Quiz: {name} ({} min)", editor.time_limit());
    for (i, question) in editor.questions().iter().enumerate() {
        println!("  {}. {} ({})", i + 1, question.question, kind_label(question.kind));
        if question.kind.is_text() {
            continue;
        }
        for (j, answer) in question.answers.iter().enumerate() {
            let verdict = if answer.is_correct { "correct" } else { "incorrect" };
            println!("     {}. {} ({verdict})", j + 1, answer.text);
        }
    }
    if !editor.can_start() {
        println!("Add a question to be able to start.");
    }
}

fn print_question(handle: &AttemptHandle, progress: &AttemptProgress) {
    let cells: String = (0..handle.questions().len())
        .map(|i| match progress.status(i) {
            QuestionStatus::Answered => '#',
            QuestionStatus::Current => '>',
            QuestionStatus::Pending => '.',
        })
        .collect();
    println!("{} [{}] {}", handle.name(), cells, api::format_clock(progress.time_left));

    let Some(question) = handle.questions().get(progress.current_question_index) else {
        println!("This quiz has no questions.");
        return;
    };
    println!("{}", question.question);
    match question.kind {
        QuestionType::SingleChoice | QuestionType::MultiChoice => {
            for (i, answer) in question.answers.iter().enumerate() {
                let mark = if progress.is_selected(i) { 'x' } else { ' ' };
                println!("  [{mark}] {}. {}", i + 1, answer.text);
            }
        }
        QuestionType::ShortAnswer => println!("  > {}", progress.short_answer),
        QuestionType::LongAnswer => println!("  > {}", progress.long_answer),
    }

    let last = progress.current_question_index + 1 >= handle.questions().len();
    println!("Type `next` to {}.", if last { "finish the quiz" } else { "go to the next question" });
}
