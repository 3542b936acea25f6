use api::QuestionType;
use core::fmt::{self, Display};

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    List,
    Show,
    Select(String),
    New,
    Name(String),
    Add { kind: QuestionType, question: String, answer: String, correct: bool },
    DeleteQuestion(usize),
    DeleteAnswer(usize, usize),
    Time(u32),
    SaveTime,
    Clear,
    Start,
    Open(String),
    Pick(usize),
    Write(String),
    Next,
    Reload,
    Leave,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Empty,
    Unknown,
    Usage(&'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Type `help` to see the available commands."),
            Self::Unknown => f.write_str("Unknown command. Type `help` to see the available commands."),
            Self::Usage(usage) => write!(f, "Usage: {usage}"),
        }
    }
}

pub const HELP: &str = "\
Editor:
  list                         show stored quizzes
  select <name>                load a stored quiz
  new | clear                  start over with an empty quiz
  name <name>                  rename the quiz
  add <type> <question> | <answer>
                               type is radio, checkbox, short or long;
                               prefix the answer with * to mark it correct
  del <question> [<answer>]    delete by position
  time <minutes>               set the time limit
  save-time                    store the time limit
  show                         print the quiz
  start                        take the quiz
  open <path>                  go to a page such as /quiz/<name>
Quiz:
  pick <answer>                select or toggle an answer
  write <text>                 answer a free-text question
  next                         submit and move on
  reload                       reload the page
  leave                        back to the editor
quit";

fn position(arg: &str, usage: &'static str) -> Result<usize, Error> {
    match arg.parse::<usize>() {
        Ok(pos) if pos > 0 => Ok(pos - 1),
        _ => Err(Error::Usage(usage)),
    }
}

fn kind_of(arg: &str) -> Option<QuestionType> {
    Some(match arg {
        "radio" | "single" => QuestionType::SingleChoice,
        "checkbox" | "multi" => QuestionType::MultiChoice,
        "short" => QuestionType::ShortAnswer,
        "long" => QuestionType::LongAnswer,
        _ => return None,
    })
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, Error> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        Ok(match word {
            "" => return Err(Error::Empty),
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "list" => Self::List,
            "show" => Self::Show,
            "new" => Self::New,
            "clear" => Self::Clear,
            "start" => Self::Start,
            "save-time" => Self::SaveTime,
            "next" => Self::Next,
            "reload" => Self::Reload,
            "leave" => Self::Leave,
            "select" if !rest.is_empty() => Self::Select(rest.into()),
            "select" => return Err(Error::Usage("select <name>")),
            "name" => Self::Name(rest.into()),
            "open" => Self::Open(rest.into()),
            "write" => Self::Write(rest.into()),
            "time" => Self::Time(rest.parse().map_err(|_| Error::Usage("time <minutes>"))?),
            "pick" => Self::Pick(position(rest, "pick <answer>")?),
            "del" => {
                const USAGE: &str = "del <question> [<answer>]";
                let mut args = rest.split_whitespace();
                let question = position(args.next().unwrap_or_default(), USAGE)?;
                match args.next() {
                    Some(answer) => Self::DeleteAnswer(question, position(answer, USAGE)?),
                    None => Self::DeleteQuestion(question),
                }
            }
            "add" => {
                const USAGE: &str = "add <radio|checkbox|short|long> <question> | <answer>";
                let (kind, rest) = rest.split_once(char::is_whitespace).ok_or(Error::Usage(USAGE))?;
                let kind = kind_of(kind).ok_or(Error::Usage(USAGE))?;
                let (question, answer) = rest.split_once('|').unwrap_or((rest, ""));
                let answer = answer.trim();
                let (answer, correct) = match answer.strip_prefix('*') {
                    Some(answer) => (answer.trim_start(), true),
                    None => (answer, false),
                };
                Self::Add { kind, question: question.trim().into(), answer: answer.into(), correct }
            }
            _ => return Err(Error::Unknown),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, Error};
    use api::QuestionType;

    #[test]
    fn parses_add_with_correct_marker() {
        assert_eq!(
            Command::parse("add radio Capital of France? | *Paris"),
            Ok(Command::Add {
                kind: QuestionType::SingleChoice,
                question: "Capital of France?".into(),
                answer: "Paris".into(),
                correct: true,
            })
        );
        assert_eq!(
            Command::parse("add checkbox Vowels? |  B "),
            Ok(Command::Add {
                kind: QuestionType::MultiChoice,
                question: "Vowels?".into(),
                answer: "B".into(),
                correct: false,
            })
        );
    }

    #[test]
    fn free_text_questions_need_no_answer() {
        assert_eq!(
            Command::parse("add short Your name?"),
            Ok(Command::Add {
                kind: QuestionType::ShortAnswer,
                question: "Your name?".into(),
                answer: String::new(),
                correct: false,
            })
        );
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(Command::parse("pick 1"), Ok(Command::Pick(0)));
        assert_eq!(Command::parse("del 2"), Ok(Command::DeleteQuestion(1)));
        assert_eq!(Command::parse("del 2 3"), Ok(Command::DeleteAnswer(1, 2)));
        assert!(matches!(Command::parse("pick 0"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse("del x"), Err(Error::Usage(_))));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse("   "), Err(Error::Empty));
        assert_eq!(Command::parse("dance"), Err(Error::Unknown));
        assert!(matches!(Command::parse("time -5"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse("add essay Why?"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse("select"), Err(Error::Usage(_))));
    }

    #[test]
    fn keeps_free_text_verbatim() {
        assert_eq!(Command::parse("time 15"), Ok(Command::Time(15)));
        assert_eq!(Command::parse("select Capitals of Europe"), Ok(Command::Select("Capitals of Europe".into())));
        assert_eq!(Command::parse("write Ada Lovelace"), Ok(Command::Write("Ada Lovelace".into())));
        assert_eq!(Command::parse("open /quiz/Geo"), Ok(Command::Open("/quiz/Geo".into())));
    }
}
