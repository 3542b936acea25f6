use super::error;

const ATTEMPT_PREFIX: &str = "/quiz";

/// The two pages of the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Quiz list and editor.
    Entry,
    Attempt { name: Box<str> },
}

impl Route {
    pub fn attempt(name: &str) -> error::Result<Self> {
        if name.is_empty() {
            return Err(error::Error::MissingQuizName);
        }
        Ok(Self::Attempt { name: name.into() })
    }

    pub fn parse(path: &str) -> error::Result<Self> {
        if path.is_empty() || path == "/" {
            return Ok(Self::Entry);
        }

        let rest = path.strip_prefix(ATTEMPT_PREFIX).ok_or(error::Error::UnknownRoute)?;
        match rest.strip_prefix('/') {
            Some(name) => Self::attempt(name),
            None if rest.is_empty() => Err(error::Error::MissingQuizName),
            None => Err(error::Error::UnknownRoute),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Entry => String::from("/"),
            Self::Attempt { name } => format!("{ATTEMPT_PREFIX}/{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{error::Error, Route};

    #[test]
    fn parses_entry() {
        assert_eq!(Route::parse("/"), Ok(Route::Entry));
        assert_eq!(Route::parse(""), Ok(Route::Entry));
    }

    #[test]
    fn parses_attempt() {
        assert_eq!(Route::parse("/quiz/Geo"), Ok(Route::Attempt { name: "Geo".into() }));
        assert_eq!(Route::parse("/quiz/Capitals of Europe"), Ok(Route::Attempt { name: "Capitals of Europe".into() }));
        assert_eq!(Route::attempt("Geo").unwrap().path(), "/quiz/Geo");
    }

    #[test]
    fn requires_quiz_name() {
        assert_eq!(Route::parse("/quiz/"), Err(Error::MissingQuizName));
        assert_eq!(Route::parse("/quiz"), Err(Error::MissingQuizName));
        assert_eq!(Route::attempt(""), Err(Error::MissingQuizName));
        assert_eq!(Error::MissingQuizName.to_string(), "Error: Quiz name is required");
    }

    #[test]
    fn rejects_other_paths() {
        assert_eq!(Route::parse("/quizzes"), Err(Error::UnknownRoute));
        assert_eq!(Route::parse("/admin"), Err(Error::UnknownRoute));
    }
}
