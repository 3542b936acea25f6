pub mod error;

mod file;
mod memory;

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Durable key under which the whole quiz collection is kept.
pub const QUIZZES_KEY: &str = "quizzes";

/// Session key holding the progress of an attempt at the given quiz.
pub fn progress_key(quiz: &str) -> String {
    format!("quiz-progress-{quiz}")
}

/// Wholesale key-value persistence. Every write replaces the previous value;
/// there is no partial update and the last writer wins.
pub trait Storage: Send + Sync {
    fn load(&self, key: &str) -> error::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> error::Result<()>;
    /// Removes every key.
    fn clear(&self) -> error::Result<()>;
}

pub type SharedStorage = Arc<dyn Storage>;

pub fn load_json<T>(storage: &dyn Storage, key: &str) -> error::Result<Option<T>>
where
    T: DeserializeOwned,
{
    match storage.load(key)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

pub fn save_json<T>(storage: &dyn Storage, key: &str, value: &T) -> error::Result<()>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value).map_err(|_| error::Error::Fatal)?;
    storage.save(key, &text)
}
