#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod progress;
pub mod quiz;

pub use progress::{format_clock, AttemptProgress, QuestionStatus};
pub use quiz::{Answer, LaunchPayload, Question, QuestionType, Quiz};
