//! Quiz engine.
//!
//! - `definition`: question types and configured questions
//! - `validate`: answer checking and word scrambling
//! - `messages`: announcement texts and placeholder substitution
//! - `engine`: the round state machine and its timers

mod definition;
mod engine;
pub mod messages;
pub mod validate;

pub use definition::{QuizDefinition, QuizType};
pub use engine::{AnswerOutcome, QuizEngine, RoundSnapshot};
pub use messages::{format_message, Placeholders};
pub use validate::{is_correct, normalize, scramble};
