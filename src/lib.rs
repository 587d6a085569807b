//! ChatQuiz - automatic chat quiz rounds for multiplayer game servers
//!
//! Periodically asks every connected player a question, checks chat
//! messages as answers, and rewards the first correct one. Outgoing text is
//! written in a small color markup language (see [`markup`]).

pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod markup;
pub mod quiz;

pub use config::{BannerConfig, LoggingConfig, QuizConfig};
pub use error::{QuizError, Result};
pub use host::{BannerDisplay, Broadcaster, CommandDispatcher, Host, Player, PlayerDirectory, PlayerId};
pub use markup::Message;
pub use quiz::{AnswerOutcome, QuizDefinition, QuizEngine, QuizType, RoundSnapshot};
