//! Quiz questions as they appear in the configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of quiz round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizType {
    /// Free-form question; accents and case are ignored when checking.
    #[default]
    Quiz,
    /// First to type the exact phrase wins; only case is ignored.
    Type,
    /// Unscramble the shuffled word; accents and case are ignored.
    Scramble,
}

impl QuizType {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::Quiz => "QUIZ",
            QuizType::Type => "TYPE",
            QuizType::Scramble => "SCRAMBLE",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One configured question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDefinition {
    #[serde(rename = "type", alias = "Tipo", default)]
    pub quiz_type: QuizType,
    /// Question text, phrase to type, or the word to scramble.
    #[serde(alias = "Pergunta", default)]
    pub text: String,
    /// Accepted answers. The first one is the word shown scrambled.
    #[serde(alias = "Respostas", default)]
    pub answers: Vec<String>,
    /// Commands run for the winner, with `{player}` substituted.
    #[serde(alias = "ComandosAoAcertar", default)]
    pub reward_commands: Vec<String>,
}

impl QuizDefinition {
    /// Create a definition with no reward commands.
    pub fn new<I, S>(quiz_type: QuizType, text: impl Into<String>, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            quiz_type,
            text: text.into(),
            answers: answers.into_iter().map(Into::into).collect(),
            reward_commands: Vec::new(),
        }
    }

    /// Add reward commands.
    pub fn with_rewards<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reward_commands = commands.into_iter().map(Into::into).collect();
        self
    }

    /// The canonical answer (the first one listed).
    pub fn primary_answer(&self) -> Option<&str> {
        self.answers.first().map(String::as_str)
    }
}
