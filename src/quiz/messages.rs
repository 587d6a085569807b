//! Texts the engine sends to players.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::definition::{QuizDefinition, QuizType};
use crate::markup::{self, Message};

/// Prompt label replaced on TYPE and SCRAMBLE rounds.
const QUESTION_LABEL: &str = "Pergunta:";
/// Lines containing this get a type hint appended.
const ANSWER_HINT_MARKER: &str = "Digite sua resposta";

/// Values substituted into configured templates.
#[derive(Debug, Clone, Copy)]
pub struct Placeholders<'a> {
    /// `{player}`
    pub player: &'a str,
    /// `{pergunta}`: the text shown to players.
    pub question: &'a str,
    /// `{scramble}`: the shuffled word, empty outside SCRAMBLE rounds.
    pub scrambled: &'a str,
    /// `{tipo}`
    pub quiz_type: QuizType,
}

impl<'a> Placeholders<'a> {
    pub fn new(quiz_type: QuizType) -> Self {
        Self {
            player: "",
            question: "",
            scrambled: "",
            quiz_type,
        }
    }

    pub fn player(mut self, player: &'a str) -> Self {
        self.player = player;
        self
    }

    pub fn question(mut self, question: &'a str) -> Self {
        self.question = question;
        self
    }

    pub fn scrambled(mut self, scrambled: &'a str) -> Self {
        self.scrambled = scrambled;
        self
    }

    /// Substitute every placeholder in `template`.
    pub fn apply(&self, template: &str) -> String {
        template
            .replace("{player}", self.player)
            .replace("{pergunta}", self.question)
            .replace("{scramble}", self.scrambled)
            .replace("{tipo}", self.quiz_type.as_str())
    }
}

/// Build one pre-round announcement line.
///
/// After substitution, TYPE and SCRAMBLE rounds relabel the prompt and get
/// a short hint on the "answer in chat" line.
pub fn pre_round_line(template: &str, placeholders: &Placeholders<'_>) -> String {
    let mut line = placeholders.apply(template);

    let (label, hint) = match placeholders.quiz_type {
        QuizType::Quiz => return line,
        QuizType::Type => ("Digite:", " &7(rapido!)"),
        QuizType::Scramble => ("Desembaralhe:", " &7(desembaralhe!)"),
    };

    if line.contains(QUESTION_LABEL) {
        line = line.replace(QUESTION_LABEL, label);
    }
    if line.contains(ANSWER_HINT_MARKER) {
        line.push_str(hint);
    }
    line
}

/// Private reply to a wrong answer.
pub fn wrong_answer_text(quiz_type: QuizType) -> &'static str {
    match quiz_type {
        QuizType::Type => "&cErrado! &fDigite exatamente como mostrado.",
        QuizType::Scramble => "&cErrado! &fTente reorganizar as letras.",
        QuizType::Quiz => "&cResposta errada! &fTente novamente.",
    }
}

/// Broadcast when a round ends without a winner.
pub fn timeout_text(definition: &QuizDefinition) -> String {
    match (definition.quiz_type, definition.primary_answer()) {
        (QuizType::Scramble, Some(word)) => {
            format!("&6&lQUIZ &cNinguem acertou! &fA palavra era: &e{word}")
        }
        (QuizType::Type, Some(_)) => "&6&lQUIZ &cNinguem digitou a frase corretamente!".to_string(),
        _ => "&6&lQUIZ &cNinguem acertou a pergunta!".to_string(),
    }
}

/// Parse markup for sending, falling back to the raw text if the parser panics.
pub fn format_message(text: &str) -> Message {
    match panic::catch_unwind(AssertUnwindSafe(|| markup::parse(text))) {
        Ok(message) => message,
        Err(_) => {
            warn!(text, "Failed to format message, sending raw text");
            Message::raw(text)
        }
    }
}
