//! The `/chatquiz` command.
//!
//! `/chatquiz` on its own (or `/chatquiz start`) cancels the running round
//! and starts a new one immediately. `stop`, `reload`, `status` and `help`
//! are also available.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::config::QuizConfig;
use crate::quiz::QuizEngine;
use crate::Result;

/// Name of the command, without the slash.
pub const COMMAND_NAME: &str = "chatquiz";

/// Result of parsing a chat input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// Regular chat message.
    Message(String),
    /// A `/chatquiz` command.
    Command(QuizCommand),
    /// Some other slash command, by name.
    Other(String),
}

/// A parsed `/chatquiz` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    /// Cancel the current round and start a new one.
    Start,
    /// Cancel the current round and stop cycling.
    Stop,
    /// Re-read the configuration file.
    Reload,
    /// Show the running round.
    Status,
    /// Show command help.
    Help,
    /// Unknown subcommand.
    Unknown(String),
}

impl QuizCommand {
    /// Get the subcommand name.
    pub fn name(&self) -> &str {
        match self {
            QuizCommand::Start => "start",
            QuizCommand::Stop => "stop",
            QuizCommand::Reload => "reload",
            QuizCommand::Status => "status",
            QuizCommand::Help => "help",
            QuizCommand::Unknown(sub) => sub,
        }
    }
}

impl fmt::Display for QuizCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{COMMAND_NAME} {}", self.name())
    }
}

/// Parse a chat input line into a message or command.
pub fn parse_input(input: &str) -> ChatInput {
    let trimmed = input.trim();

    let Some(without_slash) = trimmed.strip_prefix('/') else {
        return ChatInput::Message(trimmed.to_string());
    };

    let mut words = without_slash.split_whitespace();
    let name = words.next().unwrap_or_default();
    if !name.eq_ignore_ascii_case(COMMAND_NAME) {
        return ChatInput::Other(name.to_string());
    }

    let command = match words.next().map(str::to_lowercase).as_deref() {
        None | Some("start" | "iniciar") => QuizCommand::Start,
        Some("stop" | "parar" | "cancel") => QuizCommand::Stop,
        Some("reload" | "recarregar") => QuizCommand::Reload,
        Some("status") => QuizCommand::Status,
        Some("help" | "ajuda" | "?") => QuizCommand::Help,
        Some(other) => QuizCommand::Unknown(other.to_string()),
    };

    ChatInput::Command(command)
}

/// Subcommand information for help display.
pub struct CommandInfo {
    /// Subcommand name.
    pub name: &'static str,
    /// Subcommand aliases.
    pub aliases: &'static [&'static str],
    /// Subcommand description.
    pub description: &'static str,
}

/// Get all available subcommand information.
pub fn get_command_help() -> Vec<CommandInfo> {
    vec![
        CommandInfo {
            name: "start",
            aliases: &["iniciar"],
            description: "Cancela o quiz atual e inicia outro",
        },
        CommandInfo {
            name: "stop",
            aliases: &["parar", "cancel"],
            description: "Cancela o quiz atual e o ciclo automatico",
        },
        CommandInfo {
            name: "reload",
            aliases: &["recarregar"],
            description: "Recarrega a configuracao",
        },
        CommandInfo {
            name: "status",
            aliases: &[],
            description: "Mostra o quiz em andamento",
        },
        CommandInfo {
            name: "help",
            aliases: &["ajuda", "?"],
            description: "Mostra esta ajuda",
        },
    ]
}

/// Format the help message (markup) for display.
pub fn format_help() -> String {
    let mut lines = vec![format!("&6&l/{COMMAND_NAME}")];

    for info in get_command_help() {
        let mut line = format!("&e/{COMMAND_NAME} {}", info.name);
        if !info.aliases.is_empty() {
            line.push_str(&format!(" &7({})", info.aliases.join(", ")));
        }
        line.push_str(&format!(" &f- {}", info.description));
        lines.push(line);
    }

    lines.join("\n")
}

/// Read, check and clean up the configuration at `path` without touching the file.
pub fn reload_config(path: &Path) -> Result<QuizConfig> {
    let mut config = QuizConfig::load(path)?;
    config.validate()?;
    config.apply_env_overrides();
    config.retain_answerable_questions();
    Ok(config)
}

/// Run a subcommand against the engine and return the reply (markup).
pub fn execute(engine: &QuizEngine, command: &QuizCommand, config_path: &Path) -> String {
    match command {
        QuizCommand::Start => {
            if engine.force_start() {
                info!("Quiz started by command");
                "&aQuiz iniciado!".to_string()
            } else {
                "&cNenhuma pergunta configurada.".to_string()
            }
        }
        QuizCommand::Stop => {
            engine.cancel();
            "&eQuiz cancelado.".to_string()
        }
        QuizCommand::Reload => match reload_config(config_path) {
            Ok(config) => {
                let count = config.questions.len();
                engine.reload(config);
                format!("&aConfiguracao recarregada ({count} perguntas).")
            }
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "Reload failed");
                format!("&cFalha ao recarregar: {e}")
            }
        },
        QuizCommand::Status => match engine.current_round() {
            Some(round) => format!(
                "&6Quiz #{} &7[{}] &f{}",
                round.id, round.quiz_type, round.displayed
            ),
            None => "&7Nenhum quiz em andamento.".to_string(),
        },
        QuizCommand::Help => format_help(),
        QuizCommand::Unknown(sub) => {
            format!("&cSubcomando desconhecido: {sub}. Use /{COMMAND_NAME} help")
        }
    }
}
