//! Configuration module for chatquiz.
//!
//! The configuration is a JSON document. Field names are camelCase; the
//! Portuguese names used by older configuration files are accepted too.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::quiz::{QuizDefinition, QuizType};
use crate::{QuizError, Result};

/// Default location of the configuration file, relative to the server root.
pub const DEFAULT_CONFIG_PATH: &str = "mods/ChatQuiz/ChatQuizConfig.json";

/// Title banner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Whether the banner is shown.
    #[serde(alias = "ativo", default = "default_banner_active")]
    pub active: bool,
    /// Banner title (markup).
    #[serde(alias = "titulo", default = "default_banner_title")]
    pub title: String,
    /// Banner subtitle (markup, placeholders allowed).
    #[serde(alias = "subtitulo", default)]
    pub subtitle: String,
}

fn default_banner_active() -> bool {
    true
}

fn default_banner_title() -> String {
    "QUIZ".to_string()
}

impl BannerConfig {
    pub fn new(active: bool, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            active,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    /// Delay between the end of one round and the start of the next.
    #[serde(alias = "intervaloInicioQuizSegundos", default = "default_interval")]
    pub interval_seconds_before_round: u64,
    /// How long a round accepts answers.
    #[serde(alias = "duracaoQuizSegundos", default = "default_round_duration")]
    pub round_duration_seconds: u64,
    /// Delay before a player is told their answer was wrong.
    #[serde(default = "default_wrong_answer_delay")]
    pub wrong_answer_reply_delay_millis: u64,
    /// Delay before the winner announcement is broadcast.
    #[serde(default = "default_win_announcement_delay")]
    pub win_announcement_delay_millis: u64,
    /// Lines broadcast when a round starts.
    #[serde(alias = "mensagemAntesQuizGlobal", default = "default_pre_round_lines")]
    pub pre_round_message_lines: Vec<String>,
    /// Lines broadcast when someone wins.
    #[serde(alias = "mensagemGlobalAoAcertar", default = "default_win_lines")]
    pub global_win_message_lines: Vec<String>,
    /// Banner shown when a round starts.
    #[serde(alias = "bannerIniciarQuiz", default = "default_start_banner")]
    pub start_banner: BannerConfig,
    /// Banner shown when someone wins.
    #[serde(alias = "bannerGanhadorQuiz", default = "default_win_banner")]
    pub win_banner: BannerConfig,
    /// Commands run for every winner, before the question's own rewards.
    #[serde(alias = "comandosGlobaisAoAcertar", default = "default_global_rewards")]
    pub global_reward_commands: Vec<String>,
    /// Question pool.
    #[serde(alias = "perguntas", default = "default_questions")]
    pub questions: Vec<QuizDefinition>,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_interval() -> u64 {
    300 // 5 minutes
}

fn default_round_duration() -> u64 {
    60
}

fn default_wrong_answer_delay() -> u64 {
    100
}

fn default_win_announcement_delay() -> u64 {
    200
}

fn default_pre_round_lines() -> Vec<String> {
    vec![
        "&6&lQUIZ".to_string(),
        "&fPergunta: &e{pergunta}".to_string(),
        "&7Digite sua resposta no chat".to_string(),
    ]
}

fn default_win_lines() -> Vec<String> {
    vec![
        "&6&lQUIZ".to_string(),
        "&fParabens &a{player}&f!".to_string(),
        "&fVoce acertou a pergunta corretamente.".to_string(),
    ]
}

fn default_start_banner() -> BannerConfig {
    BannerConfig::new(true, "QUIZ", "Responda a pergunta no chat!")
}

fn default_win_banner() -> BannerConfig {
    BannerConfig::new(true, "QUIZ", "{player} acertou a pergunta!")
}

fn default_global_rewards() -> Vec<String> {
    vec!["give {player} Ingredient_Bar_Iron --quantity=10".to_string()]
}

fn default_questions() -> Vec<QuizDefinition> {
    let reward = ["give {player} Ingredient_Bar_Gold --quantity=1"];
    vec![
        QuizDefinition::new(
            QuizType::Quiz,
            "Qual é a capital do Brasil?",
            ["brasilia", "brasília"],
        )
        .with_rewards(reward),
        QuizDefinition::new(
            QuizType::Type,
            "Digite rapidamente: Hytale é incrível!",
            ["Hytale é incrível!"],
        )
        .with_rewards(reward),
        QuizDefinition::new(QuizType::Scramble, "hytaleserver", ["hytaleserver"])
            .with_rewards(reward),
    ]
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            interval_seconds_before_round: default_interval(),
            round_duration_seconds: default_round_duration(),
            wrong_answer_reply_delay_millis: default_wrong_answer_delay(),
            win_announcement_delay_millis: default_win_announcement_delay(),
            pre_round_message_lines: default_pre_round_lines(),
            global_win_message_lines: default_win_lines(),
            start_banner: default_start_banner(),
            win_banner: default_win_banner(),
            global_reward_commands: default_global_rewards(),
            questions: default_questions(),
            logging: LoggingConfig::default(),
        }
    }
}

impl QuizConfig {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| QuizError::Config(format!("config parse error: {e}")))
    }

    /// Write the configuration as pretty-printed JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load the configuration, falling back to the built-in default.
    ///
    /// A missing, unreadable or invalid file is replaced by the default
    /// configuration, which is then written back to `path`.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "Configuration not found, creating default");
            return Self::persist_default(path);
        }

        match Self::load(path).and_then(|config| config.validate().map(|()| config)) {
            Ok(mut config) => {
                config.apply_env_overrides();
                config.retain_answerable_questions();
                info!(
                    interval_secs = config.interval_seconds_before_round,
                    round_secs = config.round_duration_seconds,
                    questions = config.questions.len(),
                    "Configuration loaded"
                );
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid configuration, using default");
                Self::persist_default(path)
            }
        }
    }

    fn persist_default(path: &Path) -> Self {
        let config = Self::default();
        match config.save(path) {
            Ok(()) => info!(path = %path.display(), "Default configuration saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to save default configuration"),
        }
        config
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CHATQUIZ_INTERVAL_SECS`: seconds between rounds
    /// - `CHATQUIZ_ROUND_SECS`: round duration in seconds
    pub fn apply_env_overrides(&mut self) {
        if let Some(secs) = env_seconds("CHATQUIZ_INTERVAL_SECS") {
            self.interval_seconds_before_round = secs;
        }
        if let Some(secs) = env_seconds("CHATQUIZ_ROUND_SECS").filter(|&s| s > 0) {
            self.round_duration_seconds = secs;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the round duration is zero.
    pub fn validate(&self) -> Result<()> {
        if self.round_duration_seconds == 0 {
            return Err(QuizError::Validation(
                "roundDurationSeconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Drop questions that have no accepted answer. Returns how many were dropped.
    pub fn retain_answerable_questions(&mut self) -> usize {
        let before = self.questions.len();
        self.questions.retain(|question| {
            let answerable = question.answers.iter().any(|a| !a.trim().is_empty());
            if !answerable {
                warn!(text = %question.text, "Skipping question without answers");
            }
            answerable
        });
        before - self.questions.len()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds_before_round)
    }

    pub fn round_duration(&self) -> Duration {
        Duration::from_secs(self.round_duration_seconds)
    }

    pub fn wrong_answer_delay(&self) -> Duration {
        Duration::from_millis(self.wrong_answer_reply_delay_millis)
    }

    pub fn win_announcement_delay(&self) -> Duration {
        Duration::from_millis(self.win_announcement_delay_millis)
    }
}

fn env_seconds(name: &str) -> Option<u64> {
    let value = std::env::var(name).ok()?;
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!(variable = name, value = %value, "Ignoring non-numeric override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();

        assert_eq!(config.interval_seconds_before_round, 300);
        assert_eq!(config.round_duration_seconds, 60);
        assert_eq!(config.wrong_answer_delay(), Duration::from_millis(100));
        assert_eq!(config.win_announcement_delay(), Duration::from_millis(200));
        assert_eq!(config.pre_round_message_lines.len(), 3);
        assert!(config.start_banner.active);
        assert_eq!(config.win_banner.subtitle, "{player} acertou a pergunta!");
        assert_eq!(config.questions.len(), 3);
        assert_eq!(config.questions[2].quiz_type, QuizType::Scramble);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "intervalSecondsBeforeRound": 120,
            "roundDurationSeconds": 30,
            "wrongAnswerReplyDelayMillis": 0,
            "preRoundMessageLines": ["&6QUIZ {tipo}", "{pergunta}"],
            "globalWinMessageLines": ["{player} venceu"],
            "startBanner": {"active": false, "title": "Q", "subtitle": "s"},
            "winBanner": {"active": true, "title": "W", "subtitle": "{player}"},
            "globalRewardCommands": [],
            "questions": [
                {"type": "QUIZ", "text": "2+2?", "answers": ["4", "quatro"], "rewardCommands": []}
            ],
            "logging": {"level": "debug", "file": "logs/quiz.log"}
        }"#;

        let config = QuizConfig::parse(json).unwrap();

        assert_eq!(config.interval_seconds_before_round, 120);
        assert_eq!(config.round_duration_seconds, 30);
        assert_eq!(config.wrong_answer_reply_delay_millis, 0);
        assert_eq!(config.win_announcement_delay_millis, 200);
        assert_eq!(config.pre_round_message_lines[0], "&6QUIZ {tipo}");
        assert!(!config.start_banner.active);
        assert_eq!(config.win_banner.title, "W");
        assert!(config.global_reward_commands.is_empty());
        assert_eq!(config.questions.len(), 1);
        assert_eq!(config.questions[0].answers, vec!["4", "quatro"]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("logs/quiz.log"));
    }

    #[test]
    fn test_parse_portuguese_field_names() {
        let json = r#"{
            "intervaloInicioQuizSegundos": 10,
            "duracaoQuizSegundos": 5,
            "bannerIniciarQuiz": {"ativo": false, "titulo": "T", "subtitulo": "S"},
            "perguntas": [{"Tipo": "SCRAMBLE", "Pergunta": "casa", "Respostas": ["casa"]}]
        }"#;

        let config = QuizConfig::parse(json).unwrap();

        assert_eq!(config.interval_seconds_before_round, 10);
        assert_eq!(config.round_duration_seconds, 5);
        assert!(!config.start_banner.active);
        assert_eq!(config.start_banner.subtitle, "S");
        assert_eq!(config.questions[0].quiz_type, QuizType::Scramble);
    }

    #[test]
    fn test_parse_empty_object_uses_defaults() {
        let config = QuizConfig::parse("{}").unwrap();
        assert_eq!(config, QuizConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = QuizConfig::parse("this is not json");

        assert!(result.is_err());
        if let Err(QuizError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = QuizConfig::load("nonexistent.json");
        assert!(matches!(result, Err(QuizError::Io(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/ChatQuizConfig.json");

        let mut config = QuizConfig::default();
        config.round_duration_seconds = 42;
        config.save(&path).unwrap();

        let loaded = QuizConfig::load(&path).unwrap();
        assert_eq!(loaded.round_duration_seconds, 42);
    }

    #[test]
    fn test_load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mods/ChatQuiz/ChatQuizConfig.json");

        let config = QuizConfig::load_or_init(&path);

        assert_eq!(config.questions.len(), 3);
        assert!(path.exists());
        assert!(QuizConfig::load(&path).is_ok());
    }

    #[test]
    fn test_load_or_init_replaces_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ChatQuizConfig.json");
        std::fs::write(&path, "{ broken").unwrap();

        let config = QuizConfig::load_or_init(&path);

        assert_eq!(config.interval_seconds_before_round, 300);
        assert!(QuizConfig::load(&path).is_ok());
    }

    #[test]
    fn test_load_or_init_drops_unanswerable_questions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ChatQuizConfig.json");
        std::fs::write(
            &path,
            r#"{"questions": [
                {"type": "QUIZ", "text": "ok?", "answers": ["sim"]},
                {"type": "QUIZ", "text": "broken", "answers": []}
            ]}"#,
        )
        .unwrap();

        let config = QuizConfig::load_or_init(&path);

        assert_eq!(config.questions.len(), 1);
        assert_eq!(config.questions[0].text, "ok?");
    }

    #[test]
    fn test_validate_zero_round_duration() {
        let config = QuizConfig {
            round_duration_seconds: 0,
            ..QuizConfig::default()
        };

        let result = config.validate();
        assert!(matches!(result, Err(QuizError::Validation(_))));
    }

    #[test]
    fn test_retain_answerable_questions() {
        let mut config = QuizConfig::default();
        config
            .questions
            .push(QuizDefinition::new(QuizType::Quiz, "?", ["  "]));

        assert_eq!(config.retain_answerable_questions(), 1);
        assert_eq!(config.questions.len(), 3);
    }
}
