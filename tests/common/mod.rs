//! Test helpers for quiz integration tests.
//!
//! Provides a recording host and helpers for driving paused tokio time.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chatquiz::{
    BannerDisplay, Broadcaster, CommandDispatcher, Host, Message, PlayerDirectory, PlayerId,
    QuizConfig, QuizDefinition, QuizEngine, QuizError, Result,
};

/// Everything a host was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Broadcast(String),
    Direct(PlayerId, String),
    Banner(PlayerId, String, String),
    Command(String),
}

/// Host double that records every call as plain text.
#[derive(Default)]
pub struct TestHost {
    events: Mutex<Vec<Event>>,
    players: Vec<PlayerId>,
    rejected: Vec<String>,
}

impl TestHost {
    /// Create a host with the given connected players.
    pub fn with_players(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            players: names.iter().map(|name| PlayerId::new(*name)).collect(),
            ..Self::default()
        })
    }

    /// Create a host that fails commands containing any of `fragments`.
    pub fn rejecting(names: &[&str], fragments: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            players: names.iter().map(|name| PlayerId::new(*name)).collect(),
            rejected: fragments.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        })
    }

    pub fn host(self: &Arc<Self>) -> Host {
        Host::from_shared(Arc::clone(self))
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Broadcast(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn direct_to(&self, player: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Direct(id, text) if id.as_str() == player => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Command(command) => Some(command),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Broadcaster for TestHost {
    fn broadcast(&self, message: &Message) {
        self.record(Event::Broadcast(message.plain_text()));
    }

    fn send_to(&self, player: &PlayerId, message: &Message) {
        self.record(Event::Direct(player.clone(), message.plain_text()));
    }
}

impl BannerDisplay for TestHost {
    fn show_banner(&self, player: &PlayerId, title: &Message, subtitle: &Message) {
        self.record(Event::Banner(
            player.clone(),
            title.plain_text(),
            subtitle.plain_text(),
        ));
    }
}

impl CommandDispatcher for TestHost {
    fn execute(&self, command: &str) -> Result<()> {
        self.record(Event::Command(command.to_string()));
        if self.rejected.iter().any(|f| command.contains(f.as_str())) {
            return Err(QuizError::Command(format!("unknown command: {command}")));
        }
        Ok(())
    }
}

impl PlayerDirectory for TestHost {
    fn online_players(&self) -> Vec<PlayerId> {
        self.players.clone()
    }
}

/// A configuration with short timers and the given questions.
pub fn quick_config(questions: Vec<QuizDefinition>) -> QuizConfig {
    QuizConfig {
        interval_seconds_before_round: 30,
        round_duration_seconds: 20,
        questions,
        ..QuizConfig::default()
    }
}

/// Create an engine bound to `host`.
pub fn engine(config: QuizConfig, host: &Arc<TestHost>) -> QuizEngine {
    QuizEngine::new(config, host.host()).unwrap()
}

/// Let paused time run forward and the woken tasks finish.
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}
