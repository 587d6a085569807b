//! Interfaces the quiz engine uses to talk to the game server.
//!
//! The server (or a test double) implements these traits; the engine only
//! ever sees them through a [`Host`] bundle.

use std::fmt;
use std::sync::Arc;

use crate::markup::Message;
use crate::Result;

/// Stable identifier of a connected player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sender of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Player ID used for direct replies.
    pub id: PlayerId,
    /// Display name used in announcements and reward commands.
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
        }
    }
}

/// Chat delivery.
pub trait Broadcaster: Send + Sync {
    /// Send a message to every connected player.
    fn broadcast(&self, message: &Message);

    /// Send a message to a single player.
    fn send_to(&self, player: &PlayerId, message: &Message);
}

/// On-screen title banners.
pub trait BannerDisplay: Send + Sync {
    fn show_banner(&self, player: &PlayerId, title: &Message, subtitle: &Message);
}

/// Console command execution, used for rewards.
pub trait CommandDispatcher: Send + Sync {
    /// Run `command` with console privileges.
    fn execute(&self, command: &str) -> Result<()>;
}

/// The registry of connected players.
pub trait PlayerDirectory: Send + Sync {
    fn online_players(&self) -> Vec<PlayerId>;
}

/// The set of collaborators handed to the engine.
#[derive(Clone)]
pub struct Host {
    pub broadcaster: Arc<dyn Broadcaster>,
    pub banners: Arc<dyn BannerDisplay>,
    pub commands: Arc<dyn CommandDispatcher>,
    pub players: Arc<dyn PlayerDirectory>,
}

impl Host {
    /// Build a host from one value implementing every collaborator trait.
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: Broadcaster + BannerDisplay + CommandDispatcher + PlayerDirectory + 'static,
    {
        Self {
            broadcaster: shared.clone(),
            banners: shared.clone(),
            commands: shared.clone(),
            players: shared,
        }
    }

    /// Show a banner to every connected player.
    pub fn show_banner_to_all(&self, title: &Message, subtitle: &Message) {
        for player in self.players.online_players() {
            self.banners.show_banner(&player, title, subtitle);
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
