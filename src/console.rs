//! Console host for running the quiz in a terminal.
//!
//! Chat lines are read from stdin as `name: text`, and everything the engine
//! sends is rendered to stdout. Reward commands are only printed.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

use chatquiz::host::{
    BannerDisplay, Broadcaster, CommandDispatcher, Player, PlayerDirectory, PlayerId,
};
use chatquiz::markup::Message;
use chatquiz::Result;

use crate::screen::{create_screen, Screen};

/// Name used for lines typed without a `name:` prefix.
pub const DEFAULT_PLAYER: &str = "console";

/// Split a console line into its sender and message.
///
/// `"Alice: brasilia"` is sent by Alice; a line without a colon (or with an
/// empty name) is sent by [`DEFAULT_PLAYER`].
pub fn parse_chat_line(line: &str) -> (Player, String) {
    if let Some((name, text)) = line.split_once(':') {
        let name = name.trim();
        if !name.is_empty() && !name.contains(char::is_whitespace) {
            return (Player::new(name, name), text.trim().to_string());
        }
    }
    (
        Player::new(DEFAULT_PLAYER, DEFAULT_PLAYER),
        line.trim().to_string(),
    )
}

/// A host that renders to a terminal.
pub struct ConsoleHost {
    screen: Box<dyn Screen>,
    out: Mutex<Box<dyn Write + Send>>,
    players: Mutex<BTreeSet<PlayerId>>,
}

impl ConsoleHost {
    /// Create a console host writing to `out`.
    pub fn new(screen: Box<dyn Screen>, out: Box<dyn Write + Send>) -> Self {
        Self {
            screen,
            out: Mutex::new(out),
            players: Mutex::new(BTreeSet::new()),
        }
    }

    /// Create a console host writing to stdout.
    pub fn stdout(ansi_enabled: bool) -> Self {
        Self::new(create_screen(ansi_enabled), Box::new(io::stdout()))
    }

    /// Register a player as connected. Returns `true` on first sight.
    pub fn join(&self, player: &Player) -> bool {
        let joined = self
            .players
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(player.id.clone());
        if joined {
            info!(player = %player.name, "Player joined");
        }
        joined
    }

    /// Write a rendered line to the output.
    pub fn print(&self, message: &Message) {
        self.write_line(&self.screen.render(message));
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %e, "Failed to write console output");
        }
    }
}

impl Broadcaster for ConsoleHost {
    fn broadcast(&self, message: &Message) {
        self.print(message);
    }

    fn send_to(&self, player: &PlayerId, message: &Message) {
        self.write_line(&format!("[-> {player}] {}", self.screen.render(message)));
    }
}

impl BannerDisplay for ConsoleHost {
    fn show_banner(&self, player: &PlayerId, title: &Message, subtitle: &Message) {
        self.write_line(&format!(
            "[banner -> {player}] {} | {}",
            self.screen.render(title),
            self.screen.render(subtitle)
        ));
    }
}

impl CommandDispatcher for ConsoleHost {
    fn execute(&self, command: &str) -> Result<()> {
        info!(command, "Console command");
        self.write_line(&format!("[command] /{command}"));
        Ok(())
    }
}

impl PlayerDirectory for ConsoleHost {
    fn online_players(&self) -> Vec<PlayerId> {
        self.players
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}
