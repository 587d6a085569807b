mod console;
mod screen;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use chatquiz::command::{self, ChatInput};
use chatquiz::config::DEFAULT_CONFIG_PATH;
use chatquiz::quiz::{format_message, QuizEngine};
use chatquiz::{Host, QuizConfig};

use console::{parse_chat_line, ConsoleHost};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Logging settings come from the file if it is readable
    let logging = QuizConfig::load(&config_path)
        .map(|config| config.logging)
        .unwrap_or_default();
    if let Err(e) = chatquiz::logging::init(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        chatquiz::logging::init_console_only(&logging.level);
    }

    info!("ChatQuiz console");
    let config = QuizConfig::load_or_init(&config_path);

    let ansi = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let console = Arc::new(ConsoleHost::stdout(ansi));
    let engine = match QuizEngine::new(config, Host::from_shared(Arc::clone(&console))) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to create quiz engine: {e}");
            return;
        }
    };
    engine.start_cycle();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => handle_line(&engine, &console, &config_path, &line),
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read stdin: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    engine.cancel();
    info!("ChatQuiz stopped");
}

fn handle_line(engine: &QuizEngine, console: &ConsoleHost, config_path: &Path, line: &str) {
    match command::parse_input(line) {
        ChatInput::Message(text) if text.is_empty() => {}
        ChatInput::Message(_) => {
            let (player, text) = parse_chat_line(line);
            console.join(&player);
            engine.on_chat_message(&player, &text);
        }
        ChatInput::Command(cmd) => {
            let reply = command::execute(engine, &cmd, config_path);
            for reply_line in reply.lines() {
                console.print(&format_message(reply_line));
            }
        }
        ChatInput::Other(name) => {
            warn!(command = %name, "Unknown command");
        }
    }
}
