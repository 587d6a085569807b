//! Terminal rendering of chat messages for the console binary.
//!
//! Provides ANSI true-color escape sequences for styled messages and a plain
//! text fallback for terminals (or log files) without escape support.

mod ansi;
mod plain;

pub use ansi::AnsiScreen;
pub use plain::PlainScreen;

use chatquiz::markup::{Message, Rgb, TextStyle};

/// Screen output trait for styled chat text.
///
/// Implementations include `AnsiScreen` for ANSI-capable terminals and
/// `PlainScreen` for everything else.
pub trait Screen: Send + Sync {
    /// Set a 24-bit foreground color.
    fn fg(&self, color: Rgb) -> String;

    /// Enable bold text.
    fn bold(&self) -> String;

    /// Enable italic text.
    fn italic(&self) -> String;

    /// Enable underlined text.
    fn underline(&self) -> String;

    /// Reset all text attributes to default.
    fn reset(&self) -> String;

    /// Wrap already-styled text in a hyperlink to `url`.
    fn link(&self, text: &str, url: &str) -> String;

    /// Render one run of text with its style.
    ///
    /// Monospace has no terminal equivalent and is ignored.
    fn styled_text(&self, text: &str, style: &TextStyle) -> String {
        if style.is_plain() {
            return text.to_string();
        }

        let mut prefix = String::new();
        if let Some(color) = style.color {
            prefix.push_str(&self.fg(color));
        }
        if style.bold {
            prefix.push_str(&self.bold());
        }
        if style.italic {
            prefix.push_str(&self.italic());
        }
        if style.underlined {
            prefix.push_str(&self.underline());
        }

        let body = if prefix.is_empty() {
            text.to_string()
        } else {
            format!("{prefix}{text}{}", self.reset())
        };

        match style.link.as_deref() {
            Some(url) => self.link(&body, url),
            None => body,
        }
    }

    /// Render a whole message tree to a single line.
    fn render(&self, message: &Message) -> String {
        message
            .spans()
            .iter()
            .map(|span| self.styled_text(span.text, span.style))
            .collect()
    }
}

/// Create a screen instance based on ANSI support.
pub fn create_screen(ansi_enabled: bool) -> Box<dyn Screen> {
    if ansi_enabled {
        Box::new(AnsiScreen)
    } else {
        Box::new(PlainScreen)
    }
}
