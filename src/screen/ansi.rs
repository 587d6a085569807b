//! ANSI escape sequence implementation.
//!
//! Colors use the 24-bit `38;2;r;g;b` form; links use OSC 8.

use super::Screen;
use chatquiz::markup::Rgb;

/// Escape character for ANSI sequences.
const ESC: char = '\x1b';

/// ANSI-capable screen implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiScreen;

impl Screen for AnsiScreen {
    fn fg(&self, color: Rgb) -> String {
        format!("{ESC}[38;2;{};{};{}m", color.r, color.g, color.b)
    }

    fn bold(&self) -> String {
        format!("{ESC}[1m")
    }

    fn italic(&self) -> String {
        format!("{ESC}[3m")
    }

    fn underline(&self) -> String {
        format!("{ESC}[4m")
    }

    fn reset(&self) -> String {
        format!("{ESC}[0m")
    }

    fn link(&self, text: &str, url: &str) -> String {
        format!("{ESC}]8;;{url}{ESC}\\{text}{ESC}]8;;{ESC}\\")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatquiz::markup::TextStyle;

    #[test]
    fn test_truecolor_fg() {
        let screen = AnsiScreen;
        assert_eq!(screen.fg(Rgb::new(255, 170, 0)), "\x1b[38;2;255;170;0m");
        assert_eq!(screen.fg(Rgb::new(0, 0, 0)), "\x1b[38;2;0;0;0m");
    }

    #[test]
    fn test_text_attributes() {
        let screen = AnsiScreen;
        assert_eq!(screen.bold(), "\x1b[1m");
        assert_eq!(screen.italic(), "\x1b[3m");
        assert_eq!(screen.underline(), "\x1b[4m");
        assert_eq!(screen.reset(), "\x1b[0m");
    }

    #[test]
    fn test_link() {
        let screen = AnsiScreen;
        assert_eq!(
            screen.link("site", "https://example.com"),
            "\x1b]8;;https://example.com\x1b\\site\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn test_styled_text_color_and_bold() {
        let screen = AnsiScreen;
        let style = TextStyle {
            color: Some(Rgb::new(255, 85, 85)),
            bold: true,
            ..TextStyle::default()
        };
        assert_eq!(
            screen.styled_text("Errado!", &style),
            "\x1b[38;2;255;85;85m\x1b[1mErrado!\x1b[0m"
        );
    }

    #[test]
    fn test_styled_text_monospace_only_is_unchanged() {
        let screen = AnsiScreen;
        let style = TextStyle {
            monospace: true,
            ..TextStyle::default()
        };
        assert_eq!(screen.styled_text("code", &style), "code");
    }
}
