//! Plain text screen implementation.
//!
//! Provides a no-op implementation of the Screen trait for terminals
//! that do not support ANSI escape sequences.

use super::Screen;
use chatquiz::markup::Rgb;

/// Plain text screen implementation (no ANSI support).
///
/// Attribute methods return empty strings; links are written out after
/// their text so the URL is not lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainScreen;

impl Screen for PlainScreen {
    fn fg(&self, _color: Rgb) -> String {
        String::new()
    }

    fn bold(&self) -> String {
        String::new()
    }

    fn italic(&self) -> String {
        String::new()
    }

    fn underline(&self) -> String {
        String::new()
    }

    fn reset(&self) -> String {
        String::new()
    }

    fn link(&self, text: &str, url: &str) -> String {
        format!("{text} ({url})")
    }
}
