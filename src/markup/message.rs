//! Structured chat messages produced by the markup parser.

use serde::Serialize;

use super::style::Rgb;

/// Formatting applied to a single text node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underlined: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub monospace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TextStyle {
    /// True when no formatting is set.
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }
}

/// A tree of styled text.
///
/// A node carries its own text and style followed by any children. Parsed
/// markup yields an unstyled container whose children are the styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    text: String,
    #[serde(skip_serializing_if = "TextStyle::is_plain")]
    style: TextStyle,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Message>,
}

/// A leaf of a flattened [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub style: &'a TextStyle,
}

impl Message {
    /// Unstyled text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// An empty container for children.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Text with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn insert(&mut self, child: Message) {
        self.children.push(child);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn children(&self) -> &[Message] {
        &self.children
    }

    /// Flatten the tree into its non-empty text leaves, in display order.
    pub fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();
        self.collect_spans(&mut spans);
        spans
    }

    fn collect_spans<'a>(&'a self, spans: &mut Vec<Span<'a>>) {
        if !self.text.is_empty() {
            spans.push(Span {
                text: &self.text,
                style: &self.style,
            });
        }
        for child in &self.children {
            child.collect_spans(spans);
        }
    }

    /// The message text with all formatting removed.
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(|span| span.text).collect()
    }
}
