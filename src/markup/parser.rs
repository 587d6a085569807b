//! Tag scanner for bracketed markup.
//!
//! Recognizes `<name>`, `<name:argument>` and `</name>` where the name is
//! made of ASCII letters, digits and underscores. Anything else starting
//! with `<` is kept as literal text.

use super::message::Message;
use super::style::{named_color, parse_color_arg, parse_gradient_arg, StyleState};

/// A recognized tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tag<'a> {
    closing: bool,
    /// Lower-cased tag name.
    name: String,
    argument: Option<&'a str>,
}

/// Stack of nested style scopes. The root scope is never popped.
#[derive(Debug, Default)]
struct StyleStack {
    root: StyleState,
    scopes: Vec<StyleState>,
}

impl StyleStack {
    fn top(&self) -> &StyleState {
        self.scopes.last().unwrap_or(&self.root)
    }

    fn push(&mut self, state: StyleState) {
        self.scopes.push(state);
    }

    fn pop(&mut self) {
        self.scopes.pop();
    }

    fn reset(&mut self) {
        self.scopes.clear();
    }
}

/// Markup parser over a single input string.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the whole input into a container message.
    pub fn parse(mut self) -> Message {
        let mut root = Message::empty();
        let mut stack = StyleStack::default();
        let mut text_start = 0;

        while let Some((start, tag)) = self.next_tag() {
            if start > text_start {
                root.insert(stack.top().render(&self.input[text_start..start]));
            }
            apply_tag(&mut stack, &tag);
            text_start = self.pos;
        }

        if text_start < self.input.len() {
            root.insert(stack.top().render(&self.input[text_start..]));
        }

        root
    }

    /// Advance to the next well-formed tag, returning its start offset.
    fn next_tag(&mut self) -> Option<(usize, Tag<'a>)> {
        while let Some(offset) = self.input[self.pos..].find('<') {
            let start = self.pos + offset;
            if let Some((tag, end)) = match_tag(self.input, start) {
                self.pos = end;
                return Some((start, tag));
            }
            self.pos = start + 1;
        }
        self.pos = self.input.len();
        None
    }
}

/// Try to read a tag beginning at `start` (which holds `<`).
///
/// Returns the tag and the offset just past its closing `>`.
fn match_tag(input: &str, start: usize) -> Option<(Tag<'_>, usize)> {
    let bytes = input.as_bytes();
    let mut pos = start + 1;

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    while bytes
        .get(pos)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
    {
        pos += 1;
    }
    if pos == name_start {
        return None;
    }
    let name = input[name_start..pos].to_ascii_lowercase();

    let mut argument = None;
    if bytes.get(pos) == Some(&b':') {
        let arg_start = pos + 1;
        let arg_len = input[arg_start..].find('>')?;
        if arg_len == 0 {
            return None;
        }
        argument = Some(&input[arg_start..arg_start + arg_len]);
        pos = arg_start + arg_len;
    }

    if bytes.get(pos) != Some(&b'>') {
        return None;
    }

    Some((
        Tag {
            closing,
            name,
            argument,
        },
        pos + 1,
    ))
}

fn apply_tag(stack: &mut StyleStack, tag: &Tag<'_>) {
    if tag.closing {
        stack.pop();
        return;
    }

    if matches!(tag.name.as_str(), "reset" | "r") {
        stack.reset();
        return;
    }

    let next = derive_state(stack.top(), tag);
    stack.push(next);
}

/// Compute the scope opened by `tag`. Unknown tags copy the parent.
fn derive_state(current: &StyleState, tag: &Tag<'_>) -> StyleState {
    if let Some(color) = named_color(&tag.name) {
        return current.with_color(color);
    }

    match (tag.name.as_str(), tag.argument) {
        ("color" | "c" | "colour", Some(arg)) => match parse_color_arg(arg) {
            Some(color) => current.with_color(color),
            None => current.clone(),
        },
        ("gradient" | "grnt", Some(arg)) => {
            let mut colors = parse_gradient_arg(arg);
            match colors.len() {
                0 => current.clone(),
                1 => current.with_color(colors.remove(0)),
                _ => current.with_gradient(colors),
            }
        }
        ("bold" | "b", _) => current.with_bold(true),
        ("italic" | "i" | "em", _) => current.with_italic(true),
        ("underline" | "u", _) => current.with_underlined(true),
        ("monospace" | "mono", _) => current.with_monospace(true),
        ("link" | "url", Some(arg)) => current.with_link(arg),
        _ => current.clone(),
    }
}
