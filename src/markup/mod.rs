//! Chat markup for outgoing messages.
//!
//! Two notations are accepted and may be mixed:
//! - Legacy two-character codes: `&0`-`&9` and `&a`-`&f` for colors,
//!   `&l` bold, `&o` italic, `&n` underline, `&m` strikethrough, `&r` reset.
//! - Bracketed tags: `<gold>`, `<color:#ff8800>`, `<gradient:red:blue>`,
//!   `<b>`, `<i>`, `<u>`, `<mono>`, `<link:https://...>`, `<reset>`, closed
//!   with `</...>`.
//!
//! Parsing never fails. Anything that is not understood is either kept as
//! literal text or ignored.

mod message;
mod parser;
mod style;

pub use message::{Message, Span, TextStyle};
pub use parser::Parser;
pub use style::{interpolate, named_color, Rgb, StyleState};

/// Legacy color codes and the tags they stand for.
const LEGACY_CODES: &[(char, &str)] = &[
    ('0', "<black>"),
    ('1', "<dark_blue>"),
    ('2', "<dark_green>"),
    ('3', "<dark_aqua>"),
    ('4', "<dark_red>"),
    ('5', "<dark_purple>"),
    ('6', "<gold>"),
    ('7', "<gray>"),
    ('8', "<dark_gray>"),
    ('9', "<blue>"),
    ('a', "<green>"),
    ('b', "<aqua>"),
    ('c', "<red>"),
    ('d', "<light_purple>"),
    ('e', "<yellow>"),
    ('f', "<white>"),
    ('l', "<b>"),
    ('o', "<i>"),
    ('n', "<u>"),
    ('m', "<s>"),
    ('r', "<reset>"),
];

fn legacy_tag(code: char) -> Option<&'static str> {
    LEGACY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, tag)| *tag)
}

/// Replace every legacy `&x` code with its bracket tag.
///
/// Codes are lower-case only; an `&` not followed by a known code is kept.
pub fn legacy_to_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '&' {
            if let Some(tag) = chars.peek().copied().and_then(legacy_tag) {
                out.push_str(tag);
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }

    out
}

/// Parse markup into a styled message.
pub fn parse(text: &str) -> Message {
    if !text.contains('&') && !text.contains('<') {
        return Message::raw(text);
    }

    let translated = legacy_to_tags(text);
    if !translated.contains('<') {
        return Message::raw(translated);
    }

    Parser::new(&translated).parse()
}

/// Parse optional markup; `None` yields an empty message.
pub fn parse_optional(text: Option<&str>) -> Message {
    text.map(parse).unwrap_or_else(|| Message::raw(""))
}
