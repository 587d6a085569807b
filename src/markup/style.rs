//! Colors and the immutable style state used while scanning markup.

use std::fmt;

use serde::{Serialize, Serializer};

use super::message::{Message, TextStyle};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    ///
    /// Every `#` is stripped first; anything that is not exactly six hex
    /// digits afterwards yields `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let clean: String = hex.chars().filter(|&c| c != '#').collect();
        if clean.len() != 6 || !clean.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&clean[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The sixteen classic chat colors, addressable by name.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("dark_blue", Rgb::new(0, 0, 170)),
    ("dark_green", Rgb::new(0, 170, 0)),
    ("dark_aqua", Rgb::new(0, 170, 170)),
    ("dark_red", Rgb::new(170, 0, 0)),
    ("dark_purple", Rgb::new(170, 0, 170)),
    ("gold", Rgb::new(255, 170, 0)),
    ("gray", Rgb::new(170, 170, 170)),
    ("dark_gray", Rgb::new(85, 85, 85)),
    ("blue", Rgb::new(85, 85, 255)),
    ("green", Rgb::new(85, 255, 85)),
    ("aqua", Rgb::new(85, 255, 255)),
    ("red", Rgb::new(255, 85, 85)),
    ("light_purple", Rgb::new(255, 85, 255)),
    ("yellow", Rgb::new(255, 255, 85)),
    ("white", Rgb::new(255, 255, 255)),
];

/// Look up one of the named colors.
pub fn named_color(name: &str) -> Option<Rgb> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgb)| *rgb)
}

/// Resolve a color argument: a color name first, then a hex value.
pub fn parse_color_arg(arg: &str) -> Option<Rgb> {
    named_color(arg).or_else(|| Rgb::from_hex(arg))
}

/// Resolve a `:`-separated gradient argument, skipping unparseable entries.
pub fn parse_gradient_arg(arg: &str) -> Vec<Rgb> {
    arg.split(':').filter_map(parse_color_arg).collect()
}

/// Blend across `colors` at `progress` (0.0 to 1.0).
///
/// Channels are truncated, not rounded. `colors` must hold at least two
/// entries; shorter lists fall back to their only color or black.
pub fn interpolate(colors: &[Rgb], progress: f32) -> Rgb {
    match colors {
        [] => return Rgb::default(),
        [only] => return *only,
        _ => {}
    }

    let clamped = progress.clamp(0.0, 1.0);
    let scaled = clamped * (colors.len() - 1) as f32;
    let index = (scaled as usize).min(colors.len() - 2);
    let local = scaled - index as f32;

    let (c1, c2) = (colors[index], colors[index + 1]);
    let blend = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * local) as u8;
    Rgb::new(blend(c1.r, c2.r), blend(c1.g, c2.g), blend(c1.b, c2.b))
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Style of one markup scope.
///
/// Values are never mutated; each tag derives a new state from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleState {
    color: Option<Rgb>,
    gradient: Option<Vec<Rgb>>,
    bold: bool,
    italic: bool,
    underlined: bool,
    monospace: bool,
    link: Option<String>,
}

impl StyleState {
    /// Solid color; clears any gradient.
    pub fn with_color(&self, color: Rgb) -> Self {
        Self {
            color: Some(color),
            gradient: None,
            ..self.clone()
        }
    }

    /// Gradient; clears any solid color.
    pub fn with_gradient(&self, gradient: Vec<Rgb>) -> Self {
        Self {
            color: None,
            gradient: Some(gradient),
            ..self.clone()
        }
    }

    pub fn with_bold(&self, bold: bool) -> Self {
        Self {
            bold,
            ..self.clone()
        }
    }

    pub fn with_italic(&self, italic: bool) -> Self {
        Self {
            italic,
            ..self.clone()
        }
    }

    pub fn with_underlined(&self, underlined: bool) -> Self {
        Self {
            underlined,
            ..self.clone()
        }
    }

    pub fn with_monospace(&self, monospace: bool) -> Self {
        Self {
            monospace,
            ..self.clone()
        }
    }

    pub fn with_link(&self, link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..self.clone()
        }
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn gradient(&self) -> Option<&[Rgb]> {
        self.gradient.as_deref()
    }

    fn text_style(&self, color: Option<Rgb>) -> TextStyle {
        TextStyle {
            color,
            bold: self.bold,
            italic: self.italic,
            underlined: self.underlined,
            monospace: self.monospace,
            link: self.link.clone(),
        }
    }

    /// Build the message for a run of literal text in this scope.
    ///
    /// A gradient of two or more colors expands into one child per character.
    pub fn render(&self, content: &str) -> Message {
        let colors = match self.gradient.as_deref() {
            Some(colors) if colors.len() >= 2 => colors,
            _ => return Message::styled(content, self.text_style(self.color)),
        };

        let length = content.chars().count();
        let denominator = length.saturating_sub(1).max(1) as f32;
        let mut container = Message::empty();
        for (index, ch) in content.chars().enumerate() {
            let color = interpolate(colors, index as f32 / denominator);
            container.insert(Message::styled(ch.to_string(), self.text_style(Some(color))));
        }
        container
    }
}
