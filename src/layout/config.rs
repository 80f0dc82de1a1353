use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat RGBA color, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 0xff])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color([r, g, b, a])
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color '{0}': expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let mut channels = [0xffu8; 4];
        for (slot, idx) in channels.iter_mut().zip((0..hex.len()).step_by(2)) {
            *slot = u8::from_str_radix(&hex[idx..idx + 2], 16)
                .map_err(|_| ColorParseError(s.to_string()))?;
        }
        Ok(Color(channels))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> String {
        value.to_string()
    }
}

/// Where the remainder pixels (`width % modules`) go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

impl Alignment {
    /// Horizontal offset applied to every bar given the leftover pixels.
    pub fn shift(self, remainder: u32) -> u32 {
        match self {
            Alignment::Center => remainder / 2,
            Alignment::Left => 0,
            Alignment::Right => remainder,
        }
    }
}

/// Horizontal anchor of the caption inside the top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionAnchor {
    Left,
    #[default]
    Center,
    Right,
}

/// Font reference handed to the text collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Integer pixel scale of the glyph cell.
    pub scale: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { scale: 2 }
    }
}

/// Everything that shapes one rendering of a symbol.
///
/// Bars run from `caption_space` down to `height`; the raster is
/// `width x (height + caption_space)` so the band below the bars holds the
/// digit labels and the guard extensions. Missing fields in a JSON file fall
/// back to [`RenderConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub caption_space: u32,
    pub foreground: Color,
    pub background: Color,
    pub alignment: Alignment,
    pub show_label: bool,
    pub label_font: FontSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub caption_anchor: CaptionAnchor,
    pub caption_font: FontSpec,
    /// Extra pixels guard bars reach below `height`.
    pub guard_extension: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 250,
            caption_space: 20,
            foreground: Color::BLACK,
            background: Color::WHITE,
            alignment: Alignment::Center,
            show_label: false,
            label_font: FontSpec::default(),
            caption: None,
            caption_anchor: CaptionAnchor::Center,
            caption_font: FontSpec::default(),
            guard_extension: 8,
        }
    }
}

impl RenderConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read render config {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("failed to parse render config {}", path.display()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Pixel size of the raster this config renders into.
    ///
    /// `None` when the size overflows or does not fit `i32` drawing coordinates.
    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        let height = self.height.checked_add(self.caption_space)?;
        let limit = i32::MAX as u32;
        (self.width <= limit && height <= limit).then_some((self.width, height))
    }
}
