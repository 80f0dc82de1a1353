//! Shared clap argument groups and value enums.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use ean13::{
    Alignment, CaptionAnchor, Color, Ean13Encoder, EncodedSymbol, ImageFormat, RenderConfig,
    SymbolInput,
};

/// Digits to encode, either as one code or as packaging segments.
#[derive(Args, Debug)]
pub struct SymbolArgs {
    /// 12 digits (checksum computed) or 13 digits (checksum included).
    #[arg(conflicts_with_all = ["country", "manufacturer", "product"])]
    pub code: Option<String>,
    /// Country code; zero-padded to two digits.
    #[arg(long)]
    pub country: Option<String>,
    /// Manufacturer code.
    #[arg(long)]
    pub manufacturer: Option<String>,
    /// Product code.
    #[arg(long)]
    pub product: Option<String>,
    /// Checksum digit to use instead of the computed one.
    #[arg(long, requires = "product")]
    pub checksum: Option<String>,
    /// Add 9 blank modules on each side of the symbol.
    #[arg(long = "quiet-zone")]
    pub quiet_zone: bool,
}

impl SymbolArgs {
    pub fn input(&self) -> Result<SymbolInput> {
        if let Some(code) = &self.code {
            return code
                .parse()
                .with_context(|| format!("invalid EAN-13 code '{}'", code));
        }
        match (&self.manufacturer, &self.product) {
            (Some(manufacturer), Some(product)) => SymbolInput::from_segments(
                self.country.as_deref().unwrap_or(""),
                manufacturer,
                product,
                self.checksum.as_deref(),
            )
            .context("invalid EAN-13 segments"),
            _ => Err(anyhow!(
                "provide a 12 or 13 digit code, or --manufacturer and --product"
            )),
        }
    }

    pub fn encode(&self) -> Result<EncodedSymbol> {
        let input = self.input()?;
        Ok(Ean13Encoder::new()
            .with_quiet_zone(self.quiet_zone)
            .encode(&input))
    }
}

/// Rendering options; each flag overrides the matching field of `--config`.
#[derive(Args, Debug)]
pub struct StyleArgs {
    /// JSON render config to start from.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Canvas width in pixels.
    #[arg(long)]
    pub width: Option<u32>,
    /// Bottom edge of the data bars in pixels.
    #[arg(long)]
    pub height: Option<u32>,
    /// Height of the caption band above the bars.
    #[arg(long = "caption-space")]
    pub caption_space: Option<u32>,
    /// Where leftover pixels go.
    #[arg(long, value_enum)]
    pub align: Option<AlignmentArg>,
    /// Print the 13 digits under the bars.
    #[arg(long)]
    pub label: bool,
    /// Caption drawn in the top band.
    #[arg(long)]
    pub caption: Option<String>,
    /// Horizontal anchor of the caption.
    #[arg(long = "caption-anchor", value_enum)]
    pub caption_anchor: Option<CaptionAnchorArg>,
    /// Bar and text color (#rrggbb or #rrggbbaa).
    #[arg(long)]
    pub fg: Option<Color>,
    /// Background color (#rrggbb or #rrggbbaa).
    #[arg(long)]
    pub bg: Option<Color>,
    /// Pixel scale of the label digits.
    #[arg(long = "font-scale")]
    pub font_scale: Option<u32>,
    /// Pixel scale of the caption text.
    #[arg(long = "caption-font-scale")]
    pub caption_font_scale: Option<u32>,
    /// Extra length of guard bars below the data bars.
    #[arg(long = "guard-extension")]
    pub guard_extension: Option<u32>,
}

impl StyleArgs {
    pub fn resolve(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(space) = self.caption_space {
            config.caption_space = space;
        }
        if let Some(align) = self.align {
            config.alignment = align.into();
        }
        if self.label {
            config.show_label = true;
        }
        if let Some(caption) = &self.caption {
            config.caption = Some(caption.clone());
        }
        if let Some(anchor) = self.caption_anchor {
            config.caption_anchor = anchor.into();
        }
        if let Some(fg) = self.fg {
            config.foreground = fg;
        }
        if let Some(bg) = self.bg {
            config.background = bg;
        }
        if let Some(scale) = self.font_scale {
            config.label_font.scale = scale;
        }
        if let Some(scale) = self.caption_font_scale {
            config.caption_font.scale = scale;
        }
        if let Some(extension) = self.guard_extension {
            config.guard_extension = extension;
        }
        Ok(config)
    }
}

/// Alignment of the symbol inside the canvas.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AlignmentArg {
    Center,
    Left,
    Right,
}

impl From<AlignmentArg> for Alignment {
    fn from(value: AlignmentArg) -> Alignment {
        match value {
            AlignmentArg::Center => Alignment::Center,
            AlignmentArg::Left => Alignment::Left,
            AlignmentArg::Right => Alignment::Right,
        }
    }
}

/// Caption anchor along the top band.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CaptionAnchorArg {
    Left,
    Center,
    Right,
}

impl From<CaptionAnchorArg> for CaptionAnchor {
    fn from(value: CaptionAnchorArg) -> CaptionAnchor {
        match value {
            CaptionAnchorArg::Left => CaptionAnchor::Left,
            CaptionAnchorArg::Center => CaptionAnchor::Center,
            CaptionAnchorArg::Right => CaptionAnchor::Right,
        }
    }
}

/// Image container formats accepted by `render image`.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ImageFormatArg {
    Bmp,
    Gif,
    Jpeg,
    Pbm,
    Png,
    Tga,
    Tiff,
    Webp,
}

impl From<ImageFormatArg> for ImageFormat {
    fn from(value: ImageFormatArg) -> ImageFormat {
        match value {
            ImageFormatArg::Bmp => ImageFormat::Bmp,
            ImageFormatArg::Gif => ImageFormat::Gif,
            ImageFormatArg::Jpeg => ImageFormat::Jpeg,
            ImageFormatArg::Pbm => ImageFormat::Pbm,
            ImageFormatArg::Png => ImageFormat::Png,
            ImageFormatArg::Tga => ImageFormat::Tga,
            ImageFormatArg::Tiff => ImageFormat::Tiff,
            ImageFormatArg::Webp => ImageFormat::Webp,
        }
    }
}
