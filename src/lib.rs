//! EAN-13 barcode encoding, layout and raster rendering.
//!
//! ```no_run
//! use ean13::{RenderConfig, encode, render_image};
//!
//! let symbol = encode("97", "86005", "69175", None)?;
//! let config = RenderConfig { show_label: true, ..RenderConfig::default() };
//! let image = render_image(&symbol, &config)?;
//! image.save("barcode.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod barcode;
mod layout;
mod raster;

pub use barcode::{
    CENTER_GUARD, DATA_DIGITS, END_GUARD, Ean13Encoder, EncodeError, EncodedSymbol, LEFT_BLOCK,
    Parity, QUIET_ZONE_MODULES, RIGHT_BLOCK, START_GUARD, SYMBOL_DIGITS, SYMBOL_MODULES,
    SymbolInput, compute_checksum, parity_template,
};
pub use layout::{
    Alignment, Canvas, CaptionAnchor, Color, ColorParseError, DrawCommand, FontSpec, LayoutError,
    LayoutPlan, RenderConfig, TextMeasure, TextRole, layout, render,
};
pub use raster::{
    BitmapFont, GLYPH_HEIGHT, GLYPH_WIDTH, ImageFormat, RasterCanvas, encode_image, render_image,
    save_image,
};

/// Validate the country / manufacturer / product segments and encode them
/// into a 95-module symbol (no quiet zones).
pub fn encode(
    country: &str,
    manufacturer: &str,
    product: &str,
    checksum: Option<&str>,
) -> Result<EncodedSymbol, EncodeError> {
    let input = SymbolInput::from_segments(country, manufacturer, product, checksum)?;
    Ok(Ean13Encoder::new().encode(&input))
}
