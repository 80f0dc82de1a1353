//! Raster backend: draws layout plans into `image` buffers and encodes them.

mod font;
mod format;
mod paint;

pub use font::{BitmapFont, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use format::{ImageFormat, encode_image, save_image};
pub use paint::RasterCanvas;

use image::DynamicImage;

use crate::barcode::EncodedSymbol;
use crate::layout::{LayoutError, RenderConfig, layout, render};

/// Lay out `symbol` with the built-in bitmap font and paint it to a new image.
pub fn render_image(
    symbol: &EncodedSymbol,
    config: &RenderConfig,
) -> Result<DynamicImage, LayoutError> {
    let plan = layout(symbol, config, &BitmapFont)?;
    let mut canvas = RasterCanvas::for_plan(&plan);
    render(&plan, &mut canvas);
    Ok(canvas.into_image())
}
