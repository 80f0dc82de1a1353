//! Turns an encoded symbol into pixel geometry and drives a drawing backend.

mod config;
mod plan;

pub use config::{Alignment, CaptionAnchor, Color, ColorParseError, FontSpec, RenderConfig};
pub use plan::{DrawCommand, LayoutError, LayoutPlan, TextRole, layout, render};

/// Text metrics supplied by whatever draws the glyphs.
pub trait TextMeasure {
    /// Width and height in pixels of `text` set in `font`.
    fn measure_text(&self, text: &str, font: &FontSpec) -> (u32, u32);
}

/// Drawing backend consumed by [`render`].
///
/// Implementations are not expected to be reentrant; callers serialise access
/// to a shared canvas themselves.
pub trait Canvas: TextMeasure {
    fn fill_background(&mut self, color: Color);
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color, thickness: u32);
    fn draw_text(&mut self, text: &str, font: &FontSpec, color: Color, position: (i32, i32));
}
