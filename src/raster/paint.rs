use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::layout::{Canvas, Color, FontSpec, LayoutPlan, TextMeasure};
use crate::raster::font::{BitmapFont, GLYPH_WIDTH, advance, glyph};

/// RGBA raster that a [`LayoutPlan`] is replayed onto.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::new(width, height),
        }
    }

    /// A blank canvas sized for `plan`.
    pub fn for_plan(plan: &LayoutPlan) -> Self {
        Self::new(plan.canvas_width, plan.canvas_height)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.image)
    }
}

impl TextMeasure for RasterCanvas {
    fn measure_text(&self, text: &str, font: &FontSpec) -> (u32, u32) {
        BitmapFont.measure_text(text, font)
    }
}

impl Canvas for RasterCanvas {
    fn fill_background(&mut self, color: Color) {
        let pixel = rgba(color);
        for px in self.image.pixels_mut() {
            *px = pixel;
        }
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color, thickness: u32) {
        let thickness = thickness.max(1);
        let half = (thickness / 2) as i32;
        if from.0 == to.0 {
            let top = from.1.min(to.1);
            let height = from.1.abs_diff(to.1);
            if height == 0 {
                return;
            }
            draw_filled_rect_mut(
                &mut self.image,
                Rect::at(from.0 - half, top).of_size(thickness, height),
                rgba(color),
            );
            return;
        }
        for offset in 0..thickness as i32 {
            let dx = (offset - half) as f32;
            draw_line_segment_mut(
                &mut self.image,
                (from.0 as f32 + dx, from.1 as f32),
                (to.0 as f32 + dx, to.1 as f32),
                rgba(color),
            );
        }
    }

    fn draw_text(&mut self, text: &str, font: &FontSpec, color: Color, position: (i32, i32)) {
        let step = advance(font) as i32;
        let (x, y) = position;
        for (idx, ch) in text.chars().enumerate() {
            draw_glyph(
                &mut self.image,
                x + idx as i32 * step,
                y,
                ch,
                rgba(color),
                font.scale.max(1),
            );
        }
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba(color.0)
}

fn draw_glyph(image: &mut RgbaImage, x: i32, y: i32, ch: char, color: Rgba<u8>, scale: u32) {
    for (row, bits) in glyph(ch).iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col as i32 * scale as i32);
                let py = y + (row as i32 * scale as i32);
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}
