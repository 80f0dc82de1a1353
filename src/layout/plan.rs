use std::ops::Range;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::barcode::EncodedSymbol;
use crate::layout::config::{CaptionAnchor, Color, FontSpec, RenderConfig};
use crate::layout::{Canvas, TextMeasure};

/// Gap between the bottom of the data bars and the digit labels.
const LABEL_GAP: u32 = 2;
/// Gap between the leading digit and the start guard.
const LEAD_DIGIT_GAP: i32 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("canvas width {width}px cannot hold {modules} modules at one pixel each")]
    CanvasTooNarrow { width: u32, modules: usize },
    #[error("canvas height {height}px leaves no room for bars below the {caption_space}px caption band")]
    CanvasTooShort { height: u32, caption_space: u32 },
    #[error("the {caption_space}px band below the bars cannot hold {needed}px of guard extension and labels")]
    BottomBandTooShort { needed: u32, caption_space: u32 },
    #[error("canvas of {width}x{height}px with a {caption_space}px band is too large to draw")]
    CanvasTooLarge {
        width: u32,
        height: u32,
        caption_space: u32,
    },
}

/// What a text run on the canvas represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Caption,
    LeadDigit,
    LeftDigits,
    RightDigits,
}

/// A single drawing step with absolute pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Background {
        color: Color,
    },
    /// Vertical bar centred on `x`, `thickness` pixels wide, spanning `top..bottom`.
    Bar {
        module: usize,
        x: i32,
        top: i32,
        bottom: i32,
        thickness: u32,
        color: Color,
        guard: bool,
    },
    /// Text whose top-left corner sits at `(x, y)`.
    Text {
        role: TextRole,
        text: String,
        x: i32,
        y: i32,
        font: FontSpec,
        color: Color,
    },
}

/// Pixel geometry derived from one `(symbol, config)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub module_count: usize,
    pub module_width: u32,
    pub shift: u32,
    commands: Vec<DrawCommand>,
}

impl LayoutPlan {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Blank pixels left of the first module.
    pub fn left_margin(&self) -> u32 {
        self.shift
    }

    /// Blank pixels right of the last module.
    pub fn right_margin(&self) -> u32 {
        self.canvas_width - self.shift - self.module_count as u32 * self.module_width
    }

    pub fn bars(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Bar { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Text { .. }))
    }
}

/// Compute bar positions, guard elongation and text placement.
///
/// Module width is `width / modules` with integer truncation; the leftover
/// pixels are distributed by [`RenderConfig::alignment`].
pub fn layout<M: TextMeasure + ?Sized>(
    symbol: &EncodedSymbol,
    config: &RenderConfig,
    measure: &M,
) -> Result<LayoutPlan, LayoutError> {
    let module_count = symbol.len();
    let modules = u32::try_from(module_count).unwrap_or(u32::MAX).max(1);
    let module_width = config.width / modules;
    if module_width < 1 {
        return Err(LayoutError::CanvasTooNarrow {
            width: config.width,
            modules: module_count,
        });
    }
    if config.height <= config.caption_space {
        return Err(LayoutError::CanvasTooShort {
            height: config.height,
            caption_space: config.caption_space,
        });
    }

    let (canvas_width, canvas_height) = config.canvas_size().ok_or(LayoutError::CanvasTooLarge {
        width: config.width,
        height: config.height,
        caption_space: config.caption_space,
    })?;
    let needed = bottom_band_needed(symbol, config, measure);
    if needed > config.caption_space {
        return Err(LayoutError::BottomBandTooShort {
            needed,
            caption_space: config.caption_space,
        });
    }

    let shift = config.alignment.shift(config.width % modules);
    debug!(
        "layout {}: {} modules, {}px each, shift {}px on a {}x{} canvas",
        symbol.input(),
        module_count,
        module_width,
        shift,
        canvas_width,
        canvas_height
    );

    let geometry = Geometry {
        module_width,
        shift,
    };
    let mut commands = Vec::with_capacity(module_count / 2 + 5);
    commands.push(DrawCommand::Background {
        color: config.background,
    });

    for (module, _) in symbol.modules().iter().enumerate().filter(|(_, bar)| **bar) {
        let guard = symbol.is_guard(module);
        let bottom = if guard {
            config.height + config.guard_extension
        } else {
            config.height
        };
        commands.push(DrawCommand::Bar {
            module,
            x: geometry.bar_center(module),
            top: config.caption_space as i32,
            bottom: bottom as i32,
            thickness: module_width,
            color: config.foreground,
            guard,
        });
    }

    if let Some(caption) = config.caption.as_deref().filter(|c| !c.is_empty()) {
        commands.push(caption_command(caption, config, measure));
    }
    if config.show_label {
        commands.extend(label_commands(symbol, config, measure, &geometry));
    }

    Ok(LayoutPlan {
        canvas_width,
        canvas_height,
        module_count,
        module_width,
        shift,
        commands,
    })
}

/// Replay a plan onto a drawing collaborator.
pub fn render<C: Canvas + ?Sized>(plan: &LayoutPlan, canvas: &mut C) {
    for command in plan.commands() {
        match command {
            DrawCommand::Background { color } => canvas.fill_background(*color),
            DrawCommand::Bar {
                x,
                top,
                bottom,
                thickness,
                color,
                ..
            } => canvas.draw_line((*x, *top), (*x, *bottom), *color, *thickness),
            DrawCommand::Text {
                text,
                x,
                y,
                font,
                color,
                ..
            } => canvas.draw_text(text, font, *color, (*x, *y)),
        }
    }
}

/// Pixels below `height` taken by guard elongation and, when shown, the labels.
fn bottom_band_needed<M: TextMeasure + ?Sized>(
    symbol: &EncodedSymbol,
    config: &RenderConfig,
    measure: &M,
) -> u32 {
    let labels = if config.show_label {
        let (_, text_height) = measure.measure_text(&symbol.input().to_string(), &config.label_font);
        LABEL_GAP.saturating_add(text_height)
    } else {
        0
    };
    config.guard_extension.max(labels)
}

struct Geometry {
    module_width: u32,
    shift: u32,
}

impl Geometry {
    fn module_left(&self, module: usize) -> i32 {
        (module as u32 * self.module_width + self.shift) as i32
    }

    fn bar_center(&self, module: usize) -> i32 {
        self.module_left(module) + (self.module_width / 2) as i32
    }

    /// X that centres a run of `text_width` pixels over `modules`.
    fn centered(&self, modules: Range<usize>, text_width: u32) -> i32 {
        let span = (modules.len() as u32 * self.module_width) as i32;
        self.module_left(modules.start) + (span - text_width as i32) / 2
    }
}

fn caption_command<M: TextMeasure + ?Sized>(
    caption: &str,
    config: &RenderConfig,
    measure: &M,
) -> DrawCommand {
    let (text_width, text_height) = measure.measure_text(caption, &config.caption_font);
    if text_height > config.caption_space {
        warn!(
            "caption is {}px tall but the caption band is only {}px; it will overlap the bars",
            text_height, config.caption_space
        );
    }
    if text_width > config.width {
        warn!(
            "caption is {}px wide and will be clipped by the {}px canvas",
            text_width, config.width
        );
    }
    let slack = config.width.saturating_sub(text_width);
    let x = match config.caption_anchor {
        CaptionAnchor::Left => 0,
        CaptionAnchor::Center => slack / 2,
        CaptionAnchor::Right => slack,
    };
    DrawCommand::Text {
        role: TextRole::Caption,
        text: caption.to_string(),
        x: x as i32,
        y: 0,
        font: config.caption_font,
        color: config.foreground,
    }
}

fn label_commands<M: TextMeasure + ?Sized>(
    symbol: &EncodedSymbol,
    config: &RenderConfig,
    measure: &M,
    geometry: &Geometry,
) -> Vec<DrawCommand> {
    let digits = symbol.input().to_string();
    let font = config.label_font;
    let y = (config.height + LABEL_GAP) as i32;
    let text = |role, run: &str, x| DrawCommand::Text {
        role,
        text: run.to_string(),
        x,
        y,
        font,
        color: config.foreground,
    };

    let (lead, left, right) = (&digits[..1], &digits[1..7], &digits[7..]);
    let (lead_width, _) = measure.measure_text(lead, &font);
    let guard_left = geometry.module_left(symbol.symbol_offset());
    let lead_x = guard_left - LEAD_DIGIT_GAP - lead_width as i32;
    if lead_x < 0 {
        warn!(
            "no room for the leading digit left of the start guard; it will overlap the guard \
             (enable the quiet zone or widen the canvas)"
        );
    }
    let lead_x = lead_x.max(0);
    let (left_width, _) = measure.measure_text(left, &font);
    let (right_width, _) = measure.measure_text(right, &font);

    vec![
        text(TextRole::LeadDigit, lead, lead_x),
        text(
            TextRole::LeftDigits,
            left,
            geometry.centered(symbol.left_block(), left_width),
        ),
        text(
            TextRole::RightDigits,
            right,
            geometry.centered(symbol.right_block(), right_width),
        ),
    ]
}
