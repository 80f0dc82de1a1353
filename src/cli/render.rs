//! Rendering commands (`ean13 render ...`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ean13::{BitmapFont, ImageFormat, encode_image, layout, render_image, save_image};
use log::info;

use crate::cli::common::{ImageFormatArg, StyleArgs, SymbolArgs};
use crate::cli::utils::{is_stdout, write_output};

/// Available render subcommands.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Render the barcode to an image file.
    Image(RenderImageArgs),
    /// Dump the computed draw commands as JSON.
    Layout(RenderLayoutArgs),
}

/// Args for `ean13 render image`.
#[derive(Args, Debug)]
pub struct RenderImageArgs {
    #[command(flatten)]
    pub symbol: SymbolArgs,
    #[command(flatten)]
    pub style: StyleArgs,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Image format; guessed from the output extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<ImageFormatArg>,
}

/// Args for `ean13 render layout`.
#[derive(Args, Debug)]
pub struct RenderLayoutArgs {
    #[command(flatten)]
    pub symbol: SymbolArgs,
    #[command(flatten)]
    pub style: StyleArgs,
    /// Output file (stdout when omitted).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute a render command.
pub fn handle(command: RenderCommand) -> Result<()> {
    match command {
        RenderCommand::Image(args) => image(args),
        RenderCommand::Layout(args) => plan(args),
    }
}

fn image(args: RenderImageArgs) -> Result<()> {
    let symbol = args.symbol.encode()?;
    let config = args.style.resolve()?;
    let format = args
        .format
        .map(ImageFormat::from)
        .or_else(|| ImageFormat::from_path(&args.output))
        .unwrap_or_default();

    let image = render_image(&symbol, &config)
        .with_context(|| format!("failed to lay out {}", symbol.input()))?;

    if is_stdout(&args.output) {
        let bytes = encode_image(&image, format)?;
        return write_output(&args.output, &bytes);
    }
    save_image(&image, &args.output, format)?;
    info!(
        "rendered {} as {} ({}x{})",
        symbol.input(),
        format,
        image.width(),
        image.height()
    );
    println!(
        "Rendered {} to {} ({}x{} {})",
        symbol.input(),
        args.output.display(),
        image.width(),
        image.height(),
        format
    );
    Ok(())
}

fn plan(args: RenderLayoutArgs) -> Result<()> {
    let symbol = args.symbol.encode()?;
    let config = args.style.resolve()?;
    let plan = layout(&symbol, &config, &BitmapFont)
        .with_context(|| format!("failed to lay out {}", symbol.input()))?;
    let mut json = serde_json::to_string_pretty(&plan)?;
    json.push('\n');
    match args.output {
        Some(path) => {
            write_output(&path, json.as_bytes())?;
            if let Some(status) = layout_status(&path, plan.commands().len()) {
                println!("{}", status);
            }
        }
        None => print!("{}", json),
    }
    Ok(())
}

/// Confirmation for a plan written to a file; stdout carries only the JSON.
fn layout_status(path: &Path, commands: usize) -> Option<String> {
    (!is_stdout(path)).then(|| format!("Wrote {} draw commands to {}", commands, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn layout_status_stays_off_stdout() {
        assert_eq!(layout_status(Path::new("-"), 42), None);
        assert_eq!(
            layout_status(Path::new("out/plan.json"), 42).as_deref(),
            Some("Wrote 42 draw commands to out/plan.json")
        );
    }
}
