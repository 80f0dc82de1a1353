//! Command-line interface wiring for the `ean13` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! the submodules that implement each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod encode;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `ean13` binary.
#[derive(Parser, Debug)]
#[command(name = "ean13", version, about = "EAN-13 barcode encoder and renderer")]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Encode(encode::EncodeCommand),
    #[command(subcommand)]
    Render(render::RenderCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode(cmd) => encode::handle(cmd),
        Command::Render(cmd) => render::handle(cmd),
    }
}
