//! Encoding commands (`ean13 encode ...`).

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use ean13::{DATA_DIGITS, SYMBOL_DIGITS, SymbolInput};
use serde_json::json;

use crate::cli::common::SymbolArgs;

/// Encode subcommands.
#[derive(Subcommand, Debug)]
pub enum EncodeCommand {
    /// Print the module pattern for a code.
    Symbol(EncodeSymbolArgs),
    /// Compute the checksum of 12 digits, or verify the last of 13.
    Checksum(ChecksumArgs),
}

/// Arguments for `ean13 encode symbol`.
#[derive(Args, Debug)]
pub struct EncodeSymbolArgs {
    #[command(flatten)]
    pub symbol: SymbolArgs,
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `ean13 encode checksum`.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// 12 data digits, or 13 digits to verify.
    pub digits: String,
}

/// Execute an encode command.
pub fn handle(command: EncodeCommand) -> Result<()> {
    match command {
        EncodeCommand::Symbol(args) => symbol(args),
        EncodeCommand::Checksum(args) => checksum(args),
    }
}

fn symbol(args: EncodeSymbolArgs) -> Result<()> {
    let symbol = args.symbol.encode()?;
    let input = symbol.input();
    if args.json {
        let report = json!({
            "digits": input.to_string(),
            "checksum": input.checksum(),
            "checksum_valid": input.has_valid_checksum(),
            "quiet_zone": symbol.has_quiet_zone(),
            "modules": symbol.len(),
            "pattern": symbol.to_string(),
            "guard_bars": symbol.guard_bars().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("digits:   {}", input);
        println!("checksum: {}", input.checksum());
        println!("modules:  {}", symbol.len());
        println!("pattern:  {}", symbol);
    }
    Ok(())
}

fn checksum(args: ChecksumArgs) -> Result<()> {
    let input: SymbolInput = args
        .digits
        .parse()
        .with_context(|| format!("invalid digits '{}'", args.digits))?;
    match args.digits.len() {
        DATA_DIGITS => println!("{}", input.checksum()),
        SYMBOL_DIGITS if input.has_valid_checksum() => println!("{} is valid", input),
        _ => bail!(
            "checksum mismatch for {}: expected {}, found {}",
            args.digits,
            input.expected_checksum(),
            input.checksum()
        ),
    }
    Ok(())
}
