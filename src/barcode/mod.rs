//! Symbol encoding: digit validation, checksum and EAN-13 module patterns.

pub mod encoding;
pub mod symbol;

pub use encoding::{
    CENTER_GUARD, END_GUARD, Ean13Encoder, EncodedSymbol, LEFT_BLOCK, Parity, QUIET_ZONE_MODULES,
    RIGHT_BLOCK, START_GUARD, SYMBOL_MODULES, parity_template,
};
pub use symbol::{DATA_DIGITS, EncodeError, SYMBOL_DIGITS, SymbolInput, compute_checksum};
