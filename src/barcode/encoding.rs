use std::fmt;
use std::ops::Range;

use log::warn;

use crate::barcode::symbol::{SYMBOL_DIGITS, SymbolInput};

/// Blank modules on each side when quiet zones are enabled.
pub const QUIET_ZONE_MODULES: usize = 9;
/// Modules from the first start-guard bar to the last end-guard bar.
pub const SYMBOL_MODULES: usize = 95;

const DIGIT_MODULES: usize = 7;
const HALF_DIGITS: usize = 6;

/// Guard and data-block offsets inside the 95 symbol modules.
pub const START_GUARD: Range<usize> = 0..3;
pub const LEFT_BLOCK: Range<usize> = 3..45;
pub const CENTER_GUARD: Range<usize> = 45..50;
pub const RIGHT_BLOCK: Range<usize> = 50..92;
pub const END_GUARD: Range<usize> = 92..95;

const EDGE_GUARD_BITS: [bool; 3] = [true, false, true];
const CENTER_GUARD_BITS: [bool; 5] = [false, true, false, true, false];

// Module tables, 7 bits each, read MSB first (bit set = bar).
const ODD_LEFT: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011,
    0b0110001, 0b0101111, 0b0111011, 0b0110111, 0b0001011,
];
const EVEN_LEFT: [u8; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101,
    0b0111001, 0b0000101, 0b0010001, 0b0001001, 0b0010111,
];
const RIGHT: [u8; 10] = [
    0b1110010, 0b1100110, 0b1101100, 0b1000010, 0b1011100,
    0b1001110, 0b1010000, 0b1000100, 0b1001000, 0b1110100,
];

/// Which left-hand table encodes a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

use Parity::{Even as E, Odd as O};

/// Parity template for digits 2..=7, indexed by the leading digit.
#[rustfmt::skip]
const PARITY_TEMPLATES: [[Parity; HALF_DIGITS]; 10] = [
    [O, O, O, O, O, O],
    [O, O, E, O, E, E],
    [O, O, E, E, O, E],
    [O, O, E, E, E, O],
    [O, E, O, O, E, E],
    [O, E, E, O, O, E],
    [O, E, E, E, O, O],
    [O, E, O, E, O, E],
    [O, E, O, E, E, O],
    [O, E, E, O, E, O],
];

/// Parity template selected by `leading` (`0..=9`).
pub fn parity_template(leading: u8) -> &'static [Parity; HALF_DIGITS] {
    &PARITY_TEMPLATES[usize::from(leading)]
}

/// Turns validated digits into the EAN-13 module sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ean13Encoder {
    quiet_zone: bool,
}

impl Ean13Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surround the symbol with 9 blank modules on each side (113 modules total).
    pub fn with_quiet_zone(mut self, enabled: bool) -> Self {
        self.quiet_zone = enabled;
        self
    }

    pub fn encode(&self, input: &SymbolInput) -> EncodedSymbol {
        if !input.has_valid_checksum() {
            warn!(
                "encoding {} with checksum {} that does not match its data digits",
                input,
                input.checksum()
            );
        }

        let digits = input.digits();
        let quiet = if self.quiet_zone { QUIET_ZONE_MODULES } else { 0 };
        let mut modules = Vec::with_capacity(SYMBOL_MODULES + 2 * quiet);

        modules.resize(quiet, false);
        modules.extend_from_slice(&EDGE_GUARD_BITS);
        let template = parity_template(input.leading_digit());
        for (&digit, parity) in digits[1..=HALF_DIGITS].iter().zip(template) {
            let table = match parity {
                Parity::Odd => &ODD_LEFT,
                Parity::Even => &EVEN_LEFT,
            };
            push_pattern(&mut modules, table[usize::from(digit)]);
        }
        modules.extend_from_slice(&CENTER_GUARD_BITS);
        for &digit in &digits[HALF_DIGITS + 1..SYMBOL_DIGITS] {
            push_pattern(&mut modules, RIGHT[usize::from(digit)]);
        }
        modules.extend_from_slice(&EDGE_GUARD_BITS);
        modules.resize(modules.len() + quiet, false);

        EncodedSymbol {
            input: *input,
            modules,
            offset: quiet,
        }
    }
}

fn push_pattern(out: &mut Vec<bool>, bits: u8) {
    for shift in (0..DIGIT_MODULES).rev() {
        out.push((bits >> shift) & 1 == 1);
    }
}

/// The finished module sequence for one symbol; `true` is a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSymbol {
    input: SymbolInput,
    modules: Vec<bool>,
    offset: usize,
}

impl EncodedSymbol {
    pub fn input(&self) -> &SymbolInput {
        &self.input
    }

    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn has_quiet_zone(&self) -> bool {
        self.offset > 0
    }

    /// Index of the first start-guard module.
    pub fn symbol_offset(&self) -> usize {
        self.offset
    }

    pub fn left_block(&self) -> Range<usize> {
        self.shifted(LEFT_BLOCK)
    }

    pub fn right_block(&self) -> Range<usize> {
        self.shifted(RIGHT_BLOCK)
    }

    /// Whether module `index` belongs to the start, center or end guard.
    pub fn is_guard(&self, index: usize) -> bool {
        let Some(local) = index.checked_sub(self.offset) else {
            return false;
        };
        START_GUARD.contains(&local) || CENTER_GUARD.contains(&local) || END_GUARD.contains(&local)
    }

    /// Indices of the bars that make up the three guards.
    pub fn guard_bars(&self) -> impl Iterator<Item = usize> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|&(idx, &bar)| bar && self.is_guard(idx))
            .map(|(idx, _)| idx)
    }

    fn shifted(&self, range: Range<usize>) -> Range<usize> {
        range.start + self.offset..range.end + self.offset
    }
}

impl fmt::Display for EncodedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bar in &self.modules {
            f.write_str(if bar { "1" } else { "0" })?;
        }
        Ok(())
    }
}
