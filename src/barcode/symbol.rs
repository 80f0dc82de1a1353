use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Digits carried by the symbol before the checksum.
pub const DATA_DIGITS: usize = 12;
/// Digits printed under a finished symbol (data + checksum).
pub const SYMBOL_DIGITS: usize = DATA_DIGITS + 1;

const COUNTRY_CODE_WIDTH: usize = 2;

/// Validation failures raised before any module pattern is looked up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("EAN-13 data must be 12 digits before the checksum, found {0}")]
    InvalidLength(usize),
    #[error("invalid character '{ch}' in {field}")]
    InvalidDigit { field: &'static str, ch: char },
    #[error("checksum digit must be between 0 and 9, got '{0}'")]
    ChecksumOutOfRange(String),
}

/// A validated 13-digit EAN-13 payload: 12 data digits plus the checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolInput {
    digits: [u8; SYMBOL_DIGITS],
}

impl SymbolInput {
    /// Build from the country / manufacturer / product split printed on packaging.
    ///
    /// The country code is zero-padded on the left to two digits; the other two
    /// segments are taken as-is and all three must add up to 12 digits. When
    /// `checksum` is `None` it is computed from the data digits.
    pub fn from_segments(
        country: &str,
        manufacturer: &str,
        product: &str,
        checksum: Option<&str>,
    ) -> Result<Self, EncodeError> {
        let country = parse_digits("country code", country)?;
        let manufacturer = parse_digits("manufacturer code", manufacturer)?;
        let product = parse_digits("product code", product)?;
        let checksum = checksum.map(parse_checksum).transpose()?;

        let padding = COUNTRY_CODE_WIDTH.saturating_sub(country.len());
        let mut data = vec![0u8; padding];
        data.extend(country);
        data.extend(manufacturer);
        data.extend(product);
        Self::from_data(&data, checksum)
    }

    /// Build from already-split data digits (each `0..=9`) and an optional checksum.
    pub fn from_data(data: &[u8], checksum: Option<u8>) -> Result<Self, EncodeError> {
        let data: [u8; DATA_DIGITS] = data
            .try_into()
            .map_err(|_| EncodeError::InvalidLength(data.len()))?;
        if let Some(&bad) = data.iter().find(|d| **d > 9) {
            return Err(EncodeError::InvalidDigit {
                field: "data",
                ch: char::from(b'0'.wrapping_add(bad)),
            });
        }
        let check = match checksum {
            Some(digit) if digit > 9 => {
                return Err(EncodeError::ChecksumOutOfRange(digit.to_string()));
            }
            Some(digit) => digit,
            None => compute_checksum(&data),
        };

        let mut digits = [0u8; SYMBOL_DIGITS];
        digits[..DATA_DIGITS].copy_from_slice(&data);
        digits[DATA_DIGITS] = check;
        Ok(Self { digits })
    }

    /// All 13 digits, checksum last.
    pub fn digits(&self) -> &[u8; SYMBOL_DIGITS] {
        &self.digits
    }

    pub fn data(&self) -> &[u8] {
        &self.digits[..DATA_DIGITS]
    }

    pub fn checksum(&self) -> u8 {
        self.digits[DATA_DIGITS]
    }

    /// The digit that selects the left-hand parity template.
    pub fn leading_digit(&self) -> u8 {
        self.digits[0]
    }

    /// Whether the stored checksum matches the one computed from the data digits.
    ///
    /// A caller-supplied checksum is kept verbatim, so this can be `false`.
    pub fn has_valid_checksum(&self) -> bool {
        self.expected_checksum() == self.checksum()
    }

    /// Checksum computed from the data digits, whatever is stored.
    pub fn expected_checksum(&self) -> u8 {
        let mut data = [0u8; DATA_DIGITS];
        data.copy_from_slice(self.data());
        compute_checksum(&data)
    }
}

impl FromStr for SymbolInput {
    type Err = EncodeError;

    /// Accepts 12 digits (checksum computed) or 13 digits (last one is the checksum).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = parse_digits("code", s)?;
        match digits.len() {
            DATA_DIGITS => Self::from_data(&digits, None),
            SYMBOL_DIGITS => Self::from_data(&digits[..DATA_DIGITS], Some(digits[DATA_DIGITS])),
            _ => Err(EncodeError::InvalidLength(digits.len())),
        }
    }
}

impl fmt::Display for SymbolInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

/// Mod-10 check digit over the 12 data digits.
///
/// Weights alternate 1, 3, 1, 3, ... starting from the leftmost digit.
pub fn compute_checksum(data: &[u8; DATA_DIGITS]) -> u8 {
    let sum: u32 = data
        .iter()
        .enumerate()
        .map(|(idx, &digit)| {
            let weight = if (idx + 1) % 2 == 0 { 3 } else { 1 };
            u32::from(digit) * weight
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn parse_digits(field: &'static str, raw: &str) -> Result<Vec<u8>, EncodeError> {
    raw.chars()
        .map(|ch| {
            ch.to_digit(10)
                .map(|d| d as u8)
                .ok_or(EncodeError::InvalidDigit { field, ch })
        })
        .collect()
}

fn parse_checksum(raw: &str) -> Result<u8, EncodeError> {
    let magnitude = raw.strip_prefix('-').unwrap_or(raw);
    if let Some(ch) = magnitude.chars().find(|ch| !ch.is_ascii_digit()) {
        return Err(EncodeError::InvalidDigit {
            field: "checksum",
            ch,
        });
    }
    match raw.parse::<u8>() {
        Ok(digit) if digit <= 9 => Ok(digit),
        _ => Err(EncodeError::ChecksumOutOfRange(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn data(s: &str) -> [u8; DATA_DIGITS] {
        let digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
        digits.try_into().unwrap()
    }

    #[test]
    fn checksum_matches_reference_vectors() {
        assert_eq!(compute_checksum(&data("400638133393")), 1);
        assert_eq!(compute_checksum(&data("978020137962")), 9);
        assert_eq!(compute_checksum(&data("978600569175")), 7);
        assert_eq!(compute_checksum(&data("000000000000")), 0);
    }

    #[test]
    fn checksum_is_always_a_single_digit() {
        for seed in 0u64..500 {
            let mut value = seed.wrapping_mul(2_862_933_555_777_941_757).wrapping_add(3_037_000_493);
            let mut digits = [0u8; DATA_DIGITS];
            for slot in digits.iter_mut() {
                *slot = (value % 10) as u8;
                value /= 10;
            }
            assert!(compute_checksum(&digits) <= 9);
        }
    }

    #[test]
    fn parses_twelve_and_thirteen_digit_codes() {
        let computed: SymbolInput = "400638133393".parse().unwrap();
        assert_eq!(computed.checksum(), 1);
        assert_eq!(computed.to_string(), "4006381333931");

        let supplied: SymbolInput = "4006381333931".parse().unwrap();
        assert_eq!(supplied, computed);
    }

    #[test]
    fn supplied_checksum_is_kept_verbatim() {
        let input: SymbolInput = "4006381333935".parse().unwrap();
        assert_eq!(input.checksum(), 5);
        assert!(!input.has_valid_checksum());
    }

    #[test]
    fn country_code_is_zero_padded() {
        let input = SymbolInput::from_segments("5", "01234", "56789", None).unwrap();
        assert_eq!(&input.to_string()[..12], "050123456789");
        assert_eq!(input.leading_digit(), 0);
    }

    #[test]
    fn segments_must_total_twelve_digits() {
        let err = SymbolInput::from_segments("97", "8600", "5691", None).unwrap_err();
        assert_eq!(err, EncodeError::InvalidLength(10));

        let err = "97860056917".parse::<SymbolInput>().unwrap_err();
        assert_eq!(err, EncodeError::InvalidLength(11));
    }

    #[test]
    fn rejects_non_decimal_characters() {
        let err = SymbolInput::from_segments("97", "86005", "6917x", None).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidDigit {
                field: "product code",
                ch: 'x'
            }
        );

        let err = "97860056917٥".parse::<SymbolInput>().unwrap_err();
        assert!(matches!(err, EncodeError::InvalidDigit { ch: '٥', .. }));
    }

    #[test]
    fn checksum_argument_is_range_checked() {
        let err = SymbolInput::from_segments("97", "86005", "69175", Some("12")).unwrap_err();
        assert_eq!(err, EncodeError::ChecksumOutOfRange("12".into()));

        let err = SymbolInput::from_segments("97", "86005", "69175", Some("-1")).unwrap_err();
        assert_eq!(err, EncodeError::ChecksumOutOfRange("-1".into()));

        let err = SymbolInput::from_segments("97", "86005", "69175", Some("a")).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidDigit {
                field: "checksum",
                ch: 'a'
            }
        );

        let input = SymbolInput::from_segments("97", "86005", "69175", Some("7")).unwrap();
        assert_eq!(input.to_string(), "9786005691757");
        assert!(input.has_valid_checksum());
    }
}
