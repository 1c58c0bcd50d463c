use std::collections::BTreeMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{Quantity, QuantitySet, ResolveError, resolve};

/// Raw text per quantity, as typed by the user. Missing keys and blank text
/// both mean "unknown".
pub type RawInputs = BTreeMap<Quantity, String>;

const SI_PREFIXES: [(i32, &str); 8] = [
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (-3, "m"),
    (-6, "u"),
    (-6, "µ"),
    (-9, "n"),
    (-12, "p"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    InvalidFormat,
    InvalidNumber,
    InvalidUnit,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFormat => write!(f, "Invalid value format"),
            ParseError::InvalidNumber => write!(f, "Invalid number"),
            ParseError::InvalidUnit => write!(f, "Invalid unit"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("Failed to parse {quantity} '{input}'")]
    Parse {
        quantity: Quantity,
        input: String,
        source: ParseError,
    },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[inline]
fn pow10(exp: i32) -> Option<Decimal> {
    if exp >= 0 {
        let n = 10i128.checked_pow(exp.unsigned_abs())?;
        Decimal::try_from_i128_with_scale(n, 0).ok()
    } else {
        Decimal::try_new(1, exp.unsigned_abs()).ok()
    }
}

fn to_finite(value: f64) -> Result<f64, ParseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidNumber)
    }
}

fn decimal_to_f64(value: Decimal) -> Result<f64, ParseError> {
    value
        .to_f64()
        .ok_or(ParseError::InvalidNumber)
        .and_then(to_finite)
}

/// Resistor "4k7" notation -> 4.7k
///
/// `None` when `s` is not in that shape at all.
fn parse_resistor_k_notation(s: &str) -> Option<Result<f64, ParseError>> {
    let (before_k, after_k) = s.split_once('k')?;

    if before_k.is_empty()
        || after_k.is_empty()
        || !before_k
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '+')
        || !after_k.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    Some(
        k_notation_value(before_k, after_k)
            .ok_or(ParseError::InvalidNumber)
            .and_then(decimal_to_f64),
    )
}

fn k_notation_value(before_k: &str, after_k: &str) -> Option<Decimal> {
    let before_num = before_k.parse::<Decimal>().ok()?;
    let after_num = after_k.parse::<Decimal>().ok()?;
    let digits = i32::try_from(after_k.len()).ok()?;
    let fraction = after_num.checked_mul(pow10(-digits)?)?;
    before_num.checked_add(fraction)?.checked_mul(pow10(3)?)
}

/// Byte length of the number at the start of `s`, exponent included.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let is_mantissa = |b: u8| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+');

    let mut end = bytes.iter().take_while(|b| is_mantissa(**b)).count();
    if end > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_digits = bytes[exp.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

fn parse_decimal(number_str: &str) -> Result<Decimal, ParseError> {
    let parsed = if number_str.contains(['e', 'E']) {
        Decimal::from_scientific(&number_str.replace('E', "e"))
    } else {
        number_str.parse()
    };
    parsed.map_err(|_| ParseError::InvalidNumber)
}

/// Multiplier for `unit_str`, which may carry an SI prefix and must otherwise
/// name `quantity`'s unit (or be empty).
fn unit_multiplier(quantity: Quantity, unit_str: &str) -> Result<Decimal, ParseError> {
    if unit_str.is_empty() || quantity.accepts_unit(unit_str) {
        return Ok(Decimal::ONE);
    }

    for &(exp, prefix) in &SI_PREFIXES {
        if let Some(base_unit) = unit_str.strip_prefix(prefix) {
            if base_unit.is_empty() || quantity.accepts_unit(base_unit) {
                return pow10(exp).ok_or(ParseError::InvalidNumber);
            }
        }
    }

    Err(ParseError::InvalidUnit)
}

/// Parse the text of one input field.
///
/// Blank text is `Ok(None)`. Besides plain numbers ("10", "2.5", "1e3") the
/// field accepts an SI prefix and its own unit ("3.3V", "100mA", "4.7kΩ",
/// "2 W", "1e-3A"), and the resistance field accepts "4k7". Sign is preserved
/// so the caller can reject negative values with a proper error.
pub fn parse_value(quantity: Quantity, raw: &str) -> Result<Option<f64>, ParseError> {
    let s: String = raw.split_whitespace().collect();
    if s.is_empty() {
        return Ok(None);
    }

    if let Ok(value) = s.parse::<f64>() {
        return to_finite(value).map(Some);
    }

    if quantity == Quantity::Resistance {
        if let Some(value) = parse_resistor_k_notation(&s) {
            return value.map(Some);
        }
    }

    let split_pos = number_len(&s);
    if split_pos == 0 {
        return Err(ParseError::InvalidFormat);
    }

    let (number_str, unit_str) = s.split_at(split_pos);
    let number = parse_decimal(number_str)?;
    let multiplier = unit_multiplier(quantity, unit_str)?;

    let value = number
        .checked_mul(multiplier)
        .ok_or(ParseError::InvalidNumber)?;
    decimal_to_f64(value).map(Some)
}

/// Parse every field in V, I, R, P order and resolve the result.
///
/// A negative field is rejected as soon as it is read, before any later
/// field is parsed.
pub fn calculate(raw: &RawInputs) -> Result<QuantitySet, CalcError> {
    let mut set = QuantitySet::new();

    for quantity in Quantity::ALL {
        let Some(input) = raw.get(&quantity) else {
            continue;
        };
        let value = parse_value(quantity, input).map_err(|source| CalcError::Parse {
            quantity,
            input: input.trim().to_string(),
            source,
        })?;
        if let Some(value) = value.filter(|v| *v < 0.0) {
            return Err(ResolveError::NegativeValue { quantity, value }.into());
        }
        set = set.with(quantity, value);
    }

    log::debug!("parsed inputs: {:?}", set);
    Ok(resolve(&set)?)
}
