use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

use crate::Quantity;

/// Significant digits shown for results unless the caller asks otherwise.
pub const DEFAULT_DIGITS: u32 = 4;

const SI_PREFIXES: [(i32, &str); 8] = [
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (0, ""),
    (-3, "m"),
    (-6, "µ"),
    (-9, "n"),
    (-12, "p"),
];

fn fmt_significant(x: Decimal) -> String {
    let formatted = format!("{}", x);

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

fn scale_to_si(raw: f64) -> (f64, &'static str) {
    for &(exp, sym) in &SI_PREFIXES {
        let factor = 10f64.powi(exp);
        // Values parsed as e.g. 1mA may land an ulp below their prefix.
        if raw.abs() >= factor * (1.0 - 1e-12) {
            let scaled = if exp < 0 {
                raw * 10f64.powi(-exp)
            } else {
                raw / factor
            };
            return (scaled, sym);
        }
    }
    (raw, "")
}

/// Format `value` to roughly `digits` significant digits, trimming trailing
/// zeros: `10`, `0.5`, `1.667`.
pub fn format_value(value: f64, digits: u32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let in_range = (1e-15..1e15).contains(&value.abs());

    let rounded = if in_range {
        Decimal::from_f64(value)
            .and_then(|d| d.round_sf_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero))
    } else {
        None
    };

    match rounded {
        Some(d) => fmt_significant(d.normalize()),
        None => format!("{:.*e}", (digits - 1) as usize, value),
    }
}

/// Engineering display with an SI prefix and the quantity's unit:
/// `4.7kΩ`, `500mA`, `20W`.
pub fn format_reading(quantity: Quantity, value: f64, digits: u32) -> String {
    let (scaled, prefix) = scale_to_si(value);
    format!(
        "{}{}{}",
        format_value(scaled, digits),
        prefix,
        quantity.unit_suffix()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        for (value, expected) in [
            (10.0, "10"),
            (0.5, "0.5"),
            (5.0 / 3.0, "1.667"),
            (20.0, "20"),
            (12345.0, "12350"),
            (0.0, "0"),
            (4700.000000000001, "4700"),
            (0.1 + 0.2, "0.3"),
        ] {
            assert_eq!(format_value(value, DEFAULT_DIGITS), expected, "{value}");
        }
    }

    #[test]
    fn test_format_value_digits() {
        assert_eq!(format_value(5.0 / 3.0, 2), "1.7");
        assert_eq!(format_value(5.0 / 3.0, 6), "1.66667");
        assert_eq!(format_value(1e20, 4), "1.000e20");
    }

    #[test]
    fn test_format_reading() {
        for (quantity, value, expected) in [
            (Quantity::Resistance, 4700.0, "4.7kΩ"),
            (Quantity::Current, 0.5, "500mA"),
            (Quantity::Current, 0.1, "100mA"),
            (Quantity::Power, 20.0, "20W"),
            (Quantity::Voltage, 10.0, "10V"),
            (Quantity::Voltage, 0.0, "0V"),
            (Quantity::Current, 2.5e-6, "2.5µA"),
            (Quantity::Resistance, 1.5e6, "1.5MΩ"),
        ] {
            assert_eq!(format_reading(quantity, value, DEFAULT_DIGITS), expected);
        }
    }
}
