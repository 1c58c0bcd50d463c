//! Solver for Ohm's law and the power equations.
//!
//! Given any subset of voltage, current, resistance and power, [`resolve`]
//! derives every quantity the known values determine and rejects inputs that
//! are negative, contradictory or not enough to work with. [`calculate`] is
//! the same operation starting from raw user text.

pub mod format;
pub mod parse;
pub mod quantity;
pub mod resolve;

pub use format::{DEFAULT_DIGITS, format_reading, format_value};
pub use parse::{CalcError, ParseError, RawInputs, calculate, parse_value};
pub use quantity::QuantitySet;
pub use resolve::{ResolveError, TOLERANCE, is_consistent, resolve};

use serde::{Deserialize, Serialize};

/// One of the four electrical quantities the solver works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "V")]
    Voltage,
    #[serde(rename = "I")]
    Current,
    #[serde(rename = "R")]
    Resistance,
    #[serde(rename = "P")]
    Power,
}

impl Quantity {
    /// Display order used for input forms and results.
    pub const ALL: [Quantity; 4] = [
        Quantity::Voltage,
        Quantity::Current,
        Quantity::Resistance,
        Quantity::Power,
    ];

    pub const fn symbol(&self) -> &'static str {
        match self {
            Quantity::Voltage => "V",
            Quantity::Current => "I",
            Quantity::Resistance => "R",
            Quantity::Power => "P",
        }
    }

    pub const fn unit_suffix(&self) -> &'static str {
        match self {
            Quantity::Voltage => "V",
            Quantity::Current => "A",
            Quantity::Resistance => "Ω",
            Quantity::Power => "W",
        }
    }

    /// Caption shown next to the input field or result.
    pub const fn label(&self) -> &'static str {
        match self {
            Quantity::Voltage => "Voltage (V)",
            Quantity::Current => "Current (I)",
            Quantity::Resistance => "Resistance (Ω)",
            Quantity::Power => "Power (W)",
        }
    }

    /// Whether `unit` (already stripped of any SI prefix) names this quantity's unit.
    pub(crate) fn accepts_unit(&self, unit: &str) -> bool {
        match self {
            Quantity::Voltage => matches!(unit, "V" | "volt" | "Volt" | "volts" | "Volts"),
            Quantity::Current => matches!(
                unit,
                "A" | "amp" | "amps" | "ampere" | "Ampere" | "amperes" | "Amperes"
            ),
            Quantity::Resistance => {
                matches!(unit, "Ω" | "ohm" | "Ohm" | "ohms" | "Ohms")
            }
            Quantity::Power => matches!(unit, "W" | "watt" | "Watt" | "watts" | "Watts"),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Voltage => write!(f, "voltage"),
            Quantity::Current => write!(f, "current"),
            Quantity::Resistance => write!(f, "resistance"),
            Quantity::Power => write!(f, "power"),
        }
    }
}

impl std::str::FromStr for Quantity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "V" | "v" | "voltage" | "Voltage" => Ok(Quantity::Voltage),
            "I" | "i" | "current" | "Current" => Ok(Quantity::Current),
            "R" | "r" | "resistance" | "Resistance" => Ok(Quantity::Resistance),
            "P" | "p" | "power" | "Power" => Ok(Quantity::Power),
            other => Err(format!(
                "Unknown quantity: '{}' (expected one of V, I, R, P)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_names() {
        for q in Quantity::ALL {
            assert_eq!(q.symbol().parse::<Quantity>().unwrap(), q);
            assert_eq!(q.to_string().parse::<Quantity>().unwrap(), q);
        }
        assert!("X".parse::<Quantity>().is_err());
        assert_eq!(Quantity::Resistance.label(), "Resistance (Ω)");
    }
}
