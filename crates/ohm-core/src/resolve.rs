//! Staged resolution of V, I, R and P.
//!
//! The stages run in a fixed order and each one only fills slots that are
//! still empty, reading whatever earlier stages (or earlier steps of the same
//! stage) have written:
//!
//! 1. Ohm's law, when at least two of V, I, R are known.
//! 2. P = V·I, when P is unknown.
//! 3. V, I and R from P and whichever of V, I is available.
//! 4. Sufficiency: two of V, I, R must be known or derivable.
//! 5. V = √(P·R) and I = √(P/R) for the P-and-R-only case.

use log::debug;

use crate::{Quantity, QuantitySet};

/// Maximum relative discrepancy between V and I·R.
pub const TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("negative value not allowed: {quantity} is {value}")]
    NegativeValue { quantity: Quantity, value: f64 },
    #[error("{divisor} cannot be zero when deriving {derived}")]
    DivisionByZero { derived: Quantity, divisor: Quantity },
    #[error("inconsistent values: V is {voltage} but I × R is {expected}")]
    Inconsistent { voltage: f64, expected: f64 },
    #[error("insufficient data: at least two of V, I, R must be known or derivable")]
    InsufficientData,
    #[error("{quantity} is not a finite number")]
    NonFinite { quantity: Quantity },
}

/// Whether `computed` matches `given` within [`TOLERANCE`], relative to `given`.
///
/// A `given` of exactly zero only matches a `computed` of exactly zero.
pub fn is_consistent(computed: f64, given: f64) -> bool {
    if given != 0.0 {
        (computed - given).abs() / given < TOLERANCE
    } else {
        computed == 0.0
    }
}

/// Derive every quantity the known values in `input` determine.
///
/// Fails instead of returning a partially resolved set.
pub fn resolve(input: &QuantitySet) -> Result<QuantitySet, ResolveError> {
    check_inputs(input)?;

    let set = ohms_law(*input)?;
    let set = power_forward(set)?;
    let set = power_backward(set)?;
    check_sufficient(&set)?;
    power_completion(set)
}

fn check_inputs(set: &QuantitySet) -> Result<(), ResolveError> {
    for (quantity, value) in set.iter() {
        let Some(value) = value else {
            continue;
        };
        if value < 0.0 {
            return Err(ResolveError::NegativeValue { quantity, value });
        }
        if !value.is_finite() {
            return Err(ResolveError::NonFinite { quantity });
        }
    }
    Ok(())
}

fn divide(
    numerator: f64,
    denominator: f64,
    derived: Quantity,
    divisor: Quantity,
) -> Result<f64, ResolveError> {
    if denominator == 0.0 {
        return Err(ResolveError::DivisionByZero { derived, divisor });
    }
    Ok(numerator / denominator)
}

fn derive(
    set: QuantitySet,
    quantity: Quantity,
    value: f64,
    relation: &str,
) -> Result<QuantitySet, ResolveError> {
    if !value.is_finite() {
        return Err(ResolveError::NonFinite { quantity });
    }
    debug!("derived {} = {} ({})", quantity.symbol(), value, relation);
    Ok(set.with(quantity, Some(value)))
}

fn check_ohms_law(set: &QuantitySet) -> Result<(), ResolveError> {
    if let (Some(v), Some(i), Some(r)) = (set.voltage, set.current, set.resistance) {
        let expected = i * r;
        if !is_consistent(v, expected) {
            return Err(ResolveError::Inconsistent {
                voltage: v,
                expected,
            });
        }
    }
    Ok(())
}

fn ohms_law(set: QuantitySet) -> Result<QuantitySet, ResolveError> {
    use Quantity::*;

    if set.ohm_known_count() < 2 {
        return Ok(set);
    }

    let set = match (set.voltage, set.current, set.resistance) {
        (None, Some(i), Some(r)) => derive(set, Voltage, i * r, "I * R")?,
        (Some(v), None, Some(r)) => {
            derive(set, Current, divide(v, r, Current, Resistance)?, "V / R")?
        }
        (Some(v), Some(i), None) => {
            derive(set, Resistance, divide(v, i, Resistance, Current)?, "V / I")?
        }
        _ => set,
    };

    check_ohms_law(&set)?;
    Ok(set)
}

fn power_forward(set: QuantitySet) -> Result<QuantitySet, ResolveError> {
    match (set.power, set.voltage, set.current) {
        (None, Some(v), Some(i)) => derive(set, Quantity::Power, v * i, "V * I"),
        _ => Ok(set),
    }
}

fn power_backward(mut set: QuantitySet) -> Result<QuantitySet, ResolveError> {
    use Quantity::*;

    let Some(p) = set.power else {
        return Ok(set);
    };

    if let (None, Some(i)) = (set.voltage, set.current) {
        set = derive(set, Voltage, divide(p, i, Voltage, Current)?, "P / I")?;
    }
    if let (None, Some(v)) = (set.current, set.voltage) {
        set = derive(set, Current, divide(p, v, Current, Voltage)?, "P / V")?;
    }
    if let (None, Some(v)) = (set.resistance, set.voltage) {
        set = derive(set, Resistance, divide(v * v, p, Resistance, Power)?, "V² / P")?;
    }
    if let (None, Some(i)) = (set.resistance, set.current) {
        set = derive(set, Resistance, divide(p, i * i, Resistance, Current)?, "P / I²")?;
    }
    Ok(set)
}

fn check_sufficient(set: &QuantitySet) -> Result<(), ResolveError> {
    // P and R together still pin down V and I in the completion stage.
    let completes = set.power.is_some() && set.resistance.is_some();
    if set.ohm_known_count() < 2 && !completes {
        return Err(ResolveError::InsufficientData);
    }
    Ok(())
}

fn power_completion(mut set: QuantitySet) -> Result<QuantitySet, ResolveError> {
    use Quantity::*;

    let Some(p) = set.power else {
        return Ok(set);
    };

    if let (None, Some(r)) = (set.voltage, set.resistance) {
        set = derive(set, Voltage, (p * r).sqrt(), "√(P * R)")?;
    }
    if let (None, Some(r)) = (set.current, set.resistance) {
        set = derive(set, Current, divide(p, r, Current, Resistance)?.sqrt(), "√(P / R)")?;
    }
    Ok(set)
}
