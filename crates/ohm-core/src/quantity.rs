use serde::{Deserialize, Serialize};

use crate::Quantity;

/// Known (`Some`) and unknown (`None`) values for V, I, R and P.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantitySet {
    #[serde(rename = "V")]
    pub voltage: Option<f64>,
    #[serde(rename = "I")]
    pub current: Option<f64>,
    #[serde(rename = "R")]
    pub resistance: Option<f64>,
    #[serde(rename = "P")]
    pub power: Option<f64>,
}

impl QuantitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Voltage => self.voltage,
            Quantity::Current => self.current,
            Quantity::Resistance => self.resistance,
            Quantity::Power => self.power,
        }
    }

    /// Returns a copy with `quantity` set to `value`.
    pub fn with(mut self, quantity: Quantity, value: Option<f64>) -> Self {
        let slot = match quantity {
            Quantity::Voltage => &mut self.voltage,
            Quantity::Current => &mut self.current,
            Quantity::Resistance => &mut self.resistance,
            Quantity::Power => &mut self.power,
        };
        *slot = value;
        self
    }

    /// How many of V, I and R are present.
    pub fn ohm_known_count(&self) -> usize {
        [self.voltage, self.current, self.resistance]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, Option<f64>)> + '_ {
        Quantity::ALL.into_iter().map(move |q| (q, self.get(q)))
    }
}

impl FromIterator<(Quantity, f64)> for QuantitySet {
    fn from_iter<T: IntoIterator<Item = (Quantity, f64)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(QuantitySet::new(), |set, (q, v)| set.with(q, Some(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_returns_a_copy() {
        let base = QuantitySet::new().with(Quantity::Voltage, Some(5.0));
        let derived = base.with(Quantity::Current, Some(1.0));
        assert_eq!(base.current, None);
        assert_eq!(derived.voltage, Some(5.0));
        assert_eq!(derived.current, Some(1.0));
        assert_eq!(derived.ohm_known_count(), 2);
    }

    #[test]
    fn test_json_shape() {
        let set: QuantitySet = [(Quantity::Voltage, 10.0), (Quantity::Power, 20.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"V": 10.0, "I": null, "R": null, "P": 20.0})
        );
    }
}
