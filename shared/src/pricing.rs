use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BookingDuration;

/// One cell of the pricing matrix: duration × trainer × subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PricingKey {
    pub duration: BookingDuration,
    pub has_trainer: bool,
    pub is_abo: bool,
}

impl PricingKey {
    pub fn new(duration: BookingDuration, has_trainer: bool, is_abo: bool) -> Self {
        Self {
            duration,
            has_trainer,
            is_abo,
        }
    }

    /// All eight cells in settings-page order
    pub fn all() -> Vec<PricingKey> {
        let mut keys = Vec::with_capacity(8);
        for duration in BookingDuration::ALL {
            for has_trainer in [false, true] {
                for is_abo in [false, true] {
                    keys.push(PricingKey::new(duration, has_trainer, is_abo));
                }
            }
        }
        keys
    }

    /// Key used by the backend, e.g. `30_no_trainer_abo`
    pub fn key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.duration.minutes(),
            if self.has_trainer { "trainer" } else { "no_trainer" },
            if self.is_abo { "abo" } else { "no_abo" }
        )
    }

    pub fn label(&self) -> String {
        format!(
            "{} min, {}, {}",
            self.duration.minutes(),
            if self.has_trainer { "With Trainer" } else { "No Trainer" },
            if self.is_abo { "With ABO" } else { "No ABO" }
        )
    }
}

impl fmt::Display for PricingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Prices keyed by [`PricingKey::key`]. Unknown keys from the backend are
/// kept so a save round-trips them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingMatrix(BTreeMap<String, f64>);

impl PricingMatrix {
    pub fn get(&self, key: PricingKey) -> f64 {
        self.0.get(&key.key()).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: PricingKey, price: f64) {
        self.0.insert(key.key(), price);
    }

    /// Price of a booking; missing cells cost nothing.
    pub fn price_for(&self, duration: BookingDuration, has_trainer: bool, is_abo: bool) -> f64 {
        self.get(PricingKey::new(duration, has_trainer, is_abo))
    }

    /// Set a cell from a number input. Unparseable input counts as zero.
    pub fn set_from_input(&mut self, key: PricingKey, input: &str) {
        let price = input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .unwrap_or(0.0);
        self.set(key, price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_backend_format() {
        let keys: Vec<String> = PricingKey::all().iter().map(PricingKey::key).collect();
        assert_eq!(
            keys,
            vec![
                "30_no_trainer_no_abo",
                "30_no_trainer_abo",
                "30_trainer_no_abo",
                "30_trainer_abo",
                "60_no_trainer_no_abo",
                "60_no_trainer_abo",
                "60_trainer_no_abo",
                "60_trainer_abo",
            ]
        );
        assert_eq!(
            PricingKey::new(BookingDuration::HalfHour, true, false).label(),
            "30 min, With Trainer, No ABO"
        );
    }

    #[test]
    fn test_price_lookup_defaults_to_zero() {
        let matrix: PricingMatrix =
            serde_json::from_str(r#"{"60_no_trainer_no_abo": 12.5, "legacy_key": 1.0}"#).unwrap();
        assert_eq!(matrix.price_for(BookingDuration::Hour, false, false), 12.5);
        assert_eq!(matrix.price_for(BookingDuration::Hour, true, false), 0.0);

        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["legacy_key"], 1.0);
    }

    #[test]
    fn test_set_from_input() {
        let mut matrix = PricingMatrix::default();
        let key = PricingKey::new(BookingDuration::HalfHour, false, true);
        matrix.set_from_input(key, "7.25");
        assert_eq!(matrix.get(key), 7.25);
        matrix.set_from_input(key, "abc");
        assert_eq!(matrix.get(key), 0.0);
    }
}
