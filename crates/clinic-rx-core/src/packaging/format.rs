//! Display precision for pack and unit quantities.

use serde::{Deserialize, Serialize};

/// Values this close to an integer display without decimals.
const WHOLE_TOLERANCE: f64 = 1e-9;

/// Decimal places for non-whole quantities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayPrecision {
    /// Decimals for dispensing-unit totals
    pub unit_decimals: usize,
    /// Decimals for storage-unit (pack) amounts
    pub pack_decimals: usize,
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self {
            unit_decimals: 1,
            pack_decimals: 2,
        }
    }
}

impl DisplayPrecision {
    /// Format a dispensing-unit quantity.
    pub fn format_units(&self, quantity: f64) -> String {
        format_quantity(quantity, self.unit_decimals)
    }

    /// Format a storage-unit quantity.
    pub fn format_packs(&self, quantity: f64) -> String {
        format_quantity(quantity, self.pack_decimals)
    }
}

/// Whether a quantity is a whole number.
pub fn is_whole(quantity: f64) -> bool {
    (quantity - quantity.round()).abs() < WHOLE_TOLERANCE
}

/// Whole numbers without decimals, everything else with exactly `decimals`.
///
/// Wholeness is judged after rounding to `decimals`, so 0.9999 shows as "1".
pub fn format_quantity(quantity: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (quantity * scale).round() / scale;
    if is_whole(rounded) {
        // + 0.0 folds -0 into 0
        format!("{:.0}", rounded.round() + 0.0)
    } else {
        format!("{:.*}", decimals, quantity)
    }
}

/// Format a dispensing-unit quantity with the default precision.
pub fn format_units(quantity: f64) -> String {
    DisplayPrecision::default().format_units(quantity)
}

/// Format a storage-unit quantity with the default precision.
pub fn format_packs(quantity: f64) -> String {
    DisplayPrecision::default().format_packs(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_units(20.0), "20");
        assert_eq!(format_packs(2.0), "2");
        assert_eq!(format_packs(0.0), "0");
        // Float noise from conversions
        assert_eq!(format_units(0.1 * 3.0 * 100.0), "30");
        assert_eq!(format_units(-1e-12), "0");
    }

    #[test]
    fn test_values_rounding_to_whole() {
        assert_eq!(format_packs(0.9999), "1");
        assert_eq!(format_units(0.9999 * 3.0), "3");
        assert_eq!(format_packs(1.996), "2");
        assert_eq!(format_packs(0.994), "0.99");
        assert_eq!(format_units(-0.01), "0");
    }

    #[test]
    fn test_fractional_units_one_decimal() {
        assert_eq!(format_units(12.5), "12.5");
        assert_eq!(format_units(1.0 / 3.0), "0.3");
    }

    #[test]
    fn test_fractional_packs_two_decimals() {
        assert_eq!(format_packs(0.05), "0.05");
        assert_eq!(format_packs(0.1), "0.10");
        assert_eq!(format_packs(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_custom_precision() {
        let precision = DisplayPrecision {
            unit_decimals: 2,
            pack_decimals: 3,
        };
        assert_eq!(precision.format_units(2.5), "2.50");
        assert_eq!(precision.format_packs(0.125), "0.125");
        assert_eq!(precision.format_packs(4.0), "4");
    }
}
