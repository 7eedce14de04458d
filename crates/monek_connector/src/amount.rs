//! Integer minor-unit amount representation.

use serde::{Deserialize, Serialize};

/// A monetary amount in its minor denomination (pence, cents).
///
/// Keeping amounts as integers past this point avoids floating-point drift
/// in anything that is actually sent to the vendor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Forms a new minor unit from an amount already in minor denomination.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Converts a major-denomination amount using the host system's decimal
    /// count, rounding half-away-from-zero so the result matches the totals
    /// the host itself displays.
    pub fn from_major(amount: f64, decimals: u32) -> Self {
        Self((amount * 10_f64.powi(decimals as i32)).round() as i64)
    }

    /// Gets the amount as an i64 value.
    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        // 19.999 at two decimals must land on 2000, never 1999
        assert_eq!(MinorUnit::from_major(19.999, 2), MinorUnit::new(2000));
        // 0.125 is exact in binary, so 2 decimals puts it exactly on the
        // .5 boundary: half-away-from-zero in both directions
        assert_eq!(MinorUnit::from_major(0.125, 2), MinorUnit::new(13));
        assert_eq!(MinorUnit::from_major(-0.125, 2), MinorUnit::new(-13));
    }

    #[test]
    fn exact_amounts_convert_cleanly() {
        assert_eq!(MinorUnit::from_major(19.99, 2), MinorUnit::new(1999));
        assert_eq!(MinorUnit::from_major(0.0, 2), MinorUnit::new(0));
        assert_eq!(MinorUnit::from_major(5.0, 0), MinorUnit::new(5));
        assert_eq!(MinorUnit::from_major(1.234, 3), MinorUnit::new(1234));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let serialized = serde_json::to_string(&MinorUnit::new(2000)).expect("serialize");
        assert_eq!(serialized, "2000");
    }
}
