//! Alpha-to-numeric ISO code lookup for the vendor protocol.

use std::{
    collections::HashMap,
    sync::LazyLock,
};

use crate::consts::DEFAULT_NUMERIC_CODE;

static CURRENCY_NUMERIC: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("GBP", "826"),
        ("USD", "840"),
        ("EUR", "978"),
        ("AUD", "036"),
        ("CAD", "124"),
        ("NZD", "554"),
        ("SEK", "752"),
        ("NOK", "578"),
        ("DKK", "208"),
        ("CHF", "756"),
    ])
});

// The country values reuse the ISO-4217 style of the currency table. That is
// a vendor-protocol simplification, not a bug.
static COUNTRY_NUMERIC: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("GB", "826"),
        ("US", "840"),
        ("IE", "372"),
        ("AU", "036"),
        ("NZ", "554"),
        ("CA", "124"),
        ("FR", "250"),
        ("DE", "276"),
    ])
});

/// Numeric code resolver with per-instance overrides.
///
/// The built-in tables cover the currencies and countries the vendor is known
/// to settle in; deployments add or replace entries through configuration
/// instead of code changes. Anything unknown falls back to GBP / GB ("826").
#[derive(Clone, Debug, Default)]
pub struct NumericCodes {
    currency_overrides: HashMap<String, String>,
    country_overrides: HashMap<String, String>,
}

impl NumericCodes {
    /// Resolver backed by the built-in tables only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds currency entries that take precedence over the built-in table.
    pub fn with_currency_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.currency_overrides = overrides;
        self
    }

    /// Adds country entries that take precedence over the built-in table.
    pub fn with_country_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.country_overrides = overrides;
        self
    }

    /// ISO-4217 numeric code for an alpha-3 currency code.
    pub fn currency(&self, alpha3: &str) -> String {
        self.currency_overrides
            .get(alpha3)
            .cloned()
            .or_else(|| CURRENCY_NUMERIC.get(alpha3).map(|code| (*code).to_string()))
            .unwrap_or_else(|| DEFAULT_NUMERIC_CODE.to_string())
    }

    /// Numeric code for an alpha-2 country code.
    pub fn country(&self, alpha2: &str) -> String {
        self.country_overrides
            .get(alpha2)
            .cloned()
            .or_else(|| COUNTRY_NUMERIC.get(alpha2).map(|code| (*code).to_string()))
            .unwrap_or_else(|| DEFAULT_NUMERIC_CODE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_currencies_resolve_to_documented_codes() {
        let codes = NumericCodes::new();
        for (alpha, numeric) in [
            ("GBP", "826"),
            ("USD", "840"),
            ("EUR", "978"),
            ("AUD", "036"),
            ("CAD", "124"),
            ("NZD", "554"),
            ("SEK", "752"),
            ("NOK", "578"),
            ("DKK", "208"),
            ("CHF", "756"),
        ] {
            assert_eq!(codes.currency(alpha), numeric, "currency {alpha}");
        }
    }

    #[test]
    fn unknown_currency_falls_back_to_gbp() {
        let codes = NumericCodes::new();
        assert_eq!(codes.currency("JPY"), "826");
        assert_eq!(codes.currency(""), "826");
    }

    #[test]
    fn unknown_country_falls_back_to_gb() {
        let codes = NumericCodes::new();
        assert_eq!(codes.country("GB"), "826");
        assert_eq!(codes.country("FR"), "250");
        assert_eq!(codes.country("ZZ"), "826");
    }

    #[test]
    fn overrides_win_over_builtin_table() {
        let codes = NumericCodes::new()
            .with_currency_overrides(HashMap::from([
                ("JPY".to_string(), "392".to_string()),
                ("GBP".to_string(), "999".to_string()),
            ]))
            .with_country_overrides(HashMap::from([("JP".to_string(), "392".to_string())]));
        assert_eq!(codes.currency("JPY"), "392");
        assert_eq!(codes.currency("GBP"), "999");
        assert_eq!(codes.country("JP"), "392");
        // untouched entries still come from the built-in table
        assert_eq!(codes.currency("USD"), "840");
    }
}
