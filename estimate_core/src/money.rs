//! # Money and Rounding
//!
//! Prices and totals are plain `f64` values in Philippine pesos. This module
//! holds the two rules every output value goes through: rounding to two
//! decimal places, and display with a peso sign and thousands separators.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::money::{round2, Pesos};
//!
//! assert_eq!(round2(4.199999), 4.2);
//! assert_eq!(Pesos(1234567.891).to_string(), "₱1,234,567.89");
//! ```

use serde::{Deserialize, Serialize};

/// ISO 4217 code of the catalog currency
pub const CURRENCY_CODE: &str = "PHP";

/// Round to 2 decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Amount in Philippine pesos
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pesos(pub f64);

impl Pesos {
    /// Format the digits with thousand separators and 2 decimal places,
    /// without the currency sign: `1234567.891` → `"1,234,567.89"`.
    pub fn format_amount(&self) -> String {
        let formatted = format!("{:.2}", self.0.abs());
        let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

        let with_commas = int_part
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(",");

        // "-0.00" is not a useful rendering of a tiny negative residue
        if self.0 < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            format!("-{with_commas}.{dec_part}")
        } else {
            format!("{with_commas}.{dec_part}")
        }
    }
}

impl std::fmt::Display for Pesos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let amount = self.format_amount();
        match amount.strip_prefix('-') {
            Some(abs) => write!(f, "-₱{abs}"),
            None => write!(f, "₱{amount}"),
        }
    }
}
