//! Prices in integer cents.
//!
//! All money in the system is USD stored as whole cents, matching what the
//! payment provider reports. Display formatting and the percent-off figure
//! for sale pricing live here so every surface renders them the same way.

use serde::{Deserialize, Serialize};

/// A price in whole USD cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a price from a cent amount.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Format for display, e.g. `$19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        format!("{sign}${}.{:02}", abs / 100, abs % 100)
    }

    /// Rounded percentage saved when this price is discounted to `sale`.
    ///
    /// Returns `None` unless `sale` is strictly less than the regular price
    /// and both are positive, so a misconfigured sale never renders a bogus
    /// discount badge.
    #[must_use]
    pub fn percent_off(&self, sale: Self) -> Option<u8> {
        if self.0 <= 0 || sale.0 < 0 || sale.0 >= self.0 {
            return None;
        }
        let saved = self.0 - sale.0;
        // Round half-up to the nearest whole percent.
        let pct = (saved * 100 + self.0 / 2) / self.0;
        u8::try_from(pct).ok()
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<i64> for Price {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatting() {
        assert_eq!(Price::from_cents(10_000).display(), "$100.00");
        assert_eq!(Price::from_cents(7_500).display(), "$75.00");
        assert_eq!(Price::from_cents(5).display(), "$0.05");
        assert_eq!(Price::from_cents(0).display(), "$0.00");
    }

    #[test]
    fn test_percent_off_quarter() {
        // Regular 10000 cents, sale 7500 cents -> 25% off
        let regular = Price::from_cents(10_000);
        let sale = Price::from_cents(7_500);
        assert_eq!(regular.percent_off(sale), Some(25));
    }

    #[test]
    fn test_percent_off_rounds() {
        // 2999 -> 1999 saves 33.34%, rounds to 33
        assert_eq!(
            Price::from_cents(2_999).percent_off(Price::from_cents(1_999)),
            Some(33)
        );
        // 300 -> 100 saves 66.67%, rounds to 67
        assert_eq!(
            Price::from_cents(300).percent_off(Price::from_cents(100)),
            Some(67)
        );
    }

    #[test]
    fn test_percent_off_requires_sale_below_regular() {
        let p = Price::from_cents(1_000);
        assert_eq!(p.percent_off(Price::from_cents(1_000)), None);
        assert_eq!(p.percent_off(Price::from_cents(1_500)), None);
        assert_eq!(Price::from_cents(0).percent_off(Price::from_cents(0)), None);
    }

    #[test]
    fn test_serde_transparent() {
        let p = Price::from_cents(1234);
        assert_eq!(serde_json::to_string(&p).expect("serialize"), "1234");
        let back: Price = serde_json::from_str("1234").expect("deserialize");
        assert_eq!(back, p);
    }
}
