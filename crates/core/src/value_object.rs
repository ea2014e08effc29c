//! Value objects: equality by value, not identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Non-negative monetary amount held in the smallest currency unit (cents).
///
/// Rendered (and serialized) as a fixed two-decimal string, e.g. `"12.50"`.
/// Deserializes from either that string form or a plain JSON number, which is
/// how catalog fixtures carry prices.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Convert a major-unit amount (e.g. `12.5`) to cents, rounding half away from zero.
    pub fn from_major(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(format!(
                "amount must be a finite non-negative number (got {amount})"
            )));
        }
        Ok(Self((amount * 100.0).round() as u64))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `self × quantity`, saturating at `u64::MAX` cents.
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl core::str::FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("invalid amount: {s:?}")))?;
        Money::from_major(amount)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let money = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Money::from_major(n),
            Raw::Text(s) => s.parse(),
        };
        money.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(1250).to_string(), "12.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major(19.999).unwrap().cents(), 2000);
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(matches!(Money::from_major(-1.0), Err(DomainError::Validation(_))));
        assert!(matches!(Money::from_major(f64::NAN), Err(DomainError::Validation(_))));
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let from_number: Money = serde_json::from_str("4.5").unwrap();
        let from_text: Money = serde_json::from_str("\"4.50\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"4.50\"");
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Money::from_cents(250).times(4), Money::from_cents(1000));
        assert_eq!(Money::from_cents(250).times(0), Money::ZERO);
    }

    proptest! {
        #[test]
        fn sum_matches_cent_arithmetic(cents in prop::collection::vec(0u64..1_000_000u64, 0..20)) {
            let total: Money = cents.iter().copied().map(Money::from_cents).sum();
            prop_assert_eq!(total.cents(), cents.iter().sum::<u64>());
        }
    }
}
