//! Strongly-typed identifiers used across the domain.
//!
//! Warehouse identifiers are human-facing strings (`"A-01-03"`, `"RES-100K"`,
//! `"STK-0001"`), so these wrap `String` rather than a UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Stock-keeping unit of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

/// Identifier of a physical storage bin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinId(String);

/// Synthetic identifier of a derived stock item (`STK-0001`, `STK-<millis>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockItemId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier without validation.
            ///
            /// Prefer `parse()` for untrusted input.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_string_newtype!(Sku, "Sku");
impl_string_newtype!(BinId, "BinId");
impl_string_newtype!(StockItemId, "StockItemId");

impl StockItemId {
    /// Sequential identifier assigned during aggregation (1-based, zero padded).
    pub fn sequential(index: usize) -> Self {
        Self(format!("STK-{:04}", index + 1))
    }

    /// Identifier for a manually added item, derived from a millisecond timestamp.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("STK-{millis}"))
    }
}
