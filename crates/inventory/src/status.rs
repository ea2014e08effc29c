//! Stock health and movement classification.
//!
//! Both classifiers are pure, total functions of `(quantity, reorder_point)`.
//! Thresholds are compared in integer arithmetic (`2q <= rp` rather than
//! `q <= rp * 0.5`) so odd reorder points behave exactly like the fractional rule.

use serde::{Deserialize, Serialize};

/// Health of a stock item relative to its reorder point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Healthy,
}

impl StockStatus {
    /// 2 = critical, 1 = low, 0 = healthy.
    pub fn severity(self) -> u8 {
        match self {
            StockStatus::Critical => 2,
            StockStatus::Low => 1,
            StockStatus::Healthy => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Healthy => "healthy",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement tag. High stock relative to the reorder point reads as slow-moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Slow,
    Medium,
    Fast,
}

/// Classify stock health.
///
/// - `0` → critical
/// - `<= reorder_point / 2` → critical
/// - `<= reorder_point` → low
/// - otherwise healthy
pub fn classify(quantity: u32, reorder_point: u32) -> StockStatus {
    let q = u64::from(quantity);
    let rp = u64::from(reorder_point);

    if q == 0 || 2 * q <= rp {
        StockStatus::Critical
    } else if q <= rp {
        StockStatus::Low
    } else {
        StockStatus::Healthy
    }
}

/// Classify movement: `> 2×rp` slow, `> rp` medium, otherwise fast.
pub fn movement(quantity: u32, reorder_point: u32) -> Movement {
    let q = u64::from(quantity);
    let rp = u64::from(reorder_point);

    if q > 2 * rp {
        Movement::Slow
    } else if q > rp {
        Movement::Medium
    } else {
        Movement::Fast
    }
}
