//! Aggregate counters over the classified item list.

use serde::{Deserialize, Serialize};

use stockquest_core::Money;

use crate::catalog::{StockTake, StockTakeStatus};
use crate::item::StockItem;
use crate::status::StockStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Σ quantity across all items.
    pub total_items: u64,
    /// Σ quantity × unit price.
    pub total_value: Money,
    pub low_stock_count: usize,
    pub critical_count: usize,
    pub perfect_audits: usize,
}

/// Recompute all counters in one pass over `items` and one over `stock_takes`.
pub fn summarize(items: &[StockItem], stock_takes: &[StockTake]) -> AggregateStats {
    let mut stats = AggregateStats {
        perfect_audits: count_perfect_audits(stock_takes),
        ..AggregateStats::default()
    };

    for item in items {
        stats.total_items += u64::from(item.quantity);
        stats.total_value = stats.total_value.saturating_add(item.stock_value());
        match item.status {
            StockStatus::Low => stats.low_stock_count += 1,
            StockStatus::Critical => stats.critical_count += 1,
            StockStatus::Healthy => {}
        }
    }

    stats
}

/// Perfect audits across completed stock takes.
///
/// A stock take with per-count lines contributes one per zero-variance line;
/// one without lines contributes one if its summary accuracy is at least 100%.
pub fn count_perfect_audits(stock_takes: &[StockTake]) -> usize {
    stock_takes
        .iter()
        .filter(|st| st.status == StockTakeStatus::Completed)
        .map(|st| match (&st.counts, &st.summary) {
            (Some(counts), _) => counts.iter().filter(|c| c.variance == 0).count(),
            (None, Some(summary)) if summary.accuracy_rate >= 100.0 => 1,
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stockquest_core::{Sku, StockItemId};

    use crate::catalog::{StockTakeCount, StockTakeSummary};
    use crate::item::NewStockItem;

    fn item(sku: &str, quantity: u32, price_cents: u64) -> StockItem {
        let mut fields = NewStockItem::new(sku, sku, quantity);
        fields.reorder_point = Some(50);
        fields.value = Money::from_cents(price_cents);
        fields.into_item(StockItemId::new(sku), Utc.timestamp_opt(0, 0).unwrap())
    }

    fn take(status: StockTakeStatus, variances: Option<Vec<i64>>, accuracy: Option<f64>) -> StockTake {
        StockTake {
            id: "ST".to_string(),
            status,
            counts: variances.map(|vs| {
                vs.into_iter()
                    .map(|variance| StockTakeCount {
                        sku: Sku::new("X"),
                        expected: None,
                        counted: None,
                        variance,
                    })
                    .collect()
            }),
            summary: accuracy.map(|accuracy_rate| StockTakeSummary { accuracy_rate }),
        }
    }

    #[test]
    fn totals_and_status_counts() {
        let items = vec![item("A", 0, 100), item("B", 40, 250), item("C", 200, 10)];
        let stats = summarize(&items, &[]);

        assert_eq!(stats.total_items, 240);
        assert_eq!(stats.total_value, Money::from_cents(40 * 250 + 200 * 10));
        assert_eq!(stats.critical_count, 1);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.perfect_audits, 0);
    }

    #[test]
    fn perfect_audits_prefer_count_lines_over_summary() {
        let takes = vec![
            take(StockTakeStatus::Completed, Some(vec![0, 3, 0]), Some(100.0)),
            take(StockTakeStatus::Completed, None, Some(100.0)),
            take(StockTakeStatus::Completed, None, Some(99.9)),
            take(StockTakeStatus::Completed, Some(vec![]), Some(100.0)),
            take(StockTakeStatus::InProgress, Some(vec![0, 0]), None),
            take(StockTakeStatus::Completed, None, None),
        ];

        assert_eq!(count_perfect_audits(&takes), 3);
    }

    #[test]
    fn empty_inputs_give_zeroed_stats() {
        assert_eq!(summarize(&[], &[]), AggregateStats::default());
    }
}
