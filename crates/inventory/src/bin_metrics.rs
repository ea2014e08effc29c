//! Per-bin utilization, movement and value, plus zone grouping.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockquest_core::{BinId, Money, Sku};

use crate::catalog::Bin;
use crate::item::StockItem;

/// Zones shown on the floor plan even when no bins are assigned to them.
pub const BINLESS_ZONES: [&str; 4] = ["PRODUCTION", "SMT", "ASSEMBLY", "OUT"];

/// Floor-plan zone order. Zones not listed sort after these, alphabetically.
pub const ZONE_ORDER: [&str; 13] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "OUT", "SMT", "PRODUCTION", "ASSEMBLY", "I",
];

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinMetrics {
    pub bin_id: BinId,
    pub total_quantity: u64,
    /// Percent of capacity in use; may exceed 100.
    pub utilization: f64,
    /// Recency score capped at 100; recently touched entries weigh more.
    pub movement_score: f64,
    pub value: Money,
}

impl BinMetrics {
    pub fn empty(bin_id: BinId) -> Self {
        Self {
            bin_id,
            total_quantity: 0,
            utilization: 0.0,
            movement_score: 0.0,
            value: Money::ZERO,
        }
    }
}

/// Metrics for every bin, valuing holdings at the matching item's unit price.
pub fn bin_metrics(bins: &[Bin], items: &[StockItem], now: DateTime<Utc>) -> Vec<BinMetrics> {
    let prices: HashMap<&Sku, Money> = items.iter().map(|i| (&i.sku, i.value)).collect();
    bins.iter().map(|bin| metrics_for(bin, &prices, now)).collect()
}

fn metrics_for(bin: &Bin, prices: &HashMap<&Sku, Money>, now: DateTime<Utc>) -> BinMetrics {
    let total_quantity = bin.total_quantity();
    let utilization = if bin.capacity == 0 {
        0.0
    } else {
        total_quantity as f64 / f64::from(bin.capacity) * 100.0
    };

    let movement_score: f64 = bin
        .current_stock
        .iter()
        .map(|stock| {
            let days = (now - stock.last_updated).num_milliseconds() as f64 / MILLIS_PER_DAY;
            100.0 / days.max(1.0)
        })
        .sum();

    let value = bin
        .current_stock
        .iter()
        .map(|stock| prices.get(&stock.sku).copied().unwrap_or(Money::ZERO).times(stock.quantity))
        .sum();

    BinMetrics {
        bin_id: bin.id.clone(),
        total_quantity,
        utilization,
        movement_score: movement_score.min(100.0),
        value,
    }
}

/// Bins grouped by zone, in floor-plan order, including the bin-less zones.
pub fn zones(bins: &[Bin]) -> Vec<(String, Vec<&Bin>)> {
    let mut grouped: BTreeMap<&str, Vec<&Bin>> = BTreeMap::new();
    for zone in BINLESS_ZONES {
        grouped.entry(zone).or_default();
    }
    for bin in bins {
        grouped.entry(bin.zone.as_str()).or_default().push(bin);
    }

    let mut zones: Vec<(String, Vec<&Bin>)> = grouped
        .into_iter()
        .map(|(zone, bins)| (zone.to_string(), bins))
        .collect();
    zones.sort_by_key(|(zone, _)| zone_rank(zone));
    zones
}

fn zone_rank(zone: &str) -> (usize, String) {
    match ZONE_ORDER.iter().position(|z| *z == zone) {
        Some(rank) => (rank, String::new()),
        None => (ZONE_ORDER.len(), zone.to_string()),
    }
}
