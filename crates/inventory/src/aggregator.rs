//! Merge per-bin holdings into one stock item per catalog product.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockquest_core::{Sku, StockItemId};

use crate::catalog::{Bin, Product};
use crate::item::{Location, MAX_STOCK_FACTOR, StockItem, primary_location};
use crate::status::{classify, movement};

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Exactly one item per catalog product, in catalog order.
    pub items: Vec<StockItem>,
    /// SKUs held in bins but missing from the catalog, in first-seen order.
    /// They contribute to no item.
    pub orphaned_skus: Vec<Sku>,
}

#[derive(Default)]
struct SkuTotals {
    quantity: u32,
    locations: Vec<Location>,
}

/// Aggregate bin holdings per SKU and join them onto the product catalog.
///
/// Single pass over every bin entry, then one lookup per product. `now` is the
/// `last_updated` of products with no holdings.
pub fn aggregate(bins: &[Bin], products: &[Product], now: DateTime<Utc>) -> Aggregation {
    let mut totals: HashMap<&Sku, SkuTotals> = HashMap::new();

    for bin in bins {
        for stock in &bin.current_stock {
            let entry = totals.entry(&stock.sku).or_default();
            entry.quantity = entry.quantity.saturating_add(stock.quantity);
            entry.locations.push(Location {
                bin_id: bin.id.clone(),
                quantity: stock.quantity,
                last_updated: stock.last_updated,
            });
        }
    }

    let catalog: HashSet<&Sku> = products.iter().map(|p| &p.sku).collect();
    let mut seen_orphans: HashSet<&Sku> = HashSet::new();
    let orphaned_skus: Vec<Sku> = bins
        .iter()
        .flat_map(|bin| bin.current_stock.iter())
        .map(|stock| &stock.sku)
        .filter(|sku| !catalog.contains(sku) && seen_orphans.insert(*sku))
        .cloned()
        .collect();

    if !orphaned_skus.is_empty() {
        tracing::warn!(
            count = orphaned_skus.len(),
            skus = ?orphaned_skus,
            "bin stock references SKUs missing from the product catalog; dropped from aggregation"
        );
    }

    let items = products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let (quantity, locations) = match totals.get(&product.sku) {
                Some(t) => (t.quantity, t.locations.clone()),
                None => (0, Vec::new()),
            };
            build_item(index, product, quantity, locations, now)
        })
        .collect();

    Aggregation { items, orphaned_skus }
}

fn build_item(
    index: usize,
    product: &Product,
    quantity: u32,
    locations: Vec<Location>,
    now: DateTime<Utc>,
) -> StockItem {
    let reorder_point = product.effective_reorder_point();
    let last_updated = locations.iter().map(|l| l.last_updated).max().unwrap_or(now);

    StockItem {
        id: StockItemId::sequential(index),
        sku: product.sku.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        quantity,
        reorder_point,
        max_stock: reorder_point.saturating_mul(MAX_STOCK_FACTOR),
        location: primary_location(&locations),
        locations,
        status: classify(quantity, reorder_point),
        movement: movement(quantity, reorder_point),
        last_updated,
        last_audit: None,
        value: product.price,
    }
}

/// Holdings of one SKU across `bins`, in bin order.
pub fn locations_of(bins: &[Bin], sku: &Sku) -> Vec<Location> {
    bins.iter()
        .flat_map(|bin| {
            bin.current_stock
                .iter()
                .filter(move |s| &s.sku == sku)
                .map(move |s| Location {
                    bin_id: bin.id.clone(),
                    quantity: s.quantity,
                    last_updated: s.last_updated,
                })
        })
        .collect()
}
