use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockquest_core::{BinId, DomainError, DomainResult, Entity, Money, Sku, StockItemId};

use crate::catalog::DEFAULT_REORDER_POINT;
use crate::status::{Movement, StockStatus, classify, movement};

/// Primary location of an item with no bin holdings.
pub const UNASSIGNED_LOCATION: &str = "UNASSIGNED";

/// Multiplier from reorder point (or initial quantity) to `max_stock`.
pub const MAX_STOCK_FACTOR: u32 = 5;

/// One bin's contribution to an item's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub bin_id: BinId,
    pub quantity: u32,
    pub last_updated: DateTime<Utc>,
}

/// Per-SKU stock view derived from the catalog and bin holdings.
///
/// `quantity` tracks `Σ locations.quantity` after aggregation and transfers.
/// Adjustments and audits overwrite `quantity` without touching `locations`.
/// Items added by hand list their entered location, but no bin holds that
/// stock until the bins are updated at the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: StockItemId,
    pub sku: Sku,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub reorder_point: u32,
    pub max_stock: u32,
    /// Bin holding the most of this SKU, or [`UNASSIGNED_LOCATION`].
    pub location: BinId,
    pub locations: Vec<Location>,
    pub status: StockStatus,
    pub movement: Movement,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_audit: Option<DateTime<Utc>>,
    /// Unit price.
    pub value: Money,
}

impl StockItem {
    pub fn locations_total(&self) -> u64 {
        self.locations.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_unassigned(&self) -> bool {
        self.location.as_str() == UNASSIGNED_LOCATION
    }

    /// Stock value at unit price.
    pub fn stock_value(&self) -> Money {
        self.value.times(self.quantity)
    }

    /// Copy with a new quantity, reclassified and stamped as updated at `now`.
    pub fn with_quantity(&self, quantity: u32, now: DateTime<Utc>) -> StockItem {
        let mut next = self.reclassified(quantity);
        next.last_updated = now;
        next
    }

    /// Copy with an absolute counted quantity, reclassified and stamped as audited at `now`.
    pub fn with_counted(&self, counted: u32, now: DateTime<Utc>) -> StockItem {
        let mut next = self.reclassified(counted);
        next.last_audit = Some(now);
        next
    }

    /// Copy with `locations` replaced; the primary location follows, `quantity` does not.
    pub fn with_locations(&self, locations: Vec<Location>) -> StockItem {
        let mut next = self.clone();
        next.location = primary_location(&locations);
        next.locations = locations;
        next
    }

    fn reclassified(&self, quantity: u32) -> StockItem {
        StockItem {
            quantity,
            status: classify(quantity, self.reorder_point),
            movement: movement(quantity, self.reorder_point),
            ..self.clone()
        }
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Bin with the strictly largest quantity; the first one seen wins ties.
pub(crate) fn primary_location(locations: &[Location]) -> BinId {
    let mut best: Option<&Location> = None;
    for loc in locations {
        match best {
            Some(b) if loc.quantity <= b.quantity => {}
            _ => best = Some(loc),
        }
    }
    best.map(|l| l.bin_id.clone())
        .unwrap_or_else(|| BinId::new(UNASSIGNED_LOCATION))
}

/// Fields for a manually added stock item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockItem {
    pub sku: Sku,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub reorder_point: Option<u32>,
    #[serde(default)]
    pub max_stock: Option<u32>,
    #[serde(default)]
    pub location: Option<BinId>,
    #[serde(default)]
    pub value: Money,
}

impl NewStockItem {
    pub fn new(sku: impl Into<Sku>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            category: String::new(),
            quantity,
            reorder_point: None,
            max_stock: None,
            location: None,
            value: Money::ZERO,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.sku.as_str().trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(())
    }

    /// Build the stock item. Unset reorder point defaults to 50 and unset
    /// max stock to `quantity × 5`.
    ///
    /// A given `location` becomes the item's single location entry. No bin's
    /// `current_stock` is written, so transfers of this SKU out of that bin
    /// fail until the source reports the stock.
    pub fn into_item(self, id: StockItemId, now: DateTime<Utc>) -> StockItem {
        let reorder_point = match self.reorder_point {
            Some(point) if point > 0 => point,
            _ => DEFAULT_REORDER_POINT,
        };
        let max_stock = match self.max_stock {
            Some(max) if max > 0 => max,
            _ => self.quantity.saturating_mul(MAX_STOCK_FACTOR),
        };
        let locations: Vec<Location> = self
            .location
            .into_iter()
            .map(|bin_id| Location {
                bin_id,
                quantity: self.quantity,
                last_updated: now,
            })
            .collect();

        StockItem {
            id,
            sku: self.sku,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            reorder_point,
            max_stock,
            location: primary_location(&locations),
            locations,
            status: classify(self.quantity, reorder_point),
            movement: movement(self.quantity, reorder_point),
            last_updated: now,
            last_audit: Some(now),
            value: self.value,
        }
    }
}
