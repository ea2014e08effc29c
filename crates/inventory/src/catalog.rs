//! Input records supplied by the catalog, bin and stock-take collaborators.
//!
//! JSON field names follow the warehouse fixture files (`camelCase`), so a
//! snapshot can be read straight from `products.json`, `bins.json` and
//! `stockTakes.json`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockquest_core::{BinId, DomainError, DomainResult, Entity, Money, Sku};

use crate::bin_audit::BinAuditResult;

/// Reorder point applied when a product does not carry one (or carries zero).
pub const DEFAULT_REORDER_POINT: u32 = 50;

/// Product catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<u32>,
    pub price: Money,
}

impl Product {
    /// Reorder point with the catalog default applied. Zero counts as unset.
    pub fn effective_reorder_point(&self) -> u32 {
        match self.reorder_point {
            Some(point) if point > 0 => point,
            _ => DEFAULT_REORDER_POINT,
        }
    }
}

/// One SKU holding inside a bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinStock {
    pub sku: Sku,
    pub quantity: u32,
    pub last_updated: DateTime<Utc>,
}

/// A physical storage location.
///
/// `Σ current_stock.quantity <= capacity` is a soft expectation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub id: BinId,
    pub zone: String,
    pub capacity: u32,
    #[serde(default)]
    pub current_stock: Vec<BinStock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_audit: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_results: Option<BinAuditResult>,
}

impl Bin {
    pub fn new(id: impl Into<BinId>, zone: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            zone: zone.into(),
            capacity,
            current_stock: Vec::new(),
            last_audit: None,
            audit_results: None,
        }
    }

    pub fn with_stock(mut self, sku: impl Into<Sku>, quantity: u32, last_updated: DateTime<Utc>) -> Self {
        self.current_stock.push(BinStock {
            sku: sku.into(),
            quantity,
            last_updated,
        });
        self
    }

    pub fn total_quantity(&self) -> u64 {
        self.current_stock.iter().map(|s| u64::from(s.quantity)).sum()
    }

    pub fn stock_of(&self, sku: &Sku) -> Option<&BinStock> {
        self.current_stock.iter().find(|s| &s.sku == sku)
    }

    pub fn is_over_capacity(&self) -> bool {
        self.total_quantity() > u64::from(self.capacity)
    }
}

impl Entity for Bin {
    type Id = BinId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockTakeStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Per-SKU line of a stock take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTakeCount {
    pub sku: Sku,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counted: Option<u32>,
    pub variance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTakeSummary {
    /// Percentage (100.0 = every count matched).
    pub accuracy_rate: f64,
}

/// Historical physical count.
///
/// Either `counts` or `summary` (or both) is present. When `counts` is present
/// at all, even empty, it is authoritative and `summary` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTake {
    pub id: String,
    pub status: StockTakeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<StockTakeCount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<StockTakeSummary>,
}

/// Everything the aggregator needs for one computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseSnapshot {
    pub products: Vec<Product>,
    pub bins: Vec<Bin>,
    pub stock_takes: Vec<StockTake>,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct ProductsFile {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct BinsFile {
    bins: Vec<Bin>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockTakesFile {
    stock_takes: Vec<StockTake>,
}

pub const PRODUCTS_FILE: &str = "products.json";
pub const BINS_FILE: &str = "bins.json";
pub const STOCK_TAKES_FILE: &str = "stockTakes.json";

impl WarehouseSnapshot {
    /// Parse the three fixture documents.
    pub fn from_json(products: &str, bins: &str, stock_takes: &str) -> Result<Self, FixtureError> {
        let products: ProductsFile = serde_json::from_str(products).map_err(|source| FixtureError::Parse {
            what: PRODUCTS_FILE,
            source,
        })?;
        let bins: BinsFile = serde_json::from_str(bins).map_err(|source| FixtureError::Parse {
            what: BINS_FILE,
            source,
        })?;
        let stock_takes: StockTakesFile =
            serde_json::from_str(stock_takes).map_err(|source| FixtureError::Parse {
                what: STOCK_TAKES_FILE,
                source,
            })?;

        Ok(Self {
            products: products.products,
            bins: bins.bins,
            stock_takes: stock_takes.stock_takes,
        })
    }

    /// Read `products.json`, `bins.json` and `stockTakes.json` from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| FixtureError::Io { path, source })
        };

        let snapshot = Self::from_json(&read(PRODUCTS_FILE)?, &read(BINS_FILE)?, &read(STOCK_TAKES_FILE)?)?;
        tracing::debug!(
            dir = %dir.display(),
            products = snapshot.products.len(),
            bins = snapshot.bins.len(),
            stock_takes = snapshot.stock_takes.len(),
            "loaded warehouse fixtures"
        );
        Ok(snapshot)
    }
}

/// Supplier of warehouse data, accepting whole-bin replacements back.
///
/// There is no partial-update API: a bin is always written as a full snapshot.
pub trait WarehouseSource {
    fn snapshot(&self) -> DomainResult<WarehouseSnapshot>;

    fn replace_bin(&mut self, bin: Bin) -> DomainResult<()>;
}

/// Source backed by an owned in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: WarehouseSnapshot,
}

impl InMemorySource {
    pub fn new(snapshot: WarehouseSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.snapshot.bins
    }
}

impl WarehouseSource for InMemorySource {
    fn snapshot(&self) -> DomainResult<WarehouseSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn replace_bin(&mut self, bin: Bin) -> DomainResult<()> {
        let slot = self
            .snapshot
            .bins
            .iter_mut()
            .find(|b| b.id == bin.id)
            .ok_or_else(|| DomainError::not_found(format!("bin {}", bin.id)))?;
        *slot = bin;
        Ok(())
    }
}
