//! Warehouse stock core.
//!
//! Turns per-bin holdings plus a product catalog into classified stock items
//! and aggregate statistics, gates recomputation behind a freshness window,
//! and applies the stock mutations (adjust, audit, transfer, add).
//!
//! Everything here is synchronous domain logic; IO is confined to
//! [`WarehouseSnapshot::load_dir`] and whatever [`WarehouseSource`] the host
//! plugs in.

pub mod aggregator;
pub mod bin_audit;
pub mod bin_metrics;
pub mod cache;
pub mod catalog;
pub mod clock;
pub mod item;
pub mod query;
pub mod rewards;
pub mod selection;
pub mod stats;
pub mod status;
pub mod store;
pub mod transfer;

pub use aggregator::{Aggregation, aggregate, locations_of};
pub use bin_audit::{BinAudit, BinAuditLine, BinAuditResult};
pub use bin_metrics::{BinMetrics, bin_metrics, zones};
pub use cache::{CacheGate, CacheStatus, DEFAULT_FRESHNESS};
pub use catalog::{
    Bin, BinStock, DEFAULT_REORDER_POINT, FixtureError, InMemorySource, Product, StockTake,
    StockTakeCount, StockTakeStatus, StockTakeSummary, WarehouseSnapshot, WarehouseSource,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use item::{Location, NewStockItem, StockItem, UNASSIGNED_LOCATION};
pub use query::{SortKey, StatusFilter, StockQuery};
pub use rewards::{Achievement, Achievements, NoticeLevel, Notifier, StockEnvelope, StockEvent, tally_xp};
pub use selection::Selection;
pub use stats::{AggregateStats, summarize};
pub use status::{Movement, StockStatus, classify, movement};
pub use store::{AuditOutcome, ReloadOutcome, StockStore, StoreConfig};
pub use transfer::{TransferPlan, TransferRequest, plan_transfer};
