//! Search, status filter and sort over the stock item list.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockquest_core::DomainError;

use crate::item::StockItem;
use crate::status::StockStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Critical,
    Low,
    Healthy,
}

impl StatusFilter {
    pub fn matches(self, status: StockStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Critical => status == StockStatus::Critical,
            StatusFilter::Low => status == StockStatus::Low,
            StatusFilter::Healthy => status == StockStatus::Healthy,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "critical" => Ok(StatusFilter::Critical),
            "low" => Ok(StatusFilter::Low),
            "healthy" => Ok(StatusFilter::Healthy),
            other => Err(DomainError::validation(format!("unknown status filter: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Name, ascending, case-insensitive.
    #[default]
    Name,
    /// Quantity, largest first.
    Quantity,
    /// Primary location, ascending.
    Location,
    /// Most recently updated first.
    LastUpdated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuery {
    /// Case-insensitive substring matched against name, SKU and primary location.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filter: StatusFilter,
    #[serde(default)]
    pub sort: SortKey,
}

impl StockQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, filter: StatusFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Matching items, sorted. The sort is stable, so equal keys keep input order.
    pub fn apply<'a>(&self, items: &'a [StockItem]) -> Vec<&'a StockItem> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&StockItem> = items
            .iter()
            .filter(|item| match &needle {
                Some(needle) => {
                    item.name.to_lowercase().contains(needle)
                        || item.sku.as_str().to_lowercase().contains(needle)
                        || item.location.as_str().to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|item| self.filter.matches(item.status))
            .collect();

        match self.sort {
            SortKey::Name => matched.sort_by_cached_key(|item| item.name.to_lowercase()),
            SortKey::Quantity => matched.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
            SortKey::Location => matched.sort_by(|a, b| a.location.cmp(&b.location)),
            SortKey::LastUpdated => matched.sort_by(|a, b| b.last_updated.cmp(&a.last_updated)),
        }

        matched
    }
}
