//! Moving a quantity of one SKU between two bins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockquest_core::{BinId, DomainError, DomainResult, Sku};

use crate::catalog::{Bin, BinStock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source: BinId,
    pub target: BinId,
    pub sku: Sku,
    pub quantity: u32,
}

impl TransferRequest {
    pub fn new(source: impl Into<BinId>, target: impl Into<BinId>, sku: impl Into<Sku>, quantity: u32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            sku: sku.into(),
            quantity,
        }
    }
}

/// Updated snapshots of both bins after a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub source: Bin,
    pub target: Bin,
}

/// Compute the post-transfer snapshots of `source` and `target`.
///
/// The source entry is debited (entries left at zero are removed) and the
/// target entry credited or created; both are stamped `now`. Nothing is
/// written: callers replace both bins themselves.
pub fn plan_transfer(source: &Bin, target: &Bin, sku: &Sku, quantity: u32, now: DateTime<Utc>) -> DomainResult<TransferPlan> {
    if quantity == 0 {
        return Err(DomainError::validation("transfer quantity must be positive"));
    }
    if source.id == target.id {
        return Err(DomainError::validation(format!(
            "source and target are the same bin ({})",
            source.id
        )));
    }

    let available = source
        .stock_of(sku)
        .map(|s| s.quantity)
        .ok_or_else(|| DomainError::not_found(format!("sku {sku} in bin {}", source.id)))?;
    if quantity > available {
        return Err(DomainError::validation(format!(
            "cannot transfer {quantity} of {sku}; bin {} holds {available}",
            source.id
        )));
    }

    let mut debited = source.clone();
    if let Some(stock) = debited.current_stock.iter_mut().find(|s| &s.sku == sku) {
        stock.quantity -= quantity;
        stock.last_updated = now;
    }
    debited.current_stock.retain(|s| s.quantity > 0);

    let mut credited = target.clone();
    match credited.current_stock.iter_mut().find(|s| &s.sku == sku) {
        Some(stock) => {
            stock.quantity = stock.quantity.checked_add(quantity).ok_or_else(|| {
                DomainError::invariant(format!("bin {} quantity for {sku} would overflow", target.id))
            })?;
            stock.last_updated = now;
        }
        None => credited.current_stock.push(BinStock {
            sku: sku.clone(),
            quantity,
            last_updated: now,
        }),
    }

    if credited.is_over_capacity() {
        tracing::warn!(
            bin = %credited.id,
            capacity = credited.capacity,
            total = credited.total_quantity(),
            "transfer leaves target bin over capacity"
        );
    }

    Ok(TransferPlan {
        source: debited,
        target: credited,
    })
}
