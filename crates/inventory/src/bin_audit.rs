//! Physical count of every SKU in one bin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockquest_core::{BinId, DomainError, DomainResult, Sku};

use crate::catalog::Bin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinAuditLine {
    pub sku: Sku,
    pub system_quantity: u32,
    pub counted_quantity: u32,
}

impl BinAuditLine {
    /// Counted minus system: positive means surplus, negative shortfall.
    pub fn discrepancy(&self) -> i64 {
        i64::from(self.counted_quantity) - i64::from(self.system_quantity)
    }
}

/// An in-progress bin audit. Every line starts with `counted = system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinAudit {
    bin_id: BinId,
    lines: Vec<BinAuditLine>,
    notes: String,
}

impl BinAudit {
    pub fn start(bin: &Bin) -> Self {
        Self {
            bin_id: bin.id.clone(),
            lines: bin
                .current_stock
                .iter()
                .map(|s| BinAuditLine {
                    sku: s.sku.clone(),
                    system_quantity: s.quantity,
                    counted_quantity: s.quantity,
                })
                .collect(),
            notes: String::new(),
        }
    }

    pub fn bin_id(&self) -> &BinId {
        &self.bin_id
    }

    pub fn lines(&self) -> &[BinAuditLine] {
        &self.lines
    }

    pub fn record(&mut self, sku: &Sku, counted: u32) -> DomainResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.sku == sku)
            .ok_or_else(|| DomainError::not_found(format!("sku {sku} in bin audit {}", self.bin_id)))?;
        line.counted_quantity = counted;
        Ok(())
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn total_discrepancy(&self) -> i64 {
        self.lines.iter().map(BinAuditLine::discrepancy).sum()
    }

    /// True when every line matches; offsetting errors do not count as perfect.
    pub fn is_perfect(&self) -> bool {
        self.lines.iter().all(|l| l.discrepancy() == 0)
    }

    pub fn finish(self, now: DateTime<Utc>) -> BinAuditResult {
        let total_discrepancy = self.total_discrepancy();
        let perfect = self.is_perfect();
        BinAuditResult {
            timestamp: now,
            lines: self.lines,
            notes: self.notes,
            total_discrepancy,
            perfect,
        }
    }
}

/// Completed audit, attached to the bin it counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinAuditResult {
    pub timestamp: DateTime<Utc>,
    pub lines: Vec<BinAuditLine>,
    #[serde(default)]
    pub notes: String,
    pub total_discrepancy: i64,
    pub perfect: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn bin() -> Bin {
        Bin::new("D-05", "D", 30_000)
            .with_stock("LED-RED", 100, now())
            .with_stock("LED-GRN", 80, now())
    }

    #[test]
    fn untouched_audit_is_perfect() {
        let audit = BinAudit::start(&bin());
        assert_eq!(audit.lines().len(), 2);
        assert_eq!(audit.total_discrepancy(), 0);
        assert!(audit.is_perfect());
    }

    #[test]
    fn signed_discrepancies_sum_and_offsets_are_not_perfect() {
        let mut audit = BinAudit::start(&bin());
        audit.record(&Sku::new("LED-RED"), 95).unwrap();
        audit.record(&Sku::new("LED-GRN"), 85).unwrap();

        assert_eq!(audit.lines()[0].discrepancy(), -5);
        assert_eq!(audit.lines()[1].discrepancy(), 5);
        assert_eq!(audit.total_discrepancy(), 0);
        assert!(!audit.is_perfect());

        let result = audit.with_notes("pallet shifted").finish(now());
        assert!(!result.perfect);
        assert_eq!(result.notes, "pallet shifted");
        assert_eq!(result.timestamp, now());
    }

    #[test]
    fn recording_unknown_sku_fails() {
        let mut audit = BinAudit::start(&bin());
        let err = audit.record(&Sku::new("LED-BLU"), 1).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
