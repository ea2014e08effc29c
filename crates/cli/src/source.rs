//! Warehouse source backed by a directory of JSON fixture files.

use std::path::PathBuf;

use stockquest_core::{DomainError, DomainResult, upsert};
use stockquest_inventory::{Bin, WarehouseSnapshot, WarehouseSource};

/// Re-reads the fixture files on every snapshot. Bins written back by the
/// store are kept in memory and override the on-disk copy.
#[derive(Debug, Clone)]
pub struct FixtureDirSource {
    dir: PathBuf,
    overrides: Vec<Bin>,
}

impl FixtureDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overrides: Vec::new(),
        }
    }
}

impl WarehouseSource for FixtureDirSource {
    fn snapshot(&self) -> DomainResult<WarehouseSnapshot> {
        let mut snapshot = WarehouseSnapshot::load_dir(&self.dir)
            .map_err(|err| DomainError::invariant(format!("warehouse fixtures unavailable: {err}")))?;

        for bin in &self.overrides {
            if let Some(slot) = snapshot.bins.iter_mut().find(|b| b.id == bin.id) {
                *slot = bin.clone();
            }
        }
        Ok(snapshot)
    }

    fn replace_bin(&mut self, bin: Bin) -> DomainResult<()> {
        upsert(&mut self.overrides, bin);
        Ok(())
    }
}
