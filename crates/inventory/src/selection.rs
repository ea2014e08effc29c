//! Which bin the operator is looking at, and whether a transfer is being set up.

use stockquest_core::{BinId, DomainError, DomainResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Viewing(BinId),
    Transferring {
        source: BinId,
        target: Option<BinId>,
    },
}

impl Selection {
    /// View `bin`. Abandons any transfer in progress.
    pub fn select_bin(&mut self, bin: BinId) {
        *self = Selection::Viewing(bin);
    }

    /// Start a transfer out of `source`.
    pub fn begin_transfer(&mut self, source: BinId) {
        *self = Selection::Transferring { source, target: None };
    }

    /// Start a transfer out of the bin currently being viewed.
    pub fn transfer_from_viewed(&mut self) -> DomainResult<()> {
        match std::mem::take(self) {
            Selection::Viewing(bin) => {
                self.begin_transfer(bin);
                Ok(())
            }
            other => {
                *self = other;
                Err(DomainError::validation("no bin is being viewed"))
            }
        }
    }

    pub fn choose_target(&mut self, bin: BinId) -> DomainResult<()> {
        match self {
            Selection::Transferring { source, target } => {
                if *source == bin {
                    return Err(DomainError::validation(format!(
                        "bin {bin} cannot be both source and target"
                    )));
                }
                *target = Some(bin);
                Ok(())
            }
            _ => Err(DomainError::validation("no transfer in progress")),
        }
    }

    /// Step back: a transfer returns to viewing its source, viewing clears.
    pub fn cancel(&mut self) {
        *self = match std::mem::take(self) {
            Selection::Transferring { source, .. } => Selection::Viewing(source),
            Selection::Viewing(_) | Selection::None => Selection::None,
        };
    }

    /// Bin whose contents should be displayed: the transfer source while
    /// transferring, otherwise the viewed bin.
    pub fn display_bin(&self) -> Option<&BinId> {
        match self {
            Selection::None => None,
            Selection::Viewing(bin) => Some(bin),
            Selection::Transferring { source, .. } => Some(source),
        }
    }

    /// Source and target once both are chosen.
    pub fn transfer_pair(&self) -> Option<(&BinId, &BinId)> {
        match self {
            Selection::Transferring {
                source,
                target: Some(target),
            } => Some((source, target)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(id: &str) -> BinId {
        BinId::new(id)
    }

    #[test]
    fn display_bin_follows_mode() {
        let mut selection = Selection::default();
        assert_eq!(selection.display_bin(), None);

        selection.select_bin(bin("A-01"));
        assert_eq!(selection.display_bin(), Some(&bin("A-01")));

        selection.transfer_from_viewed().unwrap();
        selection.choose_target(bin("B-02")).unwrap();
        assert_eq!(selection.display_bin(), Some(&bin("A-01")));
        assert_eq!(selection.transfer_pair(), Some((&bin("A-01"), &bin("B-02"))));
    }

    #[test]
    fn target_must_differ_and_requires_transfer_mode() {
        let mut selection = Selection::Viewing(bin("A-01"));
        assert!(selection.choose_target(bin("B-02")).is_err());

        selection.begin_transfer(bin("A-01"));
        assert!(selection.choose_target(bin("A-01")).is_err());
        assert_eq!(selection.transfer_pair(), None);
    }

    #[test]
    fn transfer_from_viewed_requires_a_viewed_bin() {
        let mut selection = Selection::None;
        assert!(selection.transfer_from_viewed().is_err());
        assert_eq!(selection, Selection::None);
    }

    #[test]
    fn cancel_steps_back() {
        let mut selection = Selection::Transferring {
            source: bin("A-01"),
            target: Some(bin("B-02")),
        };
        selection.cancel();
        assert_eq!(selection, Selection::Viewing(bin("A-01")));
        selection.cancel();
        assert_eq!(selection, Selection::None);
    }
}
