//! Confirm-before-delete state of a remote data table.

use crate::disclosure::Disclosure;
use crate::model::RowId;

/// Where the delete confirmation currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletePhase {
    Idle,
    /// The confirm dialog is open for a row.
    Confirming(RowId),
    /// The delete of a row is running.
    Deleting(RowId),
}

/// Dialog state of the delete flow.
///
/// `Idle -> Confirming -> Idle` on cancel, `Confirming -> Deleting -> Idle`
/// on success. A failed delete goes back to `Confirming` with the same row
/// so the user can retry or cancel.
#[derive(Debug, Default)]
pub struct DeleteFlow {
    dialog: Disclosure<RowId>,
    running: bool,
}

impl DeleteFlow {
    pub fn phase(&self) -> DeletePhase {
        match (self.dialog.is_open(), self.dialog.variable()) {
            (true, Some(id)) if self.running => DeletePhase::Deleting(id.clone()),
            (true, Some(id)) => DeletePhase::Confirming(id.clone()),
            _ => DeletePhase::Idle,
        }
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// The row waiting for confirmation.
    pub fn target(&self) -> Option<&RowId> {
        if self.dialog.is_open() {
            self.dialog.variable()
        } else {
            None
        }
    }

    pub(crate) fn request(&mut self, id: RowId) {
        if self.running {
            return;
        }
        self.dialog.open(Some(id));
    }

    pub(crate) fn cancel(&mut self) {
        if self.running {
            return;
        }
        self.dialog.close();
    }

    pub(crate) fn begin(&mut self) {
        self.running = true;
    }

    pub(crate) fn succeed(&mut self) {
        self.running = false;
        self.dialog.close();
    }

    pub(crate) fn fail(&mut self) {
        self.running = false;
    }

    pub(crate) fn abandon(&mut self) {
        self.running = false;
        self.dialog.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut flow = DeleteFlow::default();
        flow.request(RowId::new("1"));
        assert_eq!(flow.phase(), DeletePhase::Confirming(RowId::new("1")));
        flow.cancel();
        assert_eq!(flow.phase(), DeletePhase::Idle);
        assert_eq!(flow.target(), None);
    }

    #[test]
    fn test_failure_keeps_target() {
        let mut flow = DeleteFlow::default();
        flow.request(RowId::new("9"));
        flow.begin();
        assert_eq!(flow.phase(), DeletePhase::Deleting(RowId::new("9")));

        flow.cancel();
        flow.request(RowId::new("other"));
        assert_eq!(flow.target(), Some(&RowId::new("9")));

        flow.fail();
        assert_eq!(flow.phase(), DeletePhase::Confirming(RowId::new("9")));
        flow.begin();
        flow.succeed();
        assert_eq!(flow.phase(), DeletePhase::Idle);
    }
}
