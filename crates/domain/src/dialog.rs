//! Confirmation dialogs as tagged state machines.
//!
//! An open delete dialog always knows its target; there is no way to build
//! "open, but for nothing".

use crate::id::RecordId;

/// Delete confirmation shared by every row of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteDialog {
    #[default]
    Closed,
    /// Waiting for the user to confirm or cancel.
    Open { target: RecordId },
    /// Confirmed; the delete request is in flight.
    Pending { target: RecordId },
}

impl DeleteDialog {
    /// A dialog already open for `target`.
    #[must_use]
    pub fn open_for(target: RecordId) -> Self {
        Self::Open { target }
    }

    /// Open the dialog for `target`. Ignored while a delete is in flight.
    ///
    /// Returns whether the dialog changed.
    pub fn request(&mut self, target: RecordId) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Open { target };
        true
    }

    /// Close an open dialog. Ignored while a delete is in flight.
    ///
    /// Returns whether the dialog changed.
    pub fn cancel(&mut self) -> bool {
        match self {
            Self::Open { .. } => {
                *self = Self::Closed;
                true
            }
            Self::Closed | Self::Pending { .. } => false,
        }
    }

    /// Confirm an open dialog, moving it to pending.
    ///
    /// Returns the id to delete, or `None` when the dialog was not open.
    pub fn confirm(&mut self) -> Option<RecordId> {
        match std::mem::take(self) {
            Self::Open { target } => {
                *self = Self::Pending {
                    target: target.clone(),
                };
                Some(target)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Settle a pending delete: close on success, reopen on failure so the
    /// user can retry.
    pub fn resolve(&mut self, succeeded: bool) {
        match std::mem::take(self) {
            Self::Pending { target } if !succeeded => *self = Self::Open { target },
            Self::Pending { .. } => {}
            other => *self = other,
        }
    }

    /// The record the dialog is about, if open or pending.
    #[must_use]
    pub fn target(&self) -> Option<&RecordId> {
        match self {
            Self::Closed => None,
            Self::Open { target } | Self::Pending { target } => Some(target),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Logout confirmation in the navigation shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogoutDialog {
    #[default]
    Closed,
    Open,
}

impl LogoutDialog {
    pub fn open(&mut self) {
        *self = Self::Open;
    }

    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// Confirm the logout. Returns `true` only if the dialog was open.
    pub fn confirm(&mut self) -> bool {
        let was_open = *self == Self::Open;
        *self = Self::Closed;
        was_open
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn id(s: &str) -> RecordId {
        RecordId::from_str(s).unwrap()
    }

    #[test]
    fn should_open_for_requested_row() {
        let mut dialog = DeleteDialog::default();
        assert!(dialog.request(id("r1")));
        assert_eq!(dialog, DeleteDialog::Open { target: id("r1") });
    }

    #[test]
    fn should_close_and_forget_target_on_cancel() {
        let mut dialog = DeleteDialog::open_for(id("r1"));
        assert!(dialog.cancel());
        assert_eq!(dialog, DeleteDialog::Closed);
        assert!(dialog.target().is_none());
    }

    #[test]
    fn should_move_to_pending_on_confirm() {
        let mut dialog = DeleteDialog::open_for(id("r1"));
        assert_eq!(dialog.confirm(), Some(id("r1")));
        assert!(dialog.is_pending());
    }

    #[test]
    fn should_not_confirm_when_closed() {
        let mut dialog = DeleteDialog::Closed;
        assert_eq!(dialog.confirm(), None);
        assert_eq!(dialog, DeleteDialog::Closed);
    }

    #[test]
    fn should_not_confirm_twice() {
        let mut dialog = DeleteDialog::open_for(id("r1"));
        dialog.confirm();
        assert_eq!(dialog.confirm(), None);
        assert!(dialog.is_pending());
    }

    #[test]
    fn should_ignore_request_and_cancel_while_pending() {
        let mut dialog = DeleteDialog::Pending { target: id("r1") };
        assert!(!dialog.request(id("r2")));
        assert!(!dialog.cancel());
        assert_eq!(dialog.target(), Some(&id("r1")));
    }

    #[test]
    fn should_close_after_successful_delete() {
        let mut dialog = DeleteDialog::Pending { target: id("r1") };
        dialog.resolve(true);
        assert_eq!(dialog, DeleteDialog::Closed);
    }

    #[test]
    fn should_stay_open_after_failed_delete() {
        let mut dialog = DeleteDialog::Pending { target: id("r1") };
        dialog.resolve(false);
        assert_eq!(dialog, DeleteDialog::Open { target: id("r1") });
    }

    #[test]
    fn should_confirm_logout_only_when_open() {
        let mut dialog = LogoutDialog::default();
        assert!(!dialog.confirm());
        dialog.open();
        assert!(dialog.is_open());
        assert!(dialog.confirm());
        assert!(!dialog.is_open());
    }

    #[test]
    fn should_close_logout_on_cancel() {
        let mut dialog = LogoutDialog::Open;
        dialog.cancel();
        assert_eq!(dialog, LogoutDialog::Closed);
    }
}
