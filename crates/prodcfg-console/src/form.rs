//! Per-kind form state.
//!
//! Each configuration kind has exactly one form slot. The state enum makes
//! "add and edit open at once" unrepresentable: opening one closes the
//! other by replacing the whole state.

use prodcfg_core::EntityId;

/// State of one configuration tab's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState<T> {
    /// Table of rows, no form open.
    Viewing,
    /// Blank form for a new row, holding the draft being typed.
    Adding(T),
    /// Form pre-filled from an existing row.
    Editing(EntityId, T),
}

impl<T> Default for FormState<T> {
    fn default() -> Self {
        Self::Viewing
    }
}

impl<T> FormState<T> {
    /// Whether any form is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Viewing)
    }

    /// The draft being edited, if a form is open.
    #[must_use]
    pub const fn draft(&self) -> Option<&T> {
        match self {
            Self::Viewing => None,
            Self::Adding(draft) | Self::Editing(_, draft) => Some(draft),
        }
    }

    /// Mutable access to the draft being edited.
    #[must_use]
    pub fn draft_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Viewing => None,
            Self::Adding(draft) | Self::Editing(_, draft) => Some(draft),
        }
    }

    /// The row under edit, if the form is in edit mode.
    #[must_use]
    pub const fn editing_id(&self) -> Option<EntityId> {
        match self {
            Self::Editing(id, _) => Some(*id),
            Self::Viewing | Self::Adding(_) => None,
        }
    }
}

/// One configuration tab: its form, its in-flight flag, its last
/// form-level error, and a pending delete awaiting confirmation.
#[derive(Debug, Clone)]
pub struct TabState<T> {
    /// Form state.
    pub form: FormState<T>,
    /// A mutation for this tab is in flight; controls are disabled.
    pub in_flight: bool,
    /// Last remote/transport error, surfaced form-level.
    pub error: Option<String>,
    /// Row id awaiting delete confirmation.
    pub pending_delete: Option<EntityId>,
}

impl<T> Default for TabState<T> {
    fn default() -> Self {
        Self {
            form: FormState::Viewing,
            in_flight: false,
            error: None,
            pending_delete: None,
        }
    }
}

impl<T> TabState<T> {
    /// Close any open form and clear the error.
    pub fn reset(&mut self) {
        self.form = FormState::Viewing;
        self.error = None;
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_add_replaces_an_open_edit() {
        let mut form = FormState::Editing(9, "draft");
        assert_eq!(form.editing_id(), Some(9));
        // Mutual exclusion by construction: assignment replaces the state.
        form = FormState::Adding("blank");
        assert_eq!(form.editing_id(), None);
        assert_eq!(form.draft(), Some(&"blank"));
    }

    #[test]
    fn viewing_has_no_draft() {
        let form: FormState<String> = FormState::Viewing;
        assert!(!form.is_open());
        assert!(form.draft().is_none());
    }
}
