//! Dialog state shared by one feature's components.
//!
//! A list screen, its row actions and its create/edit/delete dialogs all need
//! to know which dialog is open and which entity it concerns. The container
//! is handed to each of them explicitly; clones share the same state.

use std::sync::Arc;
use std::sync::RwLock;

/// Which dialog of a feature is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogKind {
    /// No dialog open.
    #[default]
    None,
    /// Create a new entity.
    Create,
    /// Edit the selected entity.
    Edit,
    /// Confirm deleting the selected entity.
    Delete,
    /// Read-only details of the selected entity.
    View,
}

#[derive(Debug)]
struct DialogInner<E> {
    open: DialogKind,
    selected: Option<E>,
}

/// Open dialog plus selected entity for one feature.
///
/// Cheap to clone; every clone sees the same state.
///
/// # Example
///
/// ```
/// use datatable_lib::context::{DialogContext, DialogKind};
///
/// let dialogs: DialogContext<String> = DialogContext::new();
/// let row_actions = dialogs.clone();
///
/// row_actions.open(DialogKind::Edit, Some("kit-42".to_string()));
/// assert!(dialogs.is_open(DialogKind::Edit));
/// assert_eq!(dialogs.selected().as_deref(), Some("kit-42"));
///
/// dialogs.close();
/// assert_eq!(dialogs.current(), DialogKind::None);
/// ```
#[derive(Debug)]
pub struct DialogContext<E> {
    inner: Arc<RwLock<DialogInner<E>>>,
}

impl<E> DialogContext<E> {
    /// Creates a context with no dialog open.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(DialogInner {
                open: DialogKind::None,
                selected: None,
            })),
        }
    }

    /// Opens a dialog for an entity (or none, for create).
    pub fn open(&self, kind: DialogKind, selected: Option<E>) {
        if let Ok(mut guard) = self.inner.write() {
            log::trace!("[dialog] {:?} -> {:?}", guard.open, kind);
            guard.open = kind;
            guard.selected = selected;
        }
    }

    /// Switches dialogs, keeping the selected entity.
    pub fn set_open(&self, kind: DialogKind) {
        if let Ok(mut guard) = self.inner.write() {
            guard.open = kind;
        }
    }

    /// Closes any dialog and forgets the selected entity.
    pub fn close(&self) {
        self.open(DialogKind::None, None);
    }

    /// Returns the open dialog.
    pub fn current(&self) -> DialogKind {
        self.inner
            .read()
            .map(|g| g.open)
            .unwrap_or_else(|poisoned| poisoned.into_inner().open)
    }

    /// Returns `true` if the given dialog is open.
    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.current() == kind
    }

    /// Replaces the selected entity.
    pub fn set_selected(&self, selected: Option<E>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = selected;
        }
    }
}

impl<E: Clone> DialogContext<E> {
    /// Returns a clone of the selected entity.
    pub fn selected(&self) -> Option<E> {
        self.inner
            .read()
            .map(|g| g.selected.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().selected.clone())
    }
}

impl<E> Clone for DialogContext<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for DialogContext<E> {
    fn default() -> Self {
        Self::new()
    }
}
