//! Pagination state.

use serde::Deserialize;
use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page position.
///
/// `page_index` is zero-based and has no upper clamp here: the total page
/// count may come from a server response that has not arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, always at least 1.
    pub page_size: usize,
}

impl PaginationState {
    /// Creates a pagination state at the first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Returns the row offset of the first row on the current page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Callback receiving the new pagination state after every change.
pub type PaginationChangeFn = Box<dyn FnMut(PaginationState)>;

/// Holds the page index and page size and exposes navigation.
#[derive(Default)]
pub struct PaginationStore {
    state: PaginationState,
    on_change: Option<PaginationChangeFn>,
}

impl PaginationStore {
    /// Creates a store at the first page with the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PaginationState::new(page_size),
            on_change: None,
        }
    }

    /// Registers the change callback.
    pub fn on_change(&mut self, callback: impl FnMut(PaginationState) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Returns the current state.
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Returns the zero-based page index.
    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    /// Jumps to a page. The caller guards the upper bound.
    ///
    /// Always notifies, even when the index is unchanged, so a server-mode
    /// caller can refetch the current page.
    pub fn set_page_index(&mut self, index: usize) {
        self.commit(
            PaginationState {
                page_index: index,
                ..self.state
            },
            true,
        );
    }

    /// Changes the page size and returns to the first page.
    ///
    /// Page N at one size does not correspond to page N at another, so the
    /// index always resets. A size of 0 is treated as 1. Always notifies.
    pub fn set_page_size(&mut self, size: usize) {
        self.commit(PaginationState::new(size), true);
    }

    /// Advances one page. Check [`can_next_page`](Self::can_next_page) first.
    pub fn next_page(&mut self) {
        self.replace(PaginationState {
            page_index: self.state.page_index.saturating_add(1),
            ..self.state
        });
    }

    /// Goes back one page, stopping at the first. A no-op on the first page.
    pub fn previous_page(&mut self) {
        self.replace(PaginationState {
            page_index: self.state.page_index.saturating_sub(1),
            ..self.state
        });
    }

    /// Returns `true` if a page exists after the current one.
    pub fn can_next_page(&self, page_count: usize) -> bool {
        self.state.page_index.saturating_add(1) < page_count
    }

    /// Returns `true` unless on the first page.
    pub fn can_previous_page(&self) -> bool {
        self.state.page_index > 0
    }

    /// Replaces the state, notifying only when it changed.
    pub fn replace(&mut self, state: PaginationState) {
        self.commit(state, false);
    }

    fn commit(&mut self, state: PaginationState, force: bool) {
        let state = PaginationState {
            page_size: state.page_size.max(1),
            ..state
        };
        if state == self.state && !force {
            return;
        }
        log::trace!(
            "[pagination] page {} size {} -> page {} size {}",
            self.state.page_index,
            self.state.page_size,
            state.page_index,
            state.page_size
        );
        self.state = state;
        if let Some(callback) = self.on_change.as_mut() {
            callback(state);
        }
    }
}

impl std::fmt::Debug for PaginationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
