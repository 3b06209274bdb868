//! # Application State
//!
//! Core business state for Shelf. Domain logic only; presentation state
//! (cursor, filter, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn HighlightSource>  // remote data client
//! ├── navigator: Navigator              // screen stack, root = books
//! ├── book_index: BookIndex             // title → book id, read-only
//! ├── status_message: String            // status line text
//! ├── error: Option<NavError>           // last reported error
//! └── pending: Option<PendingFetch>     // highlight fetch in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{BookRecord, HighlightSource};
use crate::core::action::NavError;
use crate::core::adapter::{BookIndex, adapt_books, build_book_index};
use crate::core::navigation::{Navigator, Screen};

/// A highlight fetch that has been requested but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub request_id: u64,
    pub book_id: i64,
    /// Title of the book row that was selected; becomes the pushed screen's title.
    pub title: String,
}

pub struct App {
    pub source: Arc<dyn HighlightSource>,
    pub navigator: Navigator,
    pub book_index: BookIndex,
    pub status_message: String,
    pub error: Option<NavError>,
    pub pending: Option<PendingFetch>,
    next_request_id: u64,
}

impl App {
    /// Builds the root book screen and the title index from the initial fetch.
    pub fn new(
        source: Arc<dyn HighlightSource>,
        books: &[BookRecord],
        root_title: impl Into<String>,
    ) -> Self {
        Self {
            source,
            navigator: Navigator::new(adapt_books(books), root_title),
            book_index: build_book_index(books),
            status_message: String::new(),
            error: None,
            pending: None,
            next_request_id: 1,
        }
    }

    pub fn current_screen(&self) -> &Screen {
        self.navigator.current()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn next_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use crate::core::adapter::DisplayItem;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_builds_root_screen() {
        let app = test_app();
        let screen = app.current_screen();
        assert_eq!(screen.title, "Books");
        assert_eq!(screen.items[0], DisplayItem::new("Dune", "Herbert"));
        assert_eq!(app.book_index.get("Dune"), Some(&1));
        assert!(!app.is_loading());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_request_ids_increase() {
        let mut app = test_app();
        let a = app.next_request_id();
        let b = app.next_request_id();
        assert!(b > a);
    }
}
