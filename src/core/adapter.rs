//! # View-Model Adapter
//!
//! Turns API records into the one row shape the list view knows how to show.
//! Everything here is pure: no I/O, no logging.

use std::collections::HashMap;

use crate::api::{BookRecord, HighlightRecord};

/// Book title → remote book id.
pub type BookIndex = HashMap<String, i64>;

/// One row in a list: a bold title line and a dim description line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    title: String,
    description: String,
}

impl DisplayItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Text the list filter matches against.
    pub fn filter_value(&self) -> &str {
        &self.title
    }
}

/// Books become `{title, author}` rows, in API order.
pub fn adapt_books(records: &[BookRecord]) -> Vec<DisplayItem> {
    records
        .iter()
        .map(|book| DisplayItem::new(book.title.clone(), book.author.clone()))
        .collect()
}

/// Highlights become `{text, highlighted_at}` rows, in API order.
pub fn adapt_highlights(records: &[HighlightRecord]) -> Vec<DisplayItem> {
    records
        .iter()
        .map(|h| DisplayItem::new(h.text.clone(), h.highlighted_at.clone()))
        .collect()
}

/// Builds the title lookup. When two books share a title the later one wins.
pub fn build_book_index(records: &[BookRecord]) -> BookIndex {
    records
        .iter()
        .map(|book| (book.title.clone(), book.id))
        .collect()
}
