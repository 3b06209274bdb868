//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ApiError, BookRecord, HighlightRecord, HighlightSource};
use crate::core::state::App;

/// A source that serves canned books and no highlights.
pub struct StubSource {
    pub books: Vec<BookRecord>,
}

#[async_trait]
impl HighlightSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_books(&self) -> Result<Vec<BookRecord>, ApiError> {
        Ok(self.books.clone())
    }

    async fn fetch_highlights(&self, _book_id: i64) -> Result<Vec<HighlightRecord>, ApiError> {
        Ok(Vec::new())
    }
}

pub fn test_books() -> Vec<BookRecord> {
    vec![
        BookRecord {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
        },
        BookRecord {
            id: 2,
            title: "Emma".to_string(),
            author: "Austen".to_string(),
        },
    ]
}

/// Creates a test App rooted at a "Books" screen with Dune (id 1) and Emma (id 2).
pub fn test_app() -> App {
    let books = test_books();
    App::new(
        Arc::new(StubSource {
            books: books.clone(),
        }),
        &books,
        "Books",
    )
}
