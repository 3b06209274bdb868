//! # Navigation Stack
//!
//! The screens the user has drilled through, most recent last.
//!
//! ```text
//! [ Books ] ──select──▶ [ Books, Dune ] ──back──▶ [ Books ]
//! ```
//!
//! The root screen is pushed once and never popped, so there is always a
//! current screen.

use crate::core::adapter::DisplayItem;

/// What a screen lists, and therefore whether its rows can be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Books,
    Highlights { book_id: i64 },
}

impl ScreenKind {
    pub fn is_drillable(&self) -> bool {
        matches!(self, ScreenKind::Books)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub items: Vec<DisplayItem>,
    pub title: String,
    pub kind: ScreenKind,
}

impl Screen {
    pub fn books(items: Vec<DisplayItem>, title: impl Into<String>) -> Self {
        Self {
            items,
            title: title.into(),
            kind: ScreenKind::Books,
        }
    }

    pub fn highlights(items: Vec<DisplayItem>, title: impl Into<String>, book_id: i64) -> Self {
        Self {
            items,
            title: title.into(),
            kind: ScreenKind::Highlights { book_id },
        }
    }
}

#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    /// Starts navigation at a book-list root screen.
    pub fn new(root_items: Vec<DisplayItem>, root_title: impl Into<String>) -> Self {
        Self::with_root(Screen::books(root_items, root_title))
    }

    pub fn with_root(root: Screen) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Screen {
        // `stack` is never empty: `back` refuses to pop the root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    /// Pops to the previous screen. Returns false (and does nothing) at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn is_at_root(&self) -> bool {
        self.stack.len() == 1
    }

    /// Number of screens above the root.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Screen titles from root to current.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.stack.iter().map(|s| s.title.as_str()).collect()
    }
}
