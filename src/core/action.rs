//! # Actions
//!
//! Everything that can happen in Shelf becomes an `Action`.
//! User presses Enter on a book? That's `Action::Select(item)`.
//! The highlight fetch finishes? That's `Action::HighlightsLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::fmt;

use log::{debug, info, warn};

use crate::api::{ApiError, HighlightRecord};
use crate::core::adapter::{DisplayItem, adapt_highlights};
use crate::core::navigation::Screen;
use crate::core::state::{App, PendingFetch};

#[derive(Debug)]
pub enum Action {
    /// Open the given row of the current screen.
    Select(DisplayItem),
    /// Return to the previous screen (or cancel a fetch in flight).
    Back,
    Quit,
    /// A highlight fetch finished.
    HighlightsLoaded {
        request_id: u64,
        result: Result<Vec<HighlightRecord>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FetchHighlights { request_id: u64, book_id: i64 },
    /// Abort the fetch in flight; its completion will be ignored anyway.
    CancelFetch,
}

/// Recoverable navigation failures. None of them change the screen stack.
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// A displayed row has no entry in the book index.
    UnknownBook(String),
    /// The current screen lists highlights, which cannot be opened.
    NotDrillable,
    /// The highlight request failed.
    FetchFailed { title: String, source: ApiError },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::UnknownBook(title) => write!(f, "no book id known for \"{title}\""),
            NavError::NotDrillable => write!(f, "highlights cannot be opened further"),
            NavError::FetchFailed { title, source } => {
                write!(f, "failed to load highlights for \"{title}\": {source}")
            }
        }
    }
}

impl std::error::Error for NavError {}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Select(item) => select(app, item),
        Action::Back => back(app),
        Action::HighlightsLoaded { request_id, result } => {
            highlights_loaded(app, request_id, result)
        }
    }
}

fn select(app: &mut App, item: DisplayItem) -> Effect {
    if let Some(pending) = &app.pending {
        debug!(
            "Ignoring select of {:?}: still loading {:?}",
            item.title(),
            pending.title
        );
        return Effect::None;
    }

    if !app.current_screen().kind.is_drillable() {
        report(app, NavError::NotDrillable);
        return Effect::None;
    }

    let Some(&book_id) = app.book_index.get(item.title()) else {
        report(app, NavError::UnknownBook(item.title().to_string()));
        return Effect::None;
    };

    let request_id = app.next_request_id();
    info!(
        "Selecting {:?} (book_id={}, request_id={})",
        item.title(),
        book_id,
        request_id
    );
    app.error = None;
    app.status_message = format!("Loading {}…", item.title());
    app.pending = Some(PendingFetch {
        request_id,
        book_id,
        title: item.title().to_string(),
    });
    Effect::FetchHighlights {
        request_id,
        book_id,
    }
}

fn back(app: &mut App) -> Effect {
    if let Some(pending) = app.pending.take() {
        info!(
            "Cancelled highlight fetch for {:?} (request_id={})",
            pending.title, pending.request_id
        );
        app.status_message = format!("Cancelled loading {}", pending.title);
        return Effect::CancelFetch;
    }

    if app.navigator.back() {
        debug!("Back to {:?}", app.current_screen().title);
        app.error = None;
        app.status_message.clear();
    }
    Effect::None
}

fn highlights_loaded(
    app: &mut App,
    request_id: u64,
    result: Result<Vec<HighlightRecord>, ApiError>,
) -> Effect {
    let pending = match app.pending.take() {
        Some(p) if p.request_id == request_id => p,
        other => {
            debug!("Dropping stale highlight result (request_id={})", request_id);
            app.pending = other;
            return Effect::None;
        }
    };

    match result {
        Ok(records) => {
            let items = adapt_highlights(&records);
            info!("Showing {} highlights for {:?}", items.len(), pending.title);
            app.error = None;
            app.status_message.clear();
            app.navigator
                .push(Screen::highlights(items, pending.title, pending.book_id));
        }
        Err(source) => report(
            app,
            NavError::FetchFailed {
                title: pending.title,
                source,
            },
        ),
    }
    Effect::None
}

/// Shows the error in the status line and keeps it for the UI.
fn report(app: &mut App, error: NavError) {
    warn!("{}", error);
    app.status_message = error.to_string();
    app.error = Some(error);
}
