//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: breadcrumbs, row count, loading spinner and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ListView`: the current screen's rows, cursor and text filter
//!
//! Each component file holds its state type, events, rendering and tests.
//! Components receive data as props rather than reading `App` directly:
//!
//! ```rust,ignore
//! ListView::new(&mut tui.list, &app.current_screen().items).render(frame, area);
//! ```

pub mod list_view;
mod title_bar;

pub use list_view::{FilterState, ListEvent, ListView, ListViewState};
pub use title_bar::TitleBar;
