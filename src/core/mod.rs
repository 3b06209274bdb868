//! # Core Application Logic
//!
//! Shelf's navigation logic. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • adapter (rows)       │
//!                    │  • navigation (stack)   │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    API     │
//!           │  Adapter   │              │  Readwise  │
//!           │ (ratatui)  │              │ (reqwest)  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`adapter`]: API records → `DisplayItem` rows, and the title → id index
//! - [`navigation`]: the screen stack
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and the `update` reducer
//! - [`config`]: config file + environment resolution

pub mod action;
pub mod adapter;
pub mod config;
pub mod navigation;
pub mod state;
