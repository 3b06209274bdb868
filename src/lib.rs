//! Shelf library exports for the binary and integration tests

pub mod api;
pub mod core;
pub mod startup;
pub mod tui;

#[cfg(test)]
pub mod test_support;
