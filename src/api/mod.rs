pub mod client;
pub mod source;
pub mod types;

pub use client::ReadwiseClient;
pub use source::{ApiError, HighlightSource};
pub use types::{BookRecord, HighlightRecord, Page};
