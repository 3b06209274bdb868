//! Wire types for the Readwise v2 REST API.
//!
//! Only the fields the browser displays are modelled; everything else in the
//! payload is ignored by serde.

use serde::{Deserialize, Serialize};

/// One page of a list endpoint (`/books/`, `/highlights/`).
///
/// `next` and `previous` are kept for logging only: a list is always a single
/// request.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HighlightRecord {
    #[serde(default)]
    pub text: String,
    /// ISO-8601 timestamp as sent by the API. Empty when the highlight has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub highlighted_at: String,
}

/// Readwise sends `null` for missing authors and timestamps.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
