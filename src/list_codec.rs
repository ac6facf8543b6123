use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LIST_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,|]").expect("separator pattern is valid"));

/// Separator written between tags when a list is stored in a cell.
pub const JOIN_SEPARATOR: &str = ", ";

/// Splits a cell on `;`, `,` or `|`, trimming pieces and dropping empties.
pub fn decode(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    LIST_SEPARATORS
        .split(text)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins tags with `", "`. Canonicalizing, not the inverse of [`decode`].
pub fn encode<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(JOIN_SEPARATOR)
}

/// A tag field as callers send it: a list of labels or an already-joined cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagList {
    Items(Vec<String>),
    Text(String),
}

impl TagList {
    /// Cell text for this field; plain text passes through untouched.
    pub fn encoded(&self) -> String {
        match self {
            TagList::Items(items) => encode(items),
            TagList::Text(text) => text.clone(),
        }
    }
}

impl From<Vec<String>> for TagList {
    fn from(items: Vec<String>) -> Self {
        TagList::Items(items)
    }
}

/// Cell text for an optional tag field, blank when absent.
pub fn encode_field(value: Option<&TagList>) -> String {
    value.map(TagList::encoded).unwrap_or_default()
}
