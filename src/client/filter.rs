use crate::model::FaqRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Category,
    Keyword,
}

/// At most one category-or-keyword filter; a new one replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    None,
    Active {
        kind: FilterKind,
        value: String,
    },
}

impl FilterState {
    pub fn category(value: impl Into<String>) -> Self {
        FilterState::Active {
            kind: FilterKind::Category,
            value: value.into(),
        }
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        FilterState::Active {
            kind: FilterKind::Keyword,
            value: value.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FilterState::Active { .. })
    }

    pub fn matches(&self, record: &FaqRecord) -> bool {
        let FilterState::Active { kind, value } = self else {
            return true;
        };
        let wanted = value.to_lowercase();
        let labels = match kind {
            FilterKind::Category => &record.categories,
            FilterKind::Keyword => &record.keywords,
        };
        labels.iter().any(|label| label.to_lowercase() == wanted)
    }
}

/// Case-insensitive substring match over question, answer and the encoded
/// tag lists. A blank term matches everything.
pub fn matches_search(record: &FaqRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.question.to_lowercase().contains(&term)
        || record.answer.to_lowercase().contains(&term)
        || record.encoded_categories().to_lowercase().contains(&term)
        || record.encoded_keywords().to_lowercase().contains(&term)
}

/// Filter first, then search; both always apply.
pub fn apply_filters_and_search<'a>(
    records: &'a [FaqRecord],
    filter: &FilterState,
    search: &str,
) -> Vec<&'a FaqRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .filter(|record| matches_search(record, search))
        .collect()
}

/// Drops records without a question and orders the rest by question.
pub fn prepare_records(mut records: Vec<FaqRecord>) -> Vec<FaqRecord> {
    records.retain(|record| !record.question.trim().is_empty());
    records.sort_by(|a, b| {
        a.question
            .to_lowercase()
            .cmp(&b.question.to_lowercase())
            .then_with(|| a.question.cmp(&b.question))
            .then_with(|| a.row_index.cmp(&b.row_index))
    });
    records
}

/// Distinct labels available as filter buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
}

impl Facets {
    pub fn from_records(records: &[FaqRecord]) -> Self {
        let categories: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.categories.iter().map(String::as_str))
            .collect();
        let keywords: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.keywords.iter().map(String::as_str))
            .collect();
        Self {
            categories: categories.into_iter().map(str::to_string).collect(),
            keywords: keywords.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, kind: FilterKind, value: &str) -> bool {
        let labels = match kind {
            FilterKind::Category => &self.categories,
            FilterKind::Keyword => &self.keywords,
        };
        let value = value.to_lowercase();
        labels.iter().any(|label| label.to_lowercase() == value)
    }
}
