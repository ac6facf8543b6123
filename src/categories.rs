use crate::errors::{FaqError, FaqResult};
use crate::list_codec;
use crate::normalize::HeaderMap;
use crate::store::{FIRST_DATA_ROW, RecordStore};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A change applied to one category label across every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOp {
    Rename { old_name: String, new_name: String },
    Delete { name: String },
}

impl CategoryOp {
    pub fn name(&self) -> &'static str {
        match self {
            CategoryOp::Rename { .. } => "rename",
            CategoryOp::Delete { .. } => "delete",
        }
    }

    /// Applies the op to one decoded cell. Returns `None` when the label is
    /// not present, leaving the row untouched.
    fn apply(&self, categories: &[String]) -> Option<Vec<String>> {
        match self {
            CategoryOp::Rename { old_name, new_name } => {
                if !categories.iter().any(|c| c == old_name) {
                    return None;
                }
                Some(
                    categories
                        .iter()
                        .map(|c| if c == old_name { new_name.clone() } else { c.clone() })
                        .collect(),
                )
            }
            CategoryOp::Delete { name } => {
                if !categories.iter().any(|c| c == name) {
                    return None;
                }
                Some(categories.iter().filter(|c| *c != name).cloned().collect())
            }
        }
    }
}

/// Wire form of a bulk category request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOpRequest {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CategoryOpRequest {
    pub fn rename(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            operation: Some("rename".into()),
            old_name: Some(old_name.into()),
            new_name: Some(new_name.into()),
            name: None,
        }
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Self {
            operation: Some("delete".into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn into_op(self) -> FaqResult<CategoryOp> {
        fn required(value: Option<String>, field: &str) -> FaqResult<String> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| FaqError::validation(format!("{field} is required")))
        }

        match self.operation.as_deref() {
            Some("rename") => Ok(CategoryOp::Rename {
                old_name: required(self.old_name, "oldName")?,
                new_name: required(self.new_name, "newName")?,
            }),
            Some("delete") => Ok(CategoryOp::Delete {
                name: required(self.name, "name")?,
            }),
            Some(other) => Err(FaqError::validation(format!(
                "unknown category operation '{other}'"
            ))),
            None => Err(FaqError::validation("operation is required")),
        }
    }
}

/// Rewrites the categories cell of every row containing the label and
/// returns how many rows changed. Matching is exact and case-sensitive.
///
/// Only the changed category cells are written, in one go and only when
/// something changed. Every other cell keeps its value and type.
pub fn apply_bulk_op(store: &RecordStore, op: &CategoryOp) -> FaqResult<usize> {
    let grid = store.require_sheet()?;
    let Some((header, rows)) = grid.split_first() else {
        return Ok(0);
    };
    if rows.is_empty() {
        return Ok(0);
    }

    let column = HeaderMap::from_headers(header)
        .category_position()
        .ok_or_else(|| FaqError::not_found("categories column"))?;

    let changes: Vec<(u32, String)> = rows
        .iter()
        .enumerate()
        .filter_map(|(offset, row)| {
            let cell = row.get(column).map(String::as_str).unwrap_or_default();
            let updated = op.apply(&list_codec::decode(cell))?;
            Some((FIRST_DATA_ROW + offset as u32, list_codec::encode(&updated)))
        })
        .collect();

    if !changes.is_empty() {
        store.table().write_cells(column as u32 + 1, &changes)?;
    }
    let modified = changes.len();
    info!(operation = op.name(), modified, "category maintenance finished");
    Ok(modified)
}
