use crate::errors::{FaqError, FaqResult};
use crate::list_codec::{self, TagList};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One FAQ entry as read back from the table.
///
/// `row_index` is the physical row (header is row 1). It shifts when an
/// earlier row is deleted, so it must not be kept across a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    #[serde(rename = "rowIndex")]
    pub row_index: u32,
    #[serde(rename = "pregunta", default)]
    pub question: String,
    #[serde(rename = "respuesta", default)]
    pub answer: String,
    #[serde(rename = "categorías", alias = "categorias", default)]
    pub categories: Vec<String>,
    #[serde(rename = "palabras_clave", default)]
    pub keywords: Vec<String>,
}

impl FaqRecord {
    pub fn is_empty(&self) -> bool {
        self.question.trim().is_empty()
            && self.answer.trim().is_empty()
            && self.categories.is_empty()
            && self.keywords.is_empty()
    }

    pub fn encoded_categories(&self) -> String {
        list_codec::encode(&self.categories)
    }

    pub fn encoded_keywords(&self) -> String {
        list_codec::encode(&self.keywords)
    }
}

/// Field data sent by callers for append and update.
///
/// Keys outside the four known columns are kept in `extra` so an update can
/// fill custom columns whose canonical key matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqInput {
    #[serde(rename = "pregunta", default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(rename = "respuesta", default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(
        rename = "categorías",
        alias = "categorias",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub categories: Option<TagList>,
    #[serde(
        rename = "palabras_clave",
        alias = "palabrasClave",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub keywords: Option<TagList>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FaqInput {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            ..Self::default()
        }
    }

    pub fn with_categories<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(TagList::Items(labels.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_keywords<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(TagList::Items(labels.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Cell text for a non-standard column, blank when the caller sent nothing.
    pub fn extra_text(&self, key: &str) -> String {
        match self.extra.get(key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(true)) => "true".to_string(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(list_codec::JOIN_SEPARATOR),
            _ => String::new(),
        }
    }
}

impl From<&FaqRecord> for FaqInput {
    fn from(record: &FaqRecord) -> Self {
        FaqInput::new(record.question.clone(), record.answer.clone())
            .with_categories(record.categories.clone())
            .with_keywords(record.keywords.clone())
    }
}

/// Parses a row reference the way callers send it: a number or a numeric
/// string. Anything else, including zero, is a validation failure.
pub fn parse_row_index(value: Option<&Value>) -> FaqResult<Option<u32>> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    match parsed.and_then(|n| u32::try_from(n).ok()) {
        Some(0) | None => Err(FaqError::validation(format!(
            "rowIndex must be a positive integer, got {}",
            value.map(Value::to_string).unwrap_or_default()
        ))),
        Some(row) => Ok(Some(row)),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateRequest {
    #[serde(rename = "rowIndex", default)]
    pub row_index: Option<Value>,
    #[serde(rename = "rowData", default)]
    pub row_data: Option<FaqInput>,
}

impl UpdateRequest {
    pub fn new(row_index: u32, row_data: FaqInput) -> Self {
        Self {
            row_index: Some(Value::from(row_index)),
            row_data: Some(row_data),
        }
    }

    pub fn validate(self) -> FaqResult<(u32, FaqInput)> {
        let row_index = parse_row_index(self.row_index.as_ref())?;
        match (row_index, self.row_data) {
            (Some(row), Some(data)) => Ok((row, data)),
            _ => Err(FaqError::validation(
                "rowIndex and rowData are required to update a row",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeleteRequest {
    #[serde(rename = "rowIndex", default)]
    pub row_index: Option<Value>,
}

impl DeleteRequest {
    pub fn new(row_index: u32) -> Self {
        Self {
            row_index: Some(Value::from(row_index)),
        }
    }

    pub fn validate(self) -> FaqResult<u32> {
        parse_row_index(self.row_index.as_ref())?
            .ok_or_else(|| FaqError::validation("rowIndex is required to delete a row"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_index_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_row_index(Some(&json!(3))).unwrap(), Some(3));
        assert_eq!(parse_row_index(Some(&json!(" 7 "))).unwrap(), Some(7));
        assert_eq!(parse_row_index(None).unwrap(), None);
        assert_eq!(parse_row_index(Some(&json!(""))).unwrap(), None);
        assert!(parse_row_index(Some(&json!(0))).is_err());
        assert!(parse_row_index(Some(&json!(-2))).is_err());
        assert!(parse_row_index(Some(&json!("abc"))).is_err());
        assert!(parse_row_index(Some(&json!(2.5))).is_err());
    }

    #[test]
    fn input_keeps_unknown_keys_as_extras() {
        let input: FaqInput = serde_json::from_value(json!({
            "pregunta": "Q",
            "categorias": "a; b",
            "palabras_clave": ["k"],
            "notas": "internal",
            "prioridad": 2
        }))
        .unwrap();
        assert_eq!(input.question.as_deref(), Some("Q"));
        assert_eq!(input.categories, Some(TagList::Text("a; b".into())));
        assert_eq!(input.extra_text("notas"), "internal");
        assert_eq!(input.extra_text("prioridad"), "2");
        assert_eq!(input.extra_text("missing"), "");
    }

    #[test]
    fn record_serializes_with_stored_field_names() {
        let record = FaqRecord {
            row_index: 2,
            question: "Q".into(),
            answer: "A".into(),
            categories: vec!["x".into()],
            keywords: vec![],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["rowIndex"], 2);
        assert_eq!(value["categorías"], json!(["x"]));
        assert_eq!(value["palabras_clave"], json!([]));
    }
}
