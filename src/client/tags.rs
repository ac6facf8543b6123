use crate::errors::{FaqError, FaqResult};
use crate::list_codec;
use crate::model::{FaqInput, FaqRecord, UpdateRequest};
use once_cell::sync::Lazy;
use regex::Regex;

// Typed input accepts commas and semicolons; stored cells also accept pipes.
static INPUT_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").expect("valid regex"));

/// Distinct, trimmed, non-empty labels in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEditor {
    tags: Vec<String>,
}

impl TagEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut editor = Self::new();
        for label in labels {
            editor.add(label.as_ref());
        }
        editor
    }

    /// Adds every label in `text`; returns how many were new.
    pub fn add(&mut self, text: &str) -> usize {
        let mut added = 0;
        for piece in INPUT_SEPARATOR.split(text) {
            let label = piece.trim();
            if label.is_empty() || self.tags.iter().any(|t| t == label) {
                continue;
            }
            self.tags.push(label.to_string());
            added += 1;
        }
        added
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.tags.len()).then(|| self.tags.remove(index))
    }

    pub fn remove_label(&mut self, label: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != label.trim());
        self.tags.len() != before
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Replaces the contents with the labels of a stored cell.
    pub fn load(&mut self, encoded: &str) {
        self.clear();
        for label in list_codec::decode(encoded) {
            self.add(&label);
        }
    }

    pub fn joined(&self, separator: &str) -> String {
        self.tags.join(separator)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Editable state of the add and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqDraft {
    pub row_index: Option<u32>,
    pub question: String,
    pub answer: String,
    pub categories: TagEditor,
    pub keywords: TagEditor,
}

impl FaqDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &FaqRecord) -> Self {
        Self {
            row_index: Some(record.row_index),
            question: record.question.clone(),
            answer: record.answer.clone(),
            categories: TagEditor::from_labels(&record.categories),
            keywords: TagEditor::from_labels(&record.keywords),
        }
    }

    pub fn to_input(&self) -> FaqInput {
        FaqInput::new(self.question.trim(), self.answer.trim())
            .with_categories(self.categories.tags().to_vec())
            .with_keywords(self.keywords.tags().to_vec())
    }

    /// Both text fields are required before anything is sent.
    pub fn validate(&self) -> FaqResult<()> {
        if self.question.trim().is_empty() || self.answer.trim().is_empty() {
            return Err(FaqError::validation("question and answer are required"));
        }
        Ok(())
    }

    pub fn update_request(&self) -> FaqResult<UpdateRequest> {
        self.validate()?;
        let row_index = self
            .row_index
            .ok_or_else(|| FaqError::validation("this entry has no row to update"))?;
        Ok(UpdateRequest::new(row_index, self.to_input()))
    }
}
