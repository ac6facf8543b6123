//! Header-name normalization.
//!
//! Spreadsheet headers are typed by people ("Categorías", " Palabras  clave "),
//! so every lookup goes through [`canonical_key`] before it is compared.

use std::collections::HashMap;
use std::str::FromStr;
use strum::EnumString;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Header row written into a table that has no rows yet.
pub const DEFAULT_HEADERS: [&str; 4] = ["Pregunta", "Respuesta", "Categorías", "Palabras clave"];

pub const QUESTION_KEY: &str = "pregunta";
pub const ANSWER_KEY: &str = "respuesta";
pub const KEYWORDS_KEY: &str = "palabras_clave";
/// Both accepted spellings of the categories column, in lookup order.
pub const CATEGORY_KEYS: [&str; 2] = ["categorias", "categorías"];

/// Lower-cases, strips diacritics, trims and joins whitespace runs with `_`.
///
/// Total over any input; a header that matches nothing simply yields a key
/// with no corresponding field.
pub fn canonical_key(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join("_")
}

/// The four columns the store knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum FieldKey {
    #[strum(serialize = "pregunta")]
    Question,
    #[strum(serialize = "respuesta")]
    Answer,
    #[strum(serialize = "categorias", serialize = "categorías")]
    Categories,
    #[strum(serialize = "palabras_clave")]
    Keywords,
}

impl FieldKey {
    /// Recognizes an already-canonical key.
    pub fn from_key(key: &str) -> Option<Self> {
        FieldKey::from_str(key).ok()
    }
}

/// Canonical column key to zero-based column position, rebuilt from the
/// header row on every read.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    positions: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            // later duplicates win
            positions.insert(canonical_key(header.as_ref()), idx);
        }
        Self { positions }
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Position of the categories column under either accepted spelling.
    pub fn category_position(&self) -> Option<usize> {
        CATEGORY_KEYS.iter().find_map(|key| self.position(key))
    }
}
