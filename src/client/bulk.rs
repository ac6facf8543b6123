use crate::errors::{FaqError, FaqResult};
use crate::model::FaqInput;
use once_cell::sync::Lazy;
use regex::Regex;

// Any run of dashes separates blocks, including mid-line.
static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"---+\s*").expect("block separator pattern is valid"));

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[Pp]:\s*(.+?)\s*(?:\r\n|\n|\r)+\s*[Rr]:\s*(.+)$")
        .expect("entry pattern is valid")
});

/// Parses pasted text of the form
///
/// ```text
/// P: question
/// R: answer
/// ---
/// ```
///
/// Blocks that do not match are skipped. Text with no valid block at all is
/// rejected.
pub fn parse_bulk(text: &str) -> FaqResult<Vec<FaqInput>> {
    let entries: Vec<FaqInput> = BLOCK_SEPARATOR
        .split(text)
        .filter_map(|block| {
            let captures = ENTRY.captures(block.trim())?;
            let question = captures.get(1)?.as_str().trim();
            let answer = captures.get(2)?.as_str().trim();
            (!question.is_empty() && !answer.is_empty()).then(|| {
                FaqInput::new(question, answer)
                    .with_categories(Vec::<String>::new())
                    .with_keywords(Vec::<String>::new())
            })
        })
        .collect();

    if entries.is_empty() {
        return Err(FaqError::validation(
            "no valid entries found; use blocks of 'P: question', 'R: answer' separated by '---'",
        ));
    }
    Ok(entries)
}
