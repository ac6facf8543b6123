use crate::errors::{FaqError, FaqResult};
use crate::list_codec::{self, encode_field};
use crate::model::{FaqInput, FaqRecord};
use crate::normalize::{
    ANSWER_KEY, CATEGORY_KEYS, DEFAULT_HEADERS, FieldKey, HeaderMap, KEYWORDS_KEY, QUESTION_KEY,
    canonical_key,
};
use crate::repository::{Grid, TableRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Row of the header; data starts on the next one.
pub const HEADER_ROW: u32 = 1;
pub const FIRST_DATA_ROW: u32 = HEADER_ROW + 1;

/// How to fill header columns that are not one of the four known fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtraColumns {
    Blank,
    FromInput,
}

/// Reads and writes FAQ records on top of a [`TableRepository`].
///
/// The table's header order is authoritative: writes are shaped to fit
/// whatever columns exist, in whatever order they appear.
#[derive(Clone)]
pub struct RecordStore {
    table: Arc<dyn TableRepository>,
}

impl RecordStore {
    pub fn new(table: Arc<dyn TableRepository>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<dyn TableRepository> {
        &self.table
    }

    /// All non-empty records. A missing sheet, an empty sheet or a header row
    /// without a question column all read as "no records yet".
    pub fn fetch_all(&self) -> FaqResult<Vec<FaqRecord>> {
        let Some(mut grid) = self.table.read_used_range()? else {
            debug!(table = %self.table.describe(), "sheet missing, returning no records");
            return Ok(Vec::new());
        };
        if grid.is_empty() {
            return Ok(Vec::new());
        }

        let headers = grid.remove(0);
        let header_map = HeaderMap::from_headers(&headers);
        if !header_map.contains(QUESTION_KEY) {
            debug!(table = %self.table.describe(), "no question column, table not initialized");
            return Ok(Vec::new());
        }

        let records = grid
            .iter()
            .enumerate()
            .map(|(idx, row)| record_from_row(&header_map, row, FIRST_DATA_ROW + idx as u32))
            .filter(|record| !record.is_empty())
            .collect::<Vec<_>>();
        debug!(count = records.len(), "fetched records");
        Ok(records)
    }

    /// Appends `records` after the last used row in one bulk write and
    /// returns how many rows were added. An empty table gets the default
    /// header row first.
    pub fn append(&self, records: &[FaqInput]) -> FaqResult<usize> {
        let grid = self.require_sheet()?;

        let mut rows = Vec::with_capacity(records.len() + 1);
        let (headers, start_row) = match grid.first() {
            Some(headers) => (headers.clone(), grid.len() as u32 + 1),
            None => {
                let headers: Vec<String> = DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect();
                rows.push(headers.clone());
                (headers, HEADER_ROW)
            }
        };

        let added = records.len();
        rows.extend(
            records
                .iter()
                .map(|record| shape_row(&headers, record, ExtraColumns::Blank)),
        );
        if rows.is_empty() {
            return Ok(0);
        }

        self.table.write_rows(start_row, &rows)?;
        info!(added, table = %self.table.describe(), "appended rows");
        Ok(added)
    }

    /// Rebuilds one row in the current header order and overwrites it.
    ///
    /// Every column is rewritten: a field the caller leaves out is blanked.
    pub fn update_row(&self, row_index: u32, record: &FaqInput) -> FaqResult<()> {
        let grid = self.require_sheet()?;
        ensure_data_row(&grid, row_index)?;

        let headers = &grid[0];
        let row = shape_row(headers, record, ExtraColumns::FromInput);
        self.table.write_rows(row_index, &[row])?;
        info!(row = row_index, table = %self.table.describe(), "updated row");
        Ok(())
    }

    /// Removes one row. Rows below it shift up, so previously fetched row
    /// indices past `row_index` are stale afterwards.
    pub fn delete_row(&self, row_index: u32) -> FaqResult<()> {
        let grid = self.require_sheet()?;
        ensure_data_row(&grid, row_index)?;

        self.table.delete_row(row_index)?;
        info!(row = row_index, table = %self.table.describe(), "deleted row");
        Ok(())
    }

    pub(crate) fn require_sheet(&self) -> FaqResult<Grid> {
        self.table
            .read_used_range()?
            .ok_or_else(|| FaqError::not_found(format!("sheet {}", self.table.describe())))
    }
}

fn ensure_data_row(grid: &Grid, row_index: u32) -> FaqResult<()> {
    let last_row = grid.len() as u32;
    if row_index < FIRST_DATA_ROW || row_index > last_row {
        return Err(FaqError::validation(format!(
            "rowIndex {row_index} does not address a data row (valid: {FIRST_DATA_ROW}..={last_row})"
        )));
    }
    Ok(())
}

fn cell<'a>(header_map: &HeaderMap, row: &'a [String], key: &str) -> &'a str {
    header_map
        .position(key)
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}

fn record_from_row(header_map: &HeaderMap, row: &[String], row_index: u32) -> FaqRecord {
    let categories = CATEGORY_KEYS
        .iter()
        .map(|key| cell(header_map, row, key))
        .find(|value| !value.is_empty())
        .unwrap_or("");

    FaqRecord {
        row_index,
        question: cell(header_map, row, QUESTION_KEY).to_string(),
        answer: cell(header_map, row, ANSWER_KEY).to_string(),
        categories: list_codec::decode(categories),
        keywords: list_codec::decode(cell(header_map, row, KEYWORDS_KEY)),
    }
}

fn shape_row(headers: &[String], record: &FaqInput, extras: ExtraColumns) -> Vec<String> {
    headers
        .iter()
        .map(|header| {
            let key = canonical_key(header);
            match FieldKey::from_key(&key) {
                Some(FieldKey::Question) => record.question.clone().unwrap_or_default(),
                Some(FieldKey::Answer) => record.answer.clone().unwrap_or_default(),
                Some(FieldKey::Categories) => encode_field(record.categories.as_ref()),
                Some(FieldKey::Keywords) => encode_field(record.keywords.as_ref()),
                None => match extras {
                    ExtraColumns::FromInput => record.extra_text(&key),
                    ExtraColumns::Blank => String::new(),
                },
            }
        })
        .collect()
}
