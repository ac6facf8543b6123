use super::{Grid, TableRepository};
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use umya_spreadsheet::Spreadsheet;

/// One sheet of an `.xlsx` workbook on disk.
///
/// Every call reopens the file, so edits made by other tools between
/// requests are picked up; there is no cross-process locking.
pub struct WorkbookTable {
    path: PathBuf,
    sheet_name: String,
}

impl WorkbookTable {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Like [`WorkbookTable::new`], but creates the workbook and/or the sheet
    /// (with no rows) when they are absent.
    pub fn open_or_create(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Result<Self> {
        let table = Self::new(path, sheet_name);
        if !table.path.exists() {
            if let Some(parent) = table.path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let mut book = umya_spreadsheet::new_file_empty_worksheet();
            book.new_sheet(table.sheet_name.clone())
                .map_err(|e| anyhow!("failed to add sheet '{}': {}", table.sheet_name, e))?;
            table.save(&book)?;
            tracing::info!(path = %table.path.display(), sheet = %table.sheet_name, "created workbook");
            return Ok(table);
        }

        let mut book = table.load()?;
        if book.get_sheet_by_name(&table.sheet_name).is_none() {
            book.new_sheet(table.sheet_name.clone())
                .map_err(|e| anyhow!("failed to add sheet '{}': {}", table.sheet_name, e))?;
            table.save(&book)?;
            tracing::info!(path = %table.path.display(), sheet = %table.sheet_name, "added missing sheet");
        }
        Ok(table)
    }

    fn load(&self) -> Result<Spreadsheet> {
        umya_spreadsheet::reader::xlsx::read(&self.path)
            .with_context(|| format!("failed to open workbook '{}'", self.path.display()))
    }

    fn save(&self, book: &Spreadsheet) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(book, &self.path)
            .with_context(|| format!("failed to save workbook '{}'", self.path.display()))
    }
}

impl TableRepository for WorkbookTable {
    fn describe(&self) -> String {
        format!("{}#{}", self.path.display(), self.sheet_name)
    }

    fn read_used_range(&self) -> Result<Option<Grid>> {
        let book = self.load()?;
        let Some(sheet) = book.get_sheet_by_name(&self.sheet_name) else {
            return Ok(None);
        };

        let last_row = sheet.get_highest_row();
        let last_col = sheet.get_highest_column();
        let grid = (1..=last_row)
            .map(|row| {
                (1..=last_col)
                    .map(|col| {
                        sheet
                            .get_cell((col, row))
                            .map(|cell| cell.get_value().to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        Ok(Some(grid))
    }

    fn write_rows(&self, start_row: u32, rows: &[Vec<String>]) -> Result<()> {
        anyhow::ensure!(start_row >= 1, "rows are 1-based, got {start_row}");
        let mut book = self.load()?;
        let sheet = book
            .get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| anyhow!("sheet '{}' not found", self.sheet_name))?;

        for (offset, values) in rows.iter().enumerate() {
            let row = start_row + offset as u32;
            for (idx, value) in values.iter().enumerate() {
                sheet
                    .get_cell_mut((idx as u32 + 1, row))
                    .set_value_string(value.clone());
            }
        }

        self.save(&book)
    }

    fn write_cells(&self, column: u32, cells: &[(u32, String)]) -> Result<()> {
        anyhow::ensure!(column >= 1, "columns are 1-based, got {column}");
        let mut book = self.load()?;
        let sheet = book
            .get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| anyhow!("sheet '{}' not found", self.sheet_name))?;

        for (row, value) in cells {
            anyhow::ensure!(*row >= 1, "rows are 1-based, got {row}");
            sheet
                .get_cell_mut((column, *row))
                .set_value_string(value.clone());
        }

        self.save(&book)
    }

    fn delete_row(&self, row: u32) -> Result<()> {
        anyhow::ensure!(row >= 1, "rows are 1-based, got {row}");
        let mut book = self.load()?;
        let sheet = book
            .get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| anyhow!("sheet '{}' not found", self.sheet_name))?;
        sheet.remove_row(&row, &1);
        self.save(&book)
    }
}
