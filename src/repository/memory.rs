use super::{Grid, TableRepository};
use anyhow::{Result, anyhow};
use parking_lot::RwLock;

/// A table kept in memory. `None` models a workbook without the sheet.
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: RwLock<Option<Grid>>,
}

impl MemoryTable {
    /// An existing sheet with no rows.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Some(Vec::new())),
        }
    }

    pub fn missing() -> Self {
        Self {
            rows: RwLock::new(None),
        }
    }

    pub fn with_rows<R, S>(rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let grid = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|v| v.as_ref().to_string()).collect())
            .collect();
        let table = Self {
            rows: RwLock::new(Some(grid)),
        };
        table.square_up();
        table
    }

    /// Snapshot of the current grid, for assertions.
    pub fn snapshot(&self) -> Option<Grid> {
        self.rows.read().clone()
    }

    // Keeps every row as wide as the widest one, like a sheet's used range.
    fn square_up(&self) {
        let mut guard = self.rows.write();
        if let Some(grid) = guard.as_mut() {
            let width = grid.iter().map(Vec::len).max().unwrap_or(0);
            for row in grid.iter_mut() {
                row.resize(width, String::new());
            }
        }
    }
}

impl TableRepository for MemoryTable {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read_used_range(&self) -> Result<Option<Grid>> {
        Ok(self.rows.read().clone())
    }

    fn write_rows(&self, start_row: u32, rows: &[Vec<String>]) -> Result<()> {
        anyhow::ensure!(start_row >= 1, "rows are 1-based, got {start_row}");
        {
            let mut guard = self.rows.write();
            let grid = guard.as_mut().ok_or_else(|| anyhow!("sheet not found"))?;
            for (offset, values) in rows.iter().enumerate() {
                let idx = start_row as usize - 1 + offset;
                if grid.len() <= idx {
                    grid.resize(idx + 1, Vec::new());
                }
                let target = &mut grid[idx];
                if target.len() < values.len() {
                    target.resize(values.len(), String::new());
                }
                target[..values.len()].clone_from_slice(values);
            }
        }
        self.square_up();
        Ok(())
    }

    fn write_cells(&self, column: u32, cells: &[(u32, String)]) -> Result<()> {
        anyhow::ensure!(column >= 1, "columns are 1-based, got {column}");
        {
            let mut guard = self.rows.write();
            let grid = guard.as_mut().ok_or_else(|| anyhow!("sheet not found"))?;
            let col = column as usize - 1;
            for (row, value) in cells {
                anyhow::ensure!(*row >= 1, "rows are 1-based, got {row}");
                let idx = *row as usize - 1;
                if grid.len() <= idx {
                    grid.resize(idx + 1, Vec::new());
                }
                let target = &mut grid[idx];
                if target.len() <= col {
                    target.resize(col + 1, String::new());
                }
                target[col] = value.clone();
            }
        }
        self.square_up();
        Ok(())
    }

    fn delete_row(&self, row: u32) -> Result<()> {
        anyhow::ensure!(row >= 1, "rows are 1-based, got {row}");
        let mut guard = self.rows.write();
        let grid = guard.as_mut().ok_or_else(|| anyhow!("sheet not found"))?;
        let idx = row as usize - 1;
        if idx < grid.len() {
            grid.remove(idx);
        }
        Ok(())
    }
}
