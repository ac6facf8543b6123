use anyhow::Result;

pub mod memory;
pub mod workbook;

pub use memory::MemoryTable;
pub use workbook::WorkbookTable;

/// A rectangular grid of cell text, header row first.
pub type Grid = Vec<Vec<String>>;

/// Tabular storage addressed by 1-based rows, columns starting at 1.
///
/// Backends know nothing about FAQ records; [`crate::store::RecordStore`]
/// shapes rows to the header order before handing them over.
pub trait TableRepository: Send + Sync {
    /// Human-readable location, used in log lines and error messages.
    fn describe(&self) -> String;

    /// The whole used range. `None` when the backing sheet does not exist.
    fn read_used_range(&self) -> Result<Option<Grid>>;

    /// Overwrites `rows.len()` rows starting at `start_row`, from column 1.
    fn write_rows(&self, start_row: u32, rows: &[Vec<String>]) -> Result<()>;

    /// Overwrites single cells of one column, as `(row, text)` pairs, in one
    /// write. Every other cell keeps its value, type and formula.
    fn write_cells(&self, column: u32, cells: &[(u32, String)]) -> Result<()>;

    /// Removes one physical row; every row below it moves up by one.
    fn delete_row(&self, row: u32) -> Result<()>;
}
