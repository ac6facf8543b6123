#![allow(dead_code)]
pub mod builders;

use faq_sheet::config::{ServerConfig, StorageKind};
use faq_sheet::state::AppState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use umya_spreadsheet::Spreadsheet;

pub const FAQ_HEADERS: [&str; 4] = ["Pregunta", "Respuesta", "Categorías", "Palabras clave"];

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn create_workbook<F>(&self, name: &str, f: F) -> PathBuf
    where
        F: FnOnce(&mut Spreadsheet),
    {
        let path = self.path(name);
        let mut book = umya_spreadsheet::new_file();
        f(&mut book);
        umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write workbook");
        path
    }

    /// A workbook whose `FAQ` sheet holds the standard header and `rows`.
    pub fn faq_workbook(&self, name: &str, rows: &[[&str; 4]]) -> PathBuf {
        self.create_workbook(name, |book| {
            let sheet = book.new_sheet("FAQ").expect("add FAQ sheet");
            builders::fill_table(sheet, &FAQ_HEADERS, rows);
        })
    }

    pub fn config_with<F>(&self, f: F) -> ServerConfig
    where
        F: FnOnce(&mut ServerConfig),
    {
        let mut config = ServerConfig {
            workbook: self.path("faq.xlsx"),
            storage: StorageKind::Workbook,
            ..ServerConfig::default()
        };
        f(&mut config);
        config
    }
}

pub fn app_state_with_config(config: ServerConfig) -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(config)).expect("app state"))
}

/// Cell text of every used row of `sheet`.
pub fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let book = umya_spreadsheet::reader::xlsx::read(path).expect("read workbook");
    let sheet = book.get_sheet_by_name(sheet).expect("sheet exists");
    (1..=sheet.get_highest_row())
        .map(|row| {
            (1..=sheet.get_highest_column())
                .map(|col| {
                    sheet
                        .get_cell((col, row))
                        .map(|cell| cell.get_value().to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}
