#![allow(dead_code)]
use umya_spreadsheet::Worksheet;

#[derive(Clone, Debug)]
pub enum CellVal {
    Text(String),
    Num(f64),
    Empty,
}

impl From<&str> for CellVal {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellVal::Empty
        } else {
            CellVal::Text(s.to_string())
        }
    }
}

impl From<f64> for CellVal {
    fn from(n: f64) -> Self {
        CellVal::Num(n)
    }
}

fn set_cell(sheet: &mut Worksheet, col: u32, row: u32, val: &CellVal) {
    match val {
        CellVal::Text(s) => {
            sheet.get_cell_mut((col, row)).set_value(s.clone());
        }
        CellVal::Num(n) => {
            sheet.get_cell_mut((col, row)).set_value_number(*n);
        }
        CellVal::Empty => {}
    }
}

/// Header in row 1, data from row 2, starting at column A.
pub fn fill_table<H, R, V>(sheet: &mut Worksheet, headers: &[H], rows: &[R])
where
    H: AsRef<str>,
    R: AsRef<[V]>,
    V: Into<CellVal> + Clone,
{
    for (i, header) in headers.iter().enumerate() {
        sheet
            .get_cell_mut((i as u32 + 1, 1))
            .set_value(header.as_ref().to_string());
        sheet
            .get_style_mut((i as u32 + 1, 1))
            .get_font_mut()
            .set_bold(true);
    }

    for (row_idx, row_data) in rows.iter().enumerate() {
        let row = 2 + row_idx as u32;
        for (col_idx, val) in row_data.as_ref().iter().enumerate() {
            let cell_val: CellVal = val.clone().into();
            set_cell(sheet, col_idx as u32 + 1, row, &cell_val);
        }
    }
}
