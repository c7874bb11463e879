// ==========================================
// Banking Data Loader - workbook reader
// ==========================================
// Reads one sheet into rows keyed by column header. Cells stay
// as calamine::Data so numeric, date and time cells reach the
// row mapper untruncated, not pre-flattened to text.
// ==========================================

use crate::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One spreadsheet row: column header -> raw cell value.
pub type RawRow = HashMap<String, Data>;

pub struct Workbook {
    inner: Xlsx<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook file. A missing or unreadable file is an
    /// input error; no database transaction has been opened yet.
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("xlsx") {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let inner: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::WorkbookError(e.to_string()))?;

        Ok(Self { inner })
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.inner.sheet_names().iter().any(|s| s == name)
    }

    /// Read one sheet into rows keyed by the header row. Fully
    /// blank rows are skipped.
    pub fn read_sheet(&mut self, name: &str) -> ImportResult<Vec<RawRow>> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| ImportError::SheetReadError {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(row) => row,
            None => return Ok(Vec::new()), // empty sheet, nothing to import
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            if data_row.iter().all(is_blank) {
                continue;
            }

            let mut row_map = RawRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if !header.is_empty() {
                        row_map.insert(header.clone(), cell.clone());
                    }
                }
            }
            records.push(row_map);
        }

        Ok(records)
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
