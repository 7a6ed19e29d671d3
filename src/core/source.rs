//! Tabular input - read a spreadsheet into a grid of text cells
//!
//! CSV/TSV files are a single implicit tab. Workbooks (.xlsx, .xlsm, .xlsb,
//! .xls, .ods) are read through calamine and the configured sheet must exist.

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating or reading the tabular source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No source spreadsheet configured. Set `source` in contactsync.yaml, CONTACTSYNC_SOURCE, or pass --source")]
    NotConfigured,

    #[error("Source spreadsheet not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported source format '{extension}' for {path}. Use .csv, .tsv, .xlsx, .xlsm, .xlsb, .xls or .ods")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Sheet '{sheet}' not found in {path}. Available sheets: {}", .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("No data rows found in {path} ({rows} row(s) including header)")]
    Empty { path: PathBuf, rows: usize },
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Workbook,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match extension.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "tsv" | "tab" => Ok(SourceFormat::Tsv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            _ => Err(SourceError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Every populated cell as text, row by row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    /// Zero-based sheet row of the header; workbook ranges skip leading blank rows
    first_row: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows, first_row: 0 }
    }

    pub fn with_first_row(rows: Vec<Vec<String>>, first_row: usize) -> Self {
        Self { rows, first_row }
    }

    /// One-based sheet row number of a data row index
    pub fn display_row(&self, index: usize) -> usize {
        self.first_row + index + 2
    }

    /// Rows read, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header row (row 0), if any
    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Data rows (rows 1..N)
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// True when at least one data row follows the header
    pub fn has_data(&self) -> bool {
        self.rows.len() >= 2
    }
}

/// A configured spreadsheet location
#[derive(Debug, Clone)]
pub struct TabularSource {
    path: PathBuf,
    sheet: String,
}

impl TabularSource {
    /// Resolve the source from configuration, failing fast when unset or missing
    pub fn resolve(source: Option<&str>, sheet: &str) -> Result<Self, SourceError> {
        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SourceError::NotConfigured)?;
        let path = PathBuf::from(source);
        if !path.exists() {
            return Err(SourceError::NotFound(path));
        }
        SourceFormat::detect(&path)?;
        Ok(Self {
            path,
            sheet: sheet.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Read every populated cell
    pub fn read(&self) -> Result<Grid, SourceError> {
        match SourceFormat::detect(&self.path)? {
            SourceFormat::Csv => self.read_delimited(b','),
            SourceFormat::Tsv => self.read_delimited(b'\t'),
            SourceFormat::Workbook => self.read_workbook(),
        }
    }

    /// Read the grid and require at least one data row
    pub fn read_with_data(&self) -> Result<Grid, SourceError> {
        let grid = self.read()?;
        if !grid.has_data() {
            return Err(SourceError::Empty {
                path: self.path.clone(),
                rows: grid.row_count(),
            });
        }
        Ok(grid)
    }

    fn read_error(&self, e: impl std::fmt::Display) -> SourceError {
        SourceError::Read {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn read_delimited(&self, delimiter: u8) -> Result<Grid, SourceError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.read_error(format!("row {}: {}", idx + 1, e)))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Grid::new(rows))
    }

    fn read_workbook(&self) -> Result<Grid, SourceError> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.read_error(e))?;

        let available = workbook.sheet_names();
        if !available.iter().any(|name| name == &self.sheet) {
            return Err(SourceError::SheetNotFound {
                path: self.path.clone(),
                sheet: self.sheet.clone(),
                available,
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|e| self.read_error(e))?;

        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        Ok(Grid::with_first_row(rows, first_row))
    }
}

/// Convert a workbook cell to text
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole numbers (phone numbers, postal codes) lose the ".0"
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Error(_) | Data::Empty => String::new(),
        other => other.to_string(),
    }
}
