use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use crate::error::{PipelineError, Result};

pub const INDEX_COLUMN: &str = "index";
pub const SALARY_COLUMN: &str = "salary";

/// Cell texts read as missing values: the default NA markers of common spreadsheet
/// and dataframe tooling.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Header of the column holding the salary records.
    pub column: String,
    /// Worksheet to read; the first one when unset. Ignored for CSV input.
    pub sheet: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            column: SALARY_COLUMN.to_string(),
            sheet: None,
        }
    }
}

/// Loads the salary column of a dump into a frame with `index` (row position,
/// header excluded) and `salary` (raw cell text, null when missing) columns.
pub fn load_salary_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let cells = match extension.as_deref() {
        Some("csv") => read_csv_column(File::open(path)?, &options.column)?,
        _ => read_workbook_column(path, options)?,
    };

    debug!(
        path = %path.display(),
        rows = cells.len(),
        "Read salary column"
    );
    salary_frame(cells)
}

pub fn read_csv_column<R: Read>(reader: R, column: &str) -> Result<Vec<Option<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let position = reader
        .headers()?
        .iter()
        .position(|name| name.trim() == column)
        .ok_or_else(|| PipelineError::MissingColumn(column.to_string()))?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.push(record.get(position).and_then(cell_text));
    }
    Ok(cells)
}

fn read_workbook_column(path: &Path, options: &LoadOptions) -> Result<Vec<Option<String>>> {
    let mut workbook = open_workbook_auto(path)?;

    let range = match options.sheet.as_deref() {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
                return Err(PipelineError::MissingSheet(name.to_string()));
            }
            workbook.worksheet_range(name)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or(PipelineError::EmptyWorkbook)??,
    };

    let mut rows = range.rows();
    let position = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(name) if name.trim() == options.column))
        })
        .ok_or_else(|| PipelineError::MissingColumn(options.column.clone()))?;

    Ok(rows
        .map(|row| row.get(position).and_then(workbook_cell_text))
        .collect())
}

fn workbook_cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) => cell_text(text),
        other => Some(other.to_string()),
    }
}

fn cell_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(text.to_string())
    }
}

/// Builds the processor's input frame from raw cell texts in sheet order.
pub fn salary_frame(cells: Vec<Option<String>>) -> Result<DataFrame> {
    let index: Vec<i64> = (0..cells.len() as i64).collect();
    let df = DataFrame::new(vec![
        Series::new(INDEX_COLUMN.into(), index).into(),
        Series::new(SALARY_COLUMN.into(), cells).into(),
    ])?;
    Ok(df)
}
