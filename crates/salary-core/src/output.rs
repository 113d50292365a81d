use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::Result;
use crate::table::{INDEX_COLUMN, SALARY_COLUMN};

/// Writes the processed frame as `index,salary` CSV. Null salaries become empty fields.
pub fn write_salary_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_salary_csv_to(df, file)?;
    info!(path = %path.display(), rows = df.height(), "Wrote salary CSV");
    Ok(())
}

pub fn write_salary_csv_to<W: Write>(df: &DataFrame, writer: W) -> Result<()> {
    let index = df.column(INDEX_COLUMN)?.i64()?;
    let salary = df.column(SALARY_COLUMN)?.f64()?;

    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record([INDEX_COLUMN, SALARY_COLUMN])?;

    for idx in 0..df.height() {
        let row_index = index.get(idx).map(|value| value.to_string()).unwrap_or_default();
        let value = salary.get(idx).map(format_salary).unwrap_or_default();
        writer.write_record([row_index.as_str(), value.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Shortest round-trip form; whole numbers keep a trailing `.0` (`1000.0`, `130.5`).
/// Very large or small values use a signed, two-digit-minimum exponent (`1e+16`, `1e-05`).
pub fn format_salary(value: f64) -> String {
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
