use std::fs;

use polars::prelude::*;
use salary_core::error::PipelineError;
use salary_core::output::{format_salary, write_salary_csv, write_salary_csv_to};
use salary_core::processor::SalaryProcessor;

#[test]
fn writes_index_and_salary_columns() -> Result<(), PipelineError> {
    let df = df!(
        "index" => &[0i64, 2, 5],
        "salary" => &[Some(1000.0f64), None, Some(130.5f64)],
    )?;

    let mut buffer = Vec::new();
    write_salary_csv_to(&df, &mut buffer)?;

    let text = String::from_utf8(buffer).expect("csv output is utf-8");
    assert_eq!(text, "index,salary\n0,1000.0\n2,\n5,130.5\n");
    Ok(())
}

#[test]
fn empty_result_still_has_header() -> Result<(), PipelineError> {
    let df = df!(
        "index" => Vec::<i64>::new(),
        "salary" => Vec::<Option<f64>>::new(),
    )?;

    let mut buffer = Vec::new();
    write_salary_csv_to(&df, &mut buffer)?;
    assert_eq!(String::from_utf8_lossy(&buffer), "index,salary\n");
    Ok(())
}

#[test]
fn processed_frame_round_trips_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = df!(
        "index" => &[0i64, 1, 2],
        "salary" => &[
            Some("{'from': 1000, 'currency': 'RUB', 'gross': False}"),
            None,
            Some("{'from': 100, 'to': 200, 'gross': False}"),
        ],
    )?;
    let processed = SalaryProcessor::default().process(&input)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("salary.csv");
    write_salary_csv(&processed.frame, &path)?;

    let written = fs::read_to_string(&path)?;
    assert_eq!(written, "index,salary\n0,1000.0\n2,150.0\n");
    Ok(())
}

#[test]
fn formats_like_shortest_float_repr() {
    assert_eq!(format_salary(1000.0), "1000.0");
    assert_eq!(format_salary(130.5), "130.5");
    assert_eq!(format_salary(0.1 + 0.2), "0.30000000000000004");
}

#[test]
fn formats_exponents_with_sign_and_two_digits() {
    assert_eq!(format_salary(1e16), "1e+16");
    assert_eq!(format_salary(1e-5), "1e-05");
    assert_eq!(format_salary(1.5e-7), "1.5e-07");
    assert_eq!(format_salary(2.5e123), "2.5e+123");
    assert_eq!(format_salary(-3e20), "-3e+20");
    assert_eq!(format_salary(0.0001), "0.0001");
    assert_eq!(format_salary(9999999999999998.0), "9999999999999998.0");
}
