use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use salary_core::config::ConversionConfig;
use salary_core::output::write_salary_csv;
use salary_core::processor::SalaryProcessor;
use salary_core::table::{load_salary_table, LoadOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extract the salary column from a job-board dump and normalize it to one net,
/// base-currency figure per row.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    long_about = None,
    after_help = "Example: salary -i \"region roles (26.05.22).xlsx\" -o salary.csv"
)]
struct Cli {
    /// Path to the dump table (xlsx, xlsm, xls, xlsb, ods or csv)
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output CSV file
    #[arg(short, long, default_value = "salary.csv")]
    output: PathBuf,

    /// Header of the column holding the salary records
    #[arg(short, long, default_value = "salary")]
    column: String,

    /// Worksheet to read instead of the first one
    #[arg(long)]
    sheet: Option<String>,

    /// TOML file with the net ratio and exchange rates
    #[arg(long, env = "SALARY_RATES")]
    rates: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    run(cli)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.rates.as_deref() {
        Some(path) => ConversionConfig::load(path)
            .with_context(|| format!("failed to load conversion config {}", path.display()))?,
        None => ConversionConfig::default(),
    };

    let options = LoadOptions {
        column: cli.column,
        sheet: cli.sheet,
    };
    let table = load_salary_table(&cli.input, &options)
        .with_context(|| format!("failed to read salary table {}", cli.input.display()))?;
    info!(
        input = %cli.input.display(),
        rows = table.height(),
        "Loaded salary table"
    );

    let processor = SalaryProcessor::new(config);
    let processed = processor
        .process(&table)
        .context("failed to normalize salary column")?;
    let summary = &processed.summary;
    info!(
        input_rows = summary.input_rows,
        dropped_rows = summary.dropped_rows,
        output_rows = summary.output_rows,
        rows_without_bounds = summary.rows_without_bounds,
        "Salary column normalized"
    );

    write_salary_csv(&processed.frame, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}
