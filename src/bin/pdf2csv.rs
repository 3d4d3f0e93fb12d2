use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use pdf_table_csv::{
    ConvertOptions, ExtractOptions, OutputOptions, PageSelection, RunOutcome, TableOptions,
    TableStrategy, convert_pdf_to_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Lattice,
    LatticeStrict,
    Stream,
}

impl From<StrategyArg> for TableStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Lattice => Self::Lattice,
            StrategyArg::LatticeStrict => Self::LatticeStrict,
            StrategyArg::Stream => Self::Stream,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pdf2csv",
    version,
    about = "Extract every table in a PDF and stack them into one CSV"
)]
struct Cli {
    /// Input PDF path.
    #[arg(short, long, default_value = "sample_data/sample_table.pdf")]
    input: PathBuf,

    /// Output CSV path. Missing directories are created.
    #[arg(short, long, default_value = "output/extracted_data.csv")]
    output: PathBuf,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Table detection strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Lattice)]
    strategy: StrategyArg,

    #[arg(long, default_value_t = 3.0)]
    snap_tolerance: f64,

    #[arg(long, default_value_t = 3.0)]
    join_tolerance: f64,

    #[arg(long, default_value_t = 3.0)]
    text_tolerance: f64,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Write a header row of column positions (0,1,2,...).
    #[arg(long)]
    index_header: bool,

    /// Number of extracted rows to log as a preview.
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delimiter(value: char) -> Result<u8> {
    let delimiter = u8::try_from(value)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character"))?;
    if matches!(delimiter, b'"' | b'\r' | b'\n') {
        anyhow::bail!("delimiter cannot be a quote or line terminator");
    }
    Ok(delimiter)
}

fn parse_options(cli: &Cli) -> Result<ConvertOptions> {
    let pages = cli
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    let delimiter = parse_delimiter(cli.delimiter)?;

    Ok(ConvertOptions {
        extract: ExtractOptions {
            pages,
            table: TableOptions {
                strategy: cli.strategy.into(),
                snap_tolerance: cli.snap_tolerance,
                join_tolerance: cli.join_tolerance,
                text_tolerance: cli.text_tolerance,
            },
        },
        output: OutputOptions {
            delimiter,
            index_header: cli.index_header,
        },
        preview_rows: cli.preview,
    })
}

fn print_json(outcome: &RunOutcome) -> Result<()> {
    let value = match outcome {
        RunOutcome::Written(report) => serde_json::json!({ "status": "written", "report": report }),
        RunOutcome::NoData(report) => serde_json::json!({ "status": "no_data", "report": report }),
        RunOutcome::ExtractionFailed(error) => {
            serde_json::json!({ "status": "extraction_failed", "error": error.to_string() })
        }
        RunOutcome::WriteFailed(report, error) => serde_json::json!({
            "status": "write_failed",
            "error": error.to_string(),
            "report": report,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pdf_table_csv=debug"
    } else {
        "pdf_table_csv=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let options = match parse_options(&cli) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error:#}");
            return ExitCode::from(1);
        }
    };

    let outcome = convert_pdf_to_csv(&cli.input, &cli.output, &options);
    if cli.json
        && let Err(error) = print_json(&outcome)
    {
        eprintln!("error: {error:#}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
