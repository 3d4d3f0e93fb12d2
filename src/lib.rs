mod csv_out;
mod error;
mod event;
mod merge;
mod model;
mod options;
mod pdf_reader;

use std::collections::BTreeSet;
use std::path::Path;

pub use csv_out::{write_csv, write_csv_to_string};
pub use error::{ExtractError, WriteError};
pub use event::{EventCode, ExtractEvent};
pub use merge::concat_tables;
pub use model::{AggregatedDataset, ExtractedTable, ExtractionReport};
pub use options::{
    ConvertOptions, ExtractOptions, OutputOptions, PageSelection, TableOptions, TableStrategy,
};
pub use pdf_reader::{extract_tables, extract_tables_from_bytes};

/// How a conversion run ended. Every variant is a normal, non-fatal outcome.
#[derive(Debug)]
pub enum RunOutcome {
    Written(ExtractionReport),
    NoData(ExtractionReport),
    ExtractionFailed(ExtractError),
    WriteFailed(ExtractionReport, WriteError),
}

impl RunOutcome {
    #[must_use]
    pub fn report(&self) -> Option<&ExtractionReport> {
        match self {
            Self::Written(report) | Self::NoData(report) | Self::WriteFailed(report, _) => {
                Some(report)
            }
            Self::ExtractionFailed(_) => None,
        }
    }

    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

fn render_row(row: &[Option<String>]) -> String {
    row.iter()
        .map(|cell| cell.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn log_preview(dataset: &AggregatedDataset, rows: usize) {
    if rows == 0 {
        return;
    }

    tracing::info!(
        rows = dataset.row_count(),
        columns = dataset.width(),
        "extracted data preview"
    );
    for (index, row) in dataset.head(rows).iter().enumerate() {
        tracing::info!("  {index}: {}", render_row(row));
    }
}

/// Extracts every table from `input_pdf`, stacks them and writes `output_csv`.
///
/// Failures are logged and reported through [`RunOutcome`]; nothing here
/// panics or propagates. The output file (and its directory) is only created
/// when at least one table was found.
pub fn convert_pdf_to_csv(
    input_pdf: &Path,
    output_csv: &Path,
    options: &ConvertOptions,
) -> RunOutcome {
    tracing::info!("processing PDF file: {}", input_pdf.display());

    let mut events = Vec::new();
    let tables = match extract_tables(input_pdf, &options.extract, &mut events) {
        Ok(tables) => tables,
        Err(error) => {
            tracing::error!("error processing PDF: {error}");
            return RunOutcome::ExtractionFailed(error);
        }
    };

    let pages_with_tables = tables
        .iter()
        .map(|table| table.page)
        .collect::<BTreeSet<_>>()
        .len();
    let Some(dataset) = concat_tables(&tables) else {
        tracing::warn!("no data extracted from the PDF");
        return RunOutcome::NoData(ExtractionReport {
            pages_with_tables,
            events,
            ..ExtractionReport::default()
        });
    };

    log_preview(&dataset, options.preview_rows);

    let report = ExtractionReport {
        pages_with_tables,
        table_count: dataset.table_count,
        row_count: dataset.row_count(),
        events,
    };

    match write_csv(output_csv, &dataset, options.output) {
        Ok(()) => {
            tracing::info!(
                rows = report.row_count,
                tables = report.table_count,
                "data saved to {}",
                output_csv.display()
            );
            RunOutcome::Written(report)
        }
        Err(error) => {
            tracing::error!("error saving data to CSV: {error}");
            RunOutcome::WriteFailed(report, error)
        }
    }
}
