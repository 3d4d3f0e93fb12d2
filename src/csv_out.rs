use std::io;
use std::path::Path;

use csv::{QuoteStyle, Writer, WriterBuilder};

use crate::error::WriteError;
use crate::model::AggregatedDataset;
use crate::options::OutputOptions;

fn write_records<W: io::Write>(
    writer: &mut Writer<W>,
    dataset: &AggregatedDataset,
    options: OutputOptions,
) -> Result<(), WriteError> {
    let width = dataset.width();
    if options.index_header {
        writer.write_record((0..width).map(|index| index.to_string()))?;
    }

    // Short rows are padded so every record carries the same field count.
    for row in &dataset.rows {
        let cells = row
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(""))
            .chain(std::iter::repeat_n("", width - row.len()));
        writer.write_record(cells)?;
    }
    writer.flush()?;
    Ok(())
}

fn builder(options: OutputOptions) -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(options.delimiter)
        .quote_style(QuoteStyle::Necessary)
        .has_headers(false);
    builder
}

/// Writes the dataset to `path`, creating missing parent directories first.
///
/// # Errors
///
/// Returns [`WriteError`] when the directory cannot be created or the file
/// cannot be written.
pub fn write_csv(
    path: &Path,
    dataset: &AggregatedDataset,
    options: OutputOptions,
) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = builder(options).from_path(path)?;
    write_records(&mut writer, dataset, options)
}

/// # Errors
///
/// Returns [`WriteError`] if serialization fails.
pub fn write_csv_to_string(
    dataset: &AggregatedDataset,
    options: OutputOptions,
) -> Result<String, WriteError> {
    let mut writer = builder(options).from_writer(Vec::<u8>::new());
    write_records(&mut writer, dataset, options)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| WriteError::Io(error.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
