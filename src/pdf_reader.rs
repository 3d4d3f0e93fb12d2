use std::path::Path;

use pdfplumber::Pdf;

use crate::error::ExtractError;
use crate::event::{EventCode, ExtractEvent};
use crate::model::ExtractedTable;
use crate::options::ExtractOptions;

fn extract_from_document(
    pdf: &Pdf,
    options: &ExtractOptions,
    events: &mut Vec<ExtractEvent>,
) -> Result<Vec<ExtractedTable>, ExtractError> {
    let settings = options.table.to_settings();
    let mut tables = Vec::new();
    let mut visited_pages = 0_usize;

    for index in 0..pdf.page_count() {
        let page_number = index + 1;
        if let Some(selection) = &options.pages
            && !selection.contains(page_number)
        {
            continue;
        }

        let page = pdf.page(index).map_err(|source| ExtractError::Page {
            page: page_number,
            source,
        })?;
        visited_pages += 1;

        let found = page.find_tables(&settings);
        tracing::debug!(page = page_number, tables = found.len(), "scanned page");
        if found.is_empty() {
            events.push(
                ExtractEvent::new(EventCode::PageWithoutTables, "no tables on page")
                    .with_page(page_number),
            );
            continue;
        }

        for (table_offset, table) in found.iter().enumerate() {
            let table_index = table_offset + 1;
            let rows = table
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.text.clone()).collect::<Vec<_>>())
                .collect::<Vec<_>>();
            tracing::info!(
                page = page_number,
                table = table_index,
                rows = rows.len(),
                "extracting table {table_index} from page {page_number}"
            );
            events.push(
                ExtractEvent::new(
                    EventCode::TableExtracted,
                    format!("extracted table {table_index} from page {page_number}"),
                )
                .with_page(page_number)
                .with_table_index(table_index)
                .with_rows(rows.len()),
            );
            tables.push(ExtractedTable {
                page: page_number,
                table_index,
                rows,
            });
        }
    }

    if visited_pages == 0 && options.pages.is_some() {
        return Err(ExtractError::NoPagesSelected);
    }

    if tables.is_empty() {
        events.push(ExtractEvent::new(
            EventCode::NoTablesDetected,
            "no tables found in the PDF",
        ));
    }

    Ok(tables)
}

/// Detects every table in the document, in page order then table order.
///
/// The file is read in one call and closed before parsing starts. A document
/// without tables yields an empty list rather than an error.
///
/// # Errors
///
/// Returns [`ExtractError`] when the file is missing or unreadable, when the
/// bytes are not a valid PDF, or when a selected page cannot be interpreted.
pub fn extract_tables(
    input_pdf: &Path,
    options: &ExtractOptions,
    events: &mut Vec<ExtractEvent>,
) -> Result<Vec<ExtractedTable>, ExtractError> {
    let bytes = std::fs::read(input_pdf)
        .map_err(|source| ExtractError::from_read(input_pdf.to_path_buf(), source))?;
    let pdf = Pdf::open(&bytes, None).map_err(|source| ExtractError::Parse {
        path: input_pdf.to_path_buf(),
        source,
    })?;
    extract_from_document(&pdf, options, events)
}

/// Same as [`extract_tables`] for a PDF already held in memory.
///
/// # Errors
///
/// Returns [`ExtractError`] when the bytes are not a valid PDF or a selected
/// page cannot be interpreted.
pub fn extract_tables_from_bytes(
    input_pdf: &[u8],
    options: &ExtractOptions,
    events: &mut Vec<ExtractEvent>,
) -> Result<Vec<ExtractedTable>, ExtractError> {
    let pdf = Pdf::open(input_pdf, None).map_err(|source| ExtractError::Parse {
        path: "<memory>".into(),
        source,
    })?;
    extract_from_document(&pdf, options, events)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::ExtractError;
    use crate::options::ExtractOptions;
    use crate::pdf_reader::{extract_tables, extract_tables_from_bytes};

    #[test]
    fn missing_input_is_not_found() {
        let mut events = Vec::new();
        let err = extract_tables(
            Path::new("definitely/not/here.pdf"),
            &ExtractOptions::default(),
            &mut events,
        )
        .expect_err("missing file should fail");
        assert!(matches!(err, ExtractError::NotFound { .. }));
        assert!(events.is_empty());
    }

    #[test]
    fn garbage_bytes_are_a_parse_failure() {
        let mut events = Vec::new();
        let err = extract_tables_from_bytes(b"not a pdf", &ExtractOptions::default(), &mut events)
            .expect_err("garbage should fail");
        assert!(matches!(err, ExtractError::Parse { .. }));
    }
}
