use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use pdfplumber::PdfError;
use thiserror::Error;

/// Failure while reading the input PDF or detecting its tables.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read PDF '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse PDF '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    #[error("failed to load page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: PdfError,
    },

    #[error("no pages available after applying selection")]
    NoPagesSelected,
}

impl ExtractError {
    pub(crate) fn from_read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Unreadable { path, source }
        }
    }
}

/// Failure while writing the aggregated CSV.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid utf-8 csv output: {0}")]
    Utf8(#[from] FromUtf8Error),
}
