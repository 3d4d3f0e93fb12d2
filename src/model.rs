use serde::Serialize;

use crate::event::ExtractEvent;

/// One table as returned by the detector, cells kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    pub page: usize,
    pub table_index: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ExtractedTable {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// All extracted rows stacked positionally, page order then table order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregatedDataset {
    pub rows: Vec<Vec<Option<String>>>,
    pub table_count: usize,
}

impl AggregatedDataset {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the dataset.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn head(&self, n: usize) -> &[Vec<Option<String>>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExtractionReport {
    pub pages_with_tables: usize,
    pub table_count: usize,
    pub row_count: usize,
    pub events: Vec<ExtractEvent>,
}
