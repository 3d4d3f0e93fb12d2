use crate::model::{AggregatedDataset, ExtractedTable};

/// Stacks every table's rows into one dataset, positionally.
///
/// Rows keep their cells exactly as extracted; no header alignment or
/// deduplication happens across tables. `None` when there is nothing to stack.
#[must_use]
pub fn concat_tables(tables: &[ExtractedTable]) -> Option<AggregatedDataset> {
    if tables.is_empty() {
        return None;
    }

    let rows = tables
        .iter()
        .flat_map(|table| table.rows.iter().cloned())
        .collect::<Vec<_>>();

    Some(AggregatedDataset {
        rows,
        table_count: tables.len(),
    })
}
