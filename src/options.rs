use std::ops::RangeInclusive;
use std::str::FromStr;

use pdfplumber::{Strategy, TableSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStrategy {
    /// Ruling lines and rect edges.
    #[default]
    Lattice,
    /// Ruling lines only.
    LatticeStrict,
    /// Text alignment, no borders required.
    Stream,
}

/// 1-based set of pages to extract from, kept as the ranges it was written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    ranges: Vec<RangeInclusive<usize>>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: usize) -> bool {
        self.ranges.iter().any(|range| range.contains(&page))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((start, end)) = token.split_once('-') {
                let start: usize = start
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid page range start: '{start}'"))?;
                let end: usize = end
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid page range end: '{end}'"))?;
                if start == 0 || end == 0 {
                    return Err("pages are 1-based".to_string());
                }
                if end < start {
                    return Err(format!(
                        "invalid range '{token}': end is smaller than start"
                    ));
                }
                ranges.push(start..=end);
            } else {
                let page: usize = token
                    .parse()
                    .map_err(|_| format!("invalid page number: '{token}'"))?;
                if page == 0 {
                    return Err("pages are 1-based".to_string());
                }
                ranges.push(page..=page);
            }
        }

        if ranges.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self { ranges })
    }
}

/// Knobs handed through to the table detector.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub strategy: TableStrategy,
    pub snap_tolerance: f64,
    pub join_tolerance: f64,
    pub text_tolerance: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            strategy: TableStrategy::Lattice,
            snap_tolerance: 3.0,
            join_tolerance: 3.0,
            text_tolerance: 3.0,
        }
    }
}

impl TableOptions {
    #[must_use]
    pub fn to_settings(&self) -> TableSettings {
        let strategy = match self.strategy {
            TableStrategy::Lattice => Strategy::Lattice,
            TableStrategy::LatticeStrict => Strategy::LatticeStrict,
            TableStrategy::Stream => Strategy::Stream,
        };

        TableSettings {
            strategy,
            snap_tolerance: self.snap_tolerance,
            snap_x_tolerance: self.snap_tolerance,
            snap_y_tolerance: self.snap_tolerance,
            join_tolerance: self.join_tolerance,
            join_x_tolerance: self.join_tolerance,
            join_y_tolerance: self.join_tolerance,
            text_tolerance: self.text_tolerance,
            text_x_tolerance: self.text_tolerance,
            text_y_tolerance: self.text_tolerance,
            ..TableSettings::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    pub table: TableOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub delimiter: u8,
    /// Emit a `0,1,...` header naming columns by position.
    pub index_header: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            index_header: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub extract: ExtractOptions,
    pub output: OutputOptions,
    /// Number of leading rows logged once extraction succeeds.
    pub preview_rows: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            output: OutputOptions::default(),
            preview_rows: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageSelection, TableOptions, TableStrategy};
    use pdfplumber::Strategy;
    use std::str::FromStr;

    #[test]
    fn parse_page_selection_range_and_single() {
        let selection = PageSelection::from_str("1-3,5").expect("selection should parse");
        assert!(selection.contains(1));
        assert!(selection.contains(2));
        assert!(selection.contains(3));
        assert!(selection.contains(5));
        assert!(!selection.contains(4));
    }

    #[test]
    fn reject_invalid_page_selection() {
        let err = PageSelection::from_str("3-1").expect_err("invalid range should fail");
        assert!(err.contains("invalid range"));
    }

    #[test]
    fn open_ended_range_parses_without_expanding() {
        let selection = PageSelection::from_str(&format!("2-{}", usize::MAX))
            .expect("huge range should parse");
        assert!(!selection.contains(1));
        assert!(selection.contains(2));
        assert!(selection.contains(usize::MAX));
        assert!(!selection.is_empty());
    }

    #[test]
    fn reject_zero_and_empty_page_selection() {
        let err = PageSelection::from_str("0").expect_err("page zero should fail");
        assert!(err.contains("1-based"));
        let err = PageSelection::from_str(" , ").expect_err("empty selection should fail");
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn table_options_fan_out_tolerances() {
        let options = TableOptions {
            strategy: TableStrategy::Stream,
            snap_tolerance: 1.5,
            join_tolerance: 2.5,
            text_tolerance: 4.0,
        };
        let settings = options.to_settings();
        assert_eq!(settings.strategy, Strategy::Stream);
        assert_eq!(settings.snap_x_tolerance, 1.5);
        assert_eq!(settings.join_y_tolerance, 2.5);
        assert_eq!(settings.text_x_tolerance, 4.0);
    }
}
