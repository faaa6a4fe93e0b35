//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Create a simple table from rows of strings
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());

        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();

        table.with(Style::rounded());

        // Right-align the index column
        table.with(Modify::new(Columns::first()).with(Alignment::right()));

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_from_rows() {
        let config = OutputConfig {
            format: OutputFormat::Table,
            no_truncate: true,
        };
        let rows = vec![
            vec!["1".to_string(), "The Weekly Byte".to_string()],
            vec!["2".to_string(), "Rust & Rails".to_string()],
        ];
        let table = TableOutput::from_rows(&["#", "Title"], &rows, &config);

        assert!(table.contains("Title"));
        assert!(table.contains("The Weekly Byte"));
        assert!(table.contains("Rust & Rails"));
    }

    #[test]
    fn test_from_rows_empty() {
        let config = OutputConfig {
            format: OutputFormat::Table,
            no_truncate: true,
        };
        assert_eq!(TableOutput::from_rows(&["#"], &[], &config), "(no results)");
    }
}
