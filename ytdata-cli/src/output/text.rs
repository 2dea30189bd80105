//! Text output: tab-separated tables and colored summaries.

use ytdata_collect::{CollectionReport, CollectionStats};
use ytdata_core::Tabular;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Header line plus one tab-separated line per row, in column order.
    pub fn table<T: Tabular>(&self, rows: &[T]) -> String {
        let mut out = self.bold(&T::columns().join("\t"));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = row.row().iter().map(|c| clean_cell(c)).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    /// One-line account of a collection run.
    pub fn collection_summary(&self, report: &CollectionReport) -> String {
        let CollectionStats {
            videos_seen,
            property_errors,
            statistics_errors,
            transcript_errors,
        } = report.stats;

        let head = format!("Collected {} of {} videos", report.records.len(), videos_seen);
        if !report.has_errors() {
            return self.green(&head);
        }

        let errors = format!(
            "errors: properties {property_errors}, statistics {statistics_errors}, transcripts {transcript_errors}"
        );
        if report.records.is_empty() {
            format!("{} ({})", self.red(&head), errors)
        } else {
            format!("{} ({})", self.yellow(&head), errors)
        }
    }

    /// Keywords that matched no channel name.
    pub fn unmatched_keywords(&self, keywords: &[String]) -> Option<String> {
        if keywords.is_empty() {
            return None;
        }
        Some(self.yellow(&format!("No exact match for: {}", keywords.join(", "))))
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

/// Keeps a cell on one line and inside its column.
pub(crate) fn clean_cell(cell: &str) -> String {
    cell.chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}
