use crate::domain::report::{ReportRecord, SettlementReport};
use crate::error::Result;
use std::io::Read;

/// Cell prefix the gateway puts in front of every value.
const MARKER: char = '`';

/// Reads a settlement report from a CSV source.
///
/// The first line names the columns. The last two lines are the summary:
/// a title line followed by the totals. Every value cell is prefixed with a
/// backtick, which is stripped.
pub struct ReportReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ReportReader<R> {
    /// Creates a new `ReportReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(source);
        Self { reader }
    }

    /// Consumes the source and splits it into rows and summary.
    pub fn read(mut self) -> Result<SettlementReport> {
        let rows = self
            .reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_owned).collect::<Vec<_>>()))
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Ok(split_report(&rows))
    }
}

/// Parses report text held in memory.
pub fn parse_report(text: &str) -> Result<SettlementReport> {
    ReportReader::new(text.trim().as_bytes()).read()
}

fn split_report(rows: &[Vec<String>]) -> SettlementReport {
    let n = rows.len();
    if n < 2 {
        return SettlementReport::default();
    }

    let header = &rows[0];
    let list = if n > 2 {
        rows[1..n - 2]
            .iter()
            .map(|row| to_record(header, row))
            .collect()
    } else {
        Vec::new()
    };

    let summary_titles = &rows[n - 2];
    // a marked title line is really a data row; key the totals by the header
    let titles = if summary_titles.iter().any(|c| c.contains(MARKER)) {
        header
    } else {
        summary_titles
    };

    SettlementReport {
        list,
        summary: Some(to_record(titles, &rows[n - 1])),
    }
}

fn to_record(titles: &[String], cells: &[String]) -> ReportRecord {
    titles
        .iter()
        .zip(cells)
        .filter_map(|(title, cell)| strip_marker(cell).map(|v| (title.clone(), v.to_owned())))
        .collect()
}

/// Text after the leading marker, up to the next marker if any.
fn strip_marker(cell: &str) -> Option<&str> {
    cell.split(MARKER).nth(1)
}
