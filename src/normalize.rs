// Raw-text repair and tabular parsing.
//
// POS exports show up with mixed line endings and dangling separators left
// behind by a blank trailing column. All repairs happen on the raw text,
// before the csv reader ever sees it.
use csv::ReaderBuilder;

use crate::error::SummaryError;

/// Header row plus string cells, after text repair and placeholder-column
/// removal. Every row is padded to the header width.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Repair a raw export document and parse it into a [`NormalizedTable`].
pub fn parse_document(text: &str) -> Result<NormalizedTable, SummaryError> {
    let repaired = repair_text(text);
    if repaired.is_empty() {
        return Err(SummaryError::Parse("no columns to parse from input".to_string()));
    }
    read_table(&repaired)
}

/// Normalize line endings to LF and strip the dangling separators the export
/// leaves on each line: trailing commas first, surrounding whitespace second.
fn repair_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .trim()
        .split('\n')
        .map(|line| line.trim_end_matches(',').trim())
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_table(repaired: &str) -> Result<NormalizedTable, SummaryError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(repaired.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(SummaryError::Parse(format!(
                "expected {} fields on line {}, found {}",
                headers.len(),
                line,
                record.len()
            )));
        }
        let mut cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        // Short rows pad out to the header width with empty cells.
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(drop_placeholder_columns(headers, rows))
}

/// Drop columns whose header is blank or an `Unnamed` placeholder, together
/// with their cells. Spreadsheet tools emit these for stray trailing commas
/// in the header row.
fn drop_placeholder_columns(headers: Vec<String>, rows: Vec<Vec<String>>) -> NormalizedTable {
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let t = h.trim();
            !t.is_empty() && !t.starts_with("Unnamed")
        })
        .map(|(i, _)| i)
        .collect();

    if keep.len() == headers.len() {
        return NormalizedTable { headers, rows };
    }

    let headers: Vec<String> = keep.iter().map(|&i| headers[i].clone()).collect();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();
    NormalizedTable { headers, rows }
}
