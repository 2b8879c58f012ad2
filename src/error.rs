use thiserror::Error;

/// Failures raised while turning a raw sales export into a summary.
///
/// Every variant is fatal to the current run: nothing downstream of the
/// resolver produces errors, so a caller that gets past parsing always gets a
/// complete summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Input is not parseable as delimited tabular text.
    #[error("could not parse CSV input: {0}")]
    Parse(String),

    /// Header set matches neither supported export format.
    #[error("CSV format not recognized. Available columns: {0:?}")]
    UnrecognizedFormat(Vec<String>),

    /// Legacy format detected but one or more required columns are absent.
    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    /// A non-empty legacy `date` cell matched no supported date format.
    #[error("could not parse date value {0:?} in date column")]
    DateParse(String),

    /// Revenue format detected but no row carries an item name.
    #[error("No item data found in CSV. Make sure the CSV contains rows with Item Name values.")]
    EmptyDataset,
}

impl From<csv::Error> for SummaryError {
    fn from(err: csv::Error) -> Self {
        SummaryError::Parse(err.to_string())
    }
}
