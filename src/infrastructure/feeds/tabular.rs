use crate::domain::entities::raw_table::RawTable;
use crate::domain::error::DomainError;

/// Parse a CSV payload into a [`RawTable`]. Ragged rows are accepted as-is.
pub fn parse_csv_table(text: &str) -> Result<RawTable, DomainError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DomainError::Parse(format!("CSV header: {e}")))?
        .iter()
        .map(String::from)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DomainError::Parse("CSV payload has no header row".into()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DomainError::Parse(format!("CSV row: {e}")))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(RawTable::new(headers, rows))
}
