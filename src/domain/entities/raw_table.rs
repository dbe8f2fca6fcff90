/// An untyped tabular payload as returned by a provider: a header row and
/// string cells, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the first header equal to `name` after trimming, ignoring case.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_column_ignores_case_and_whitespace() {
        let table = RawTable::new(
            vec!["Company Name".into(), " Symbol ".into(), "Series".into()],
            vec![],
        );
        assert_eq!(table.find_column("SYMBOL"), Some(1));
        assert_eq!(table.find_column("isin"), None);
    }
}
