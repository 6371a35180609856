//! Case-insensitive text filter over rendered rows.

use stocktrack_stock::StockRow;

/// True when every whitespace-separated term of `query` occurs in the
/// row's identity fields. An empty query matches everything.
pub fn matches(row: &StockRow, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let haystack = [
        row.key.donanim_tipi.as_str(),
        row.key.marka.as_deref().unwrap_or(""),
        row.key.model.as_deref().unwrap_or(""),
        row.key.ifs_no.as_deref().unwrap_or(""),
        row.key.kind().label(),
    ]
    .join(" ")
    .to_lowercase();
    query.split_whitespace().all(|term| haystack.contains(term))
}

pub fn filter_rows<'a>(rows: &'a [StockRow], query: &str) -> Vec<&'a StockRow> {
    rows.iter().filter(|row| matches(row, query)).collect()
}
