//! Content fingerprint of a row table for staleness checks.

use sha2::{Digest, Sha256};

use crate::row_table::RowTable;

/// SHA-256 over the headers and every cell, hex encoded.
///
/// Row and header order both contribute, so reordering the export changes
/// the fingerprint.
pub fn fingerprint_rows(table: &RowTable) -> String {
    let mut hasher = Sha256::new();
    for header in &table.headers {
        hasher.update(header.as_bytes());
        hasher.update([0x1f]);
    }
    hasher.update([0x1e]);
    for row in &table.rows {
        for (header, cell) in row.cells() {
            hasher.update(header.as_bytes());
            hasher.update([0x1f]);
            if let Some(text) = cell.as_text() {
                hasher.update(text.as_bytes());
            }
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use hiring_model::Row;

    use super::*;

    fn table(score: &str) -> RowTable {
        RowTable {
            headers: vec!["a".into()],
            rows: vec![Row::from_pairs([("a", score)])],
            ..RowTable::default()
        }
    }

    #[test]
    fn stable_and_content_sensitive() {
        let first = fingerprint_rows(&table("1"));
        assert_eq!(first, fingerprint_rows(&table("1")));
        assert_ne!(first, fingerprint_rows(&table("2")));
        assert_eq!(first.len(), 64);
    }
}
