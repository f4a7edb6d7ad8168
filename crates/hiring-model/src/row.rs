//! Raw spreadsheet rows as handed over by the upload step.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// Spreadsheet exports mix typed numbers and text in the same column, so
/// both are accepted and normalized on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Trimmed textual form of the cell; `None` for a null cell.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Bool(value) => Some(Cow::Owned(value.to_string())),
            Self::Number(value) => Some(Cow::Owned(value.to_string())),
            Self::Text(value) => Some(Cow::Borrowed(value.trim())),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One candidate row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(header, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(header.into(), value.into());
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    /// Trimmed text of a cell. Missing and null cells read as the empty string.
    pub fn text(&self, header: &str) -> Cow<'_, str> {
        self.get(header)
            .and_then(CellValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_trims_and_defaults_to_empty() {
        let row = Row::from_pairs([("지원분야", " 일반행정 ")]);
        assert_eq!(row.text("지원분야"), "일반행정");
        assert_eq!(row.text("missing"), "");
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(CellValue::Number(80.0).as_text().unwrap(), "80");
        assert_eq!(CellValue::Number(7.5).as_text().unwrap(), "7.5");
        assert!(CellValue::Null.as_text().is_none());
    }

    #[test]
    fn deserializes_mixed_cells() {
        let row: Row = serde_json::from_str(r#"{"a": 1.5, "b": "x", "c": null}"#).unwrap();
        assert_eq!(row.get("a"), Some(&CellValue::Number(1.5)));
        assert_eq!(row.get("b"), Some(&CellValue::Text("x".to_string())));
        assert_eq!(row.get("c"), Some(&CellValue::Null));
    }
}
