//! Numeric coercion for evaluation cells.
//!
//! Policy:
//! - null, missing and blank cells are not numeric
//! - comma grouping separators are stripped ("1,234.5")
//! - the rest must parse as a decimal number
//! - non-finite results ("NaN", "inf") are not numeric

use hiring_model::CellValue;

/// Coerce a text value to a finite number.
pub fn parse_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Coerce a cell to a finite number.
pub fn coerce_score(cell: Option<&CellValue>) -> Option<f64> {
    match cell? {
        CellValue::Null | CellValue::Bool(_) => None,
        CellValue::Number(number) => Some(*number).filter(|number| number.is_finite()),
        CellValue::Text(text) => parse_score(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_score("80"), Some(80.0));
        assert_eq!(parse_score("-4.5"), Some(-4.5));
        assert_eq!(parse_score("  12  "), Some(12.0));
        assert_eq!(parse_score("1e2"), Some(100.0));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(parse_score("1,234"), Some(1234.0));
        assert_eq!(parse_score("1,234.5"), Some(1234.5));
    }

    #[test]
    fn test_not_numeric() {
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("   "), None);
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("80점"), None);
        assert_eq!(parse_score("NaN"), None);
        assert_eq!(parse_score("inf"), None);
    }

    #[test]
    fn test_cells() {
        assert_eq!(coerce_score(None), None);
        assert_eq!(coerce_score(Some(&CellValue::Null)), None);
        assert_eq!(coerce_score(Some(&CellValue::Bool(true))), None);
        assert_eq!(coerce_score(Some(&CellValue::Number(7.0))), Some(7.0));
        assert_eq!(coerce_score(Some(&CellValue::Number(f64::NAN))), None);
        assert_eq!(coerce_score(Some(&CellValue::from("9,000"))), Some(9000.0));
    }
}
