use super::model::CellValue;

/// Marker for "thousands" in listing quantities, e.g. `"5mil"` = 5000.
pub const THOUSANDS_MARKER: &str = "mil";

/// Normalize a raw "quantity sold" cell into a number.
///
/// Returns `None` when the cell cannot be read as a quantity.
pub fn normalize_quantity(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(v) if !v.is_finite() => None,
        CellValue::Number(v) => Some(*v),
        CellValue::Text(s) => parse_quantity(s),
        CellValue::Null => None,
    }
}

/// Parse quantity text such as `"200+"`, `"1.5mil"` or `"+5mil"`.
///
/// Trailing `+` signs are dropped, a `mil` marker multiplies by 1000 and the
/// rest must be a plain finite float. No locale handling: `"1,5"` does not parse.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let (text, scale) = if raw.contains(THOUSANDS_MARKER) {
        (raw.replace(THOUSANDS_MARKER, ""), 1000.0)
    } else {
        (raw.to_string(), 1.0)
    };

    let digits = text.trim().trim_end_matches('+').trim_end();
    let value = digits.parse::<f64>().ok()? * scale;
    value.is_finite().then_some(value)
}
