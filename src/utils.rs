//! Formatting helpers shared by the table and file renderers.

use rust_decimal::Decimal;

/// Render an optional value for a terminal table cell; missing prints a
/// dash. Trailing zeros are dropped (`10.50` renders as `10.5`).
pub fn format_cell(value: Option<Decimal>) -> String {
    match value {
        Some(v) => v.normalize().to_string(),
        None => "-".to_string(),
    }
}

/// Render an optional value for CSV output; missing is an empty field.
pub fn format_field(value: Option<Decimal>) -> String {
    match value {
        Some(v) => v.normalize().to_string(),
        None => String::new(),
    }
}
