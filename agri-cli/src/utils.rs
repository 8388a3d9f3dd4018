use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops commas used as thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Unlike [`parse_optional_decimal`], empty input is an error here.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    normalize_decimal_input(s).parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `None` for empty or whitespace-only input, or when parsing fails
/// (logs a warning on parse failure).
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        None
    } else {
        normalized.parse().map_or_else(
            |e| {
                tracing::warn!(input = %s, "invalid optional decimal: {}", e);
                None
            },
            Some,
        )
    }
}

/// Formats a whole number of kilograms with thousands separators,
/// e.g. `58500` as `"58,500"`.
pub fn format_kg(kg: Decimal) -> String {
    let text = kg.trunc().abs().to_string();
    let mut grouped = String::with_capacity(text.len() + text.len() / 3);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 && (text.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if kg.is_sign_negative() && !kg.trunc().is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}

/// Formats an optional [`Decimal`] for display, using "-" when `None`.
pub fn opt_decimal_display(d: &Option<Decimal>) -> String {
    d.as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
