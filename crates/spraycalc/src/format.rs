/// Currency symbol used when the configuration does not name one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// `0.498 m²`
pub fn format_area(area_m2: f64) -> String {
    format!("{area_m2:.3} m²")
}

/// `£14.94`
pub fn format_price(currency_symbol: &str, price: f64) -> String {
    format!("{currency_symbol}{price:.2}")
}

/// Millimetre value without trailing zeros, e.g. `600` or `18.5`.
pub fn format_dimension(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
