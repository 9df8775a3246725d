//! Display formatting for currency amounts and dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an amount with its currency symbol and two decimals.
///
/// Known codes get their symbol (`$120.00`); unknown codes fall back to the
/// code itself with a separating space (`CHF 120.00`).
pub fn format_currency(amount: f64, currency: &str) -> String {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{a3}",
        "JPY" => "\u{a5}",
        other => return format!("{other} {amount:.2}"),
    };
    format!("{symbol}{amount:.2}")
}

/// Render an ISO date or RFC 3339 timestamp as `"Jan 2, 2026"`.
///
/// Returns `None` for unparseable input rather than inventing a date.
pub fn format_date(value: &str) -> Option<String> {
    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        dt.date_naive()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        dt.date()
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?
    };
    Some(date.format("%b %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_symbols_and_fallback() {
        assert_eq!(format_currency(1200.5, "USD"), "$1200.50");
        assert_eq!(format_currency(0.0, "EUR"), "\u{20ac}0.00");
        assert_eq!(format_currency(99.999, "GBP"), "\u{a3}100.00");
        assert_eq!(format_currency(42.0, "CHF"), "CHF 42.00");
    }

    #[test]
    fn dates_render_short_month() {
        assert_eq!(format_date("2026-08-29").as_deref(), Some("Aug 29, 2026"));
        assert_eq!(format_date("2026-01-02").as_deref(), Some("Jan 2, 2026"));
        assert_eq!(
            format_date("2026-03-05T10:30:00Z").as_deref(),
            Some("Mar 5, 2026")
        );
        assert_eq!(format_date("not a date"), None);
    }
}
