//! Currency, date and percentage formatting
//!
//! Pure helpers shared by the terminal views, the report documents and the
//! CSV writer. Every monetary value is shown with exactly two decimals.

use chrono::NaiveDate;

use crate::models::{DateRange, Money};

/// Symbol + thousands separators + 2 decimals: `$1,234.50`, `-$85.50`
pub fn format_currency(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Machine-readable amount with no symbol or grouping: `1234.50`
pub fn format_plain_amount(amount: Money) -> String {
    amount.to_plain_string()
}

/// Signed amount as shown in ledgers: `+$3,000.00` for income, `-$85.50`
/// for expenses
pub fn format_signed(amount: Money, income: bool, symbol: &str) -> String {
    let sign = if income { '+' } else { '-' };
    format!("{}{}", sign, amount.abs().format_with_symbol(symbol))
}

/// `2024-01-15`
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `January 15, 2024`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Jan 15, 2024`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `01/15/2024`
pub fn format_date_us(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// `Jan 1, 2024 - Jan 31, 2024`
pub fn format_period(range: &DateRange) -> String {
    format!("{} - {}", format_date_short(range.from), format_date_short(range.to))
}

/// One decimal place plus a percent sign: `63.7%`
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Truncate to at most `max_chars` characters
pub fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Truncate with a trailing ellipsis when the text does not fit
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        format!("{}...", truncate(s, max_chars - 3))
    }
}

/// Text progress bar, `value` clamped to `[0, 100]`
pub fn format_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
