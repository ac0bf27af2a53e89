//! CSV export functionality
//!
//! Writes transactions as `Date,Description,Category,Type,Amount` and reads
//! that file back. Descriptions are always quoted; amounts are plain
//! decimals so the file stays machine-parseable.

use std::io::Write;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::display::format::{format_date_iso, format_plain_amount};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, EntryKind, Money, Transaction, UNCATEGORIZED};

pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

/// Write transactions as CSV, one row per transaction in input order
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    categories: &[Category],
    writer: &mut W,
) -> FinanceResult<()> {
    writeln!(writer, "{}", CSV_HEADER.join(",")).map_err(export_err)?;

    for txn in transactions {
        let category = categories
            .iter()
            .find(|c| c.id == txn.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED);

        writeln!(
            writer,
            "{},{},{},{},{}",
            format_date_iso(txn.transaction_date),
            quote(&txn.description),
            escape_csv(category),
            txn.kind,
            format_plain_amount(txn.amount),
        )
        .map_err(export_err)?;
    }

    tracing::debug!(rows = transactions.len(), "exported transactions csv");
    Ok(())
}

/// Render the CSV into a string
pub fn transactions_csv_string(transactions: &[Transaction], categories: &[Category]) -> FinanceResult<String> {
    let mut buffer = Vec::new();
    export_transactions_csv(transactions, categories, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| FinanceError::Export(e.to_string()))
}

/// One row of an exported transactions CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: EntryKind,
    pub amount: Money,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Read an exported transactions CSV back into rows
pub fn parse_csv(text: &str) -> FinanceResult<Vec<CsvRow>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::None)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(FinanceError::Csv(format!(
            "unexpected header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<RawRow>().enumerate() {
        let raw = record?;
        let line = index + 2;

        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
            .map_err(|e| FinanceError::Csv(format!("line {}: invalid date '{}': {}", line, raw.date, e)))?;
        let kind: EntryKind = raw
            .kind
            .parse()
            .map_err(|e| FinanceError::Csv(format!("line {}: {}", line, e)))?;
        let amount = Money::parse(&raw.amount)
            .map_err(|e| FinanceError::Csv(format!("line {}: {}", line, e)))?;

        rows.push(CsvRow {
            date,
            description: raw.description,
            category: raw.category,
            kind,
            amount,
        });
    }

    Ok(rows)
}

fn export_err(e: std::io::Error) -> FinanceError {
    FinanceError::Export(e.to_string())
}

/// Wrap in quotes, doubling any quote inside
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Quote only when the value needs it
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        quote(s)
    } else {
        s.to_string()
    }
}
