//! Transaction display formatting
//!
//! Ledger table and detail view for the terminal.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, EntryKind, Transaction, UNCATEGORIZED};
use crate::storage::Page;

use super::format::{ellipsize, format_currency, format_date_iso, format_signed};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn category_name(categories: &[Category], txn: &Transaction) -> String {
    categories
        .iter()
        .find(|c| c.id == txn.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Format one page of transactions as a table with a pagination footer
pub fn format_transaction_table(page: &Page<Transaction>, categories: &[Category], symbol: &str) -> String {
    if page.data.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = page
        .data
        .iter()
        .map(|txn| TransactionRow {
            id: txn.id.to_string(),
            date: format_date_iso(txn.transaction_date),
            description: ellipsize(&txn.description, 30),
            category: category_name(categories, txn),
            amount: format_signed(txn.amount, txn.kind == EntryKind::Income, symbol),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string();

    format!(
        "{}\nShowing {} to {} of {} transactions (page {} of {})\n",
        table, page.from, page.to, page.total, page.current_page, page.last_page
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, categories: &[Category], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", format_date_iso(txn.transaction_date)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", format_currency(txn.amount, symbol)));
    output.push_str(&format!("Category:    {}\n", category_name(categories, txn)));
    output.push_str(&format!("Description: {}\n", txn.description));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, TransactionId};
    use chrono::NaiveDate;

    fn txn(id: u64, kind: EntryKind, cents: i64, category: u64) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            kind,
            Money::from_cents(cents),
            CategoryId::new(category),
            "Grocery shopping",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_table_shows_signed_amounts_and_categories() {
        let categories = vec![Category::new(CategoryId::new(1), "Food & Dining", EntryKind::Expense, "#ef4444")];
        let page = Page::single(vec![txn(1, EntryKind::Expense, 15000, 1), txn(2, EntryKind::Income, 300000, 42)]);

        let output = format_transaction_table(&page, &categories, "$");
        assert!(output.contains("-$150.00"));
        assert!(output.contains("+$3,000.00"));
        assert!(output.contains("Food & Dining"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Showing 1 to 2 of 2 transactions (page 1 of 1)"));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<Transaction> = Page::single(Vec::new());
        assert_eq!(format_transaction_table(&page, &[], "$"), "No transactions found.\n");
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&txn(7, EntryKind::Expense, 8550, 1), &[], "$");
        assert!(output.contains("Amount:      $85.50"));
        assert!(output.contains("Type:        expense"));
    }
}
