//! End-to-end properties of the report pipeline: aggregation, layout,
//! encoding and the CSV round trip.

use chrono::NaiveDate;
use proptest::prelude::*;

use fintrack::config::Settings;
use fintrack::export::{encode_pdf, export_document, parse_csv, transactions_csv_string, Snapshot};
use fintrack::models::{
    Budget, BudgetId, BudgetPeriod, BudgetStatus, Category, CategoryId, DateRange, EntryKind, Money,
    Transaction, TransactionId,
};
use fintrack::reports::document::TableBlock;
use fintrack::reports::{
    build_budget_report, build_report, compute_budget_progress, compute_category_breakdown, layout,
    PageItem, ReportInputs, Rgb, Section,
};
use fintrack::storage::{seed_demo_data, Storage};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
}

fn txn(id: u64, kind: EntryKind, cents: i64, category: u64, description: &str, day: u32) -> Transaction {
    Transaction::new(
        TransactionId::new(id),
        kind,
        Money::from_cents(cents),
        CategoryId::new(category),
        description,
        date(2024, 1, day),
    )
}

fn kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Expense), Just(EntryKind::Income)]
}

/// Cents, with zero drawn often enough to matter
fn cents_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![1 => Just(0i64), 4 => 0i64..100_000_000]
}

/// Transaction sets whose category ids run past the known categories
fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((kind_strategy(), cents_strategy(), 0u64..16, 1u32..=28), 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (kind, cents, category, day))| txn(i as u64 + 1, kind, cents, category, "generated", day))
            .collect()
    })
}

fn categories() -> Vec<Category> {
    (1..=10)
        .map(|i| Category::new(CategoryId::new(i), format!("Category {}", i), EntryKind::Expense, "#6b7280"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn breakdown_sums_to_total_expenses(transactions in transactions_strategy()) {
        let breakdown = compute_category_breakdown(&transactions, &categories());
        let total: Money = breakdown.iter().map(|b| b.amount).sum();
        let expected: Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
        prop_assert_eq!(total, expected);
    }

    #[test]
    fn breakdown_is_sorted_descending(transactions in transactions_strategy()) {
        let breakdown = compute_category_breakdown(&transactions, &categories());
        prop_assert!(breakdown.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    #[test]
    fn progress_percentage_is_clamped(limit in 1i64..1_000_000_000, spent in 0i64..10_000_000_000) {
        let budget = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(limit), BudgetPeriod::Monthly);
        let progress = compute_budget_progress(&BudgetStatus::new(budget, "Food", Money::from_cents(spent)));
        prop_assert!((0.0..=100.0).contains(&progress.percentage));
    }

    #[test]
    fn over_budget_is_strict(limit in 1i64..1_000_000_000, delta in -1_000i64..=1_000) {
        let spent = (limit + delta).max(0);
        let budget = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(limit), BudgetPeriod::Monthly);
        let progress = compute_budget_progress(&BudgetStatus::new(budget, "Food", Money::from_cents(spent)));
        prop_assert_eq!(progress.is_over_budget, spent > limit);
    }
}

#[test]
fn concrete_breakdown_scenario() {
    let categories = vec![
        Category::new(CategoryId::new(1), "Food", EntryKind::Expense, "#ef4444"),
        Category::new(CategoryId::new(2), "Transportation", EntryKind::Expense, "#3b82f6"),
        Category::new(CategoryId::new(8), "Salary", EntryKind::Income, "#22c55e"),
    ];
    let transactions = vec![
        txn(1, EntryKind::Expense, 15000, 1, "a", 1),
        txn(2, EntryKind::Income, 300000, 8, "b", 1),
        txn(3, EntryKind::Expense, 8550, 2, "c", 1),
    ];

    let breakdown = compute_category_breakdown(&transactions, &categories);
    let shown: Vec<(&str, i64, String)> = breakdown
        .iter()
        .map(|b| (b.category.as_str(), b.amount.cents(), format!("{:.1}", b.percentage)))
        .collect();
    assert_eq!(
        shown,
        vec![("Food", 15000, "63.7".to_string()), ("Transportation", 8550, "36.3".to_string())]
    );
}

#[test]
fn concrete_progress_scenario() {
    let budget = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(50000), BudgetPeriod::Monthly);

    let under = compute_budget_progress(&BudgetStatus::new(budget.clone(), "Food", Money::from_cents(45000)));
    assert_eq!(under.percentage, 90.0);
    assert!(!under.is_over_budget);

    let over = compute_budget_progress(&BudgetStatus::new(budget, "Food", Money::from_cents(60000)));
    assert_eq!(over.percentage, 100.0);
    assert!(over.is_over_budget);
}

#[test]
fn building_twice_gives_identical_sections() {
    let storage = Storage::in_memory();
    seed_demo_data(&storage).unwrap();
    let inputs = ReportInputs::fetch(&storage, january()).unwrap();
    let settings = Settings::default();

    let first = build_report(&inputs.transactions, &inputs.budgets, &inputs.categories, &inputs.range, &settings);
    let second = build_report(&inputs.transactions, &inputs.budgets, &inputs.categories, &inputs.range, &settings);
    assert_eq!(first.sections, second.sections);

    let first = build_budget_report(&inputs.budget_statuses(), &inputs.range, &settings);
    let second = build_budget_report(&inputs.budget_statuses(), &inputs.range, &settings);
    assert_eq!(first.sections, second.sections);
}

#[test]
fn long_breakdown_repeats_header_and_numbers_pages() {
    let categories: Vec<Category> = (1..=60)
        .map(|i| Category::new(CategoryId::new(i), format!("Cat-{:02}", i), EntryKind::Expense, "#6b7280"))
        .collect();
    let transactions: Vec<Transaction> = (1..=60)
        .map(|i| txn(i, EntryKind::Expense, 1000 * i as i64, i, "Purchase", 10))
        .collect();

    let mut settings = Settings::default();
    settings.report.breakdown_rows = 60;

    let doc = build_report(&transactions, &[], &categories, &january(), &settings);
    let paged = layout(&doc, &settings.report.page);
    let total = paged.page_count();
    assert!(total > 1);

    let is_breakdown_row = |item: &PageItem| {
        matches!(item, PageItem::Text { x, text, .. } if *x == 22.0 && text.starts_with("Cat-"))
    };

    let mut rows_seen = 0;
    for page in &paged.pages {
        let rows = page.items.iter().filter(|i| is_breakdown_row(i)).count();
        rows_seen += rows;

        if page.number > 1 && rows > 0 {
            assert!(matches!(page.items[0], PageItem::Rect { fill: Rgb::BLUE, .. }));
            let labels: Vec<&str> = page.texts().take(3).collect();
            assert_eq!(labels, vec!["Category", "Amount", "Percentage"]);
        }

        let footer = format!("Page {} of {}", page.number, total);
        assert!(page.texts().any(|t| t == footer), "missing footer on page {}", page.number);
    }
    assert_eq!(rows_seen, 60);

    let pdf = String::from_utf8(encode_pdf(&paged, doc.generated_at).unwrap()).unwrap();
    assert!(pdf.contains(&format!("/Count {}", total)));
    assert!(pdf.contains(&format!("(Page {} of {}) Tj", total, total)));
}

#[test]
fn csv_round_trip_preserves_rows_and_quotes() {
    let categories = vec![
        Category::new(CategoryId::new(1), "Food & Dining", EntryKind::Expense, "#ef4444"),
        Category::new(CategoryId::new(2), "Rent, Utilities", EntryKind::Expense, "#10b981"),
    ];
    let transactions = vec![
        txn(1, EntryKind::Expense, 15000, 1, "Dinner at \"Luigi's\"", 15),
        txn(2, EntryKind::Expense, 120000, 2, "January, rent", 1),
        txn(3, EntryKind::Income, 300000, 99, "Salary \"\" bonus", 2),
    ];

    let csv = transactions_csv_string(&transactions, &categories).unwrap();
    let rows = parse_csv(&csv).unwrap();

    let recovered: Vec<(NaiveDate, String, String, EntryKind, Money)> = rows
        .into_iter()
        .map(|r| (r.date, r.description, r.category, r.kind, r.amount))
        .collect();
    let expected = vec![
        (date(2024, 1, 15), "Dinner at \"Luigi's\"".to_string(), "Food & Dining".to_string(), EntryKind::Expense, Money::from_cents(15000)),
        (date(2024, 1, 1), "January, rent".to_string(), "Rent, Utilities".to_string(), EntryKind::Expense, Money::from_cents(120000)),
        (date(2024, 1, 2), "Salary \"\" bonus".to_string(), "Uncategorized".to_string(), EntryKind::Income, Money::from_cents(300000)),
    ];
    assert_eq!(recovered, expected);
}

#[test]
fn demo_data_renders_both_documents() {
    let storage = Storage::in_memory();
    seed_demo_data(&storage).unwrap();
    let inputs = ReportInputs::fetch(&storage, january()).unwrap();
    let settings = Settings::default();

    let financial = build_report(&inputs.transactions, &inputs.budgets, &inputs.categories, &inputs.range, &settings);
    let bytes = export_document(&financial, &settings.report.page).unwrap();
    let pdf = String::from_utf8(bytes).unwrap();
    assert!(pdf.starts_with("%PDF-1.4"));
    assert!(pdf.contains("(Financial Summary) Tj"));
    assert!(pdf.contains("(Generated by Personal Finance Tracker) Tj"));
    assert_eq!(financial.file_name(), "financial-report-2024-01-01-to-2024-01-31.pdf");

    let budget = build_budget_report(&inputs.budget_statuses(), &inputs.range, &settings);
    let pdf = String::from_utf8(export_document(&budget, &settings.report.page).unwrap()).unwrap();
    assert!(pdf.contains("(Budget Recommendations) Tj"));
    assert!(pdf.contains("(Budget Analysis Report - Personal Finance Tracker) Tj"));
    assert_eq!(budget.file_name(), "budget-analysis-2024-01-01-to-2024-01-31.pdf");
}

#[test]
fn weekly_budget_agrees_between_report_and_snapshot() {
    let storage = Storage::in_memory();
    storage
        .categories
        .upsert(Category::new(CategoryId::new(1), "Coffee", EntryKind::Expense, "#92400e"))
        .unwrap();
    storage
        .budgets
        .upsert(Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(10000), BudgetPeriod::Weekly))
        .unwrap();
    // $60 in each of five weeks; only the Jan 29 week is active on Jan 31
    for (i, day) in [3, 10, 17, 24, 30].into_iter().enumerate() {
        storage
            .transactions
            .upsert(txn(i as u64 + 1, EntryKind::Expense, 6000, 1, "Beans", day))
            .unwrap();
    }

    let inputs = ReportInputs::fetch(&storage, january()).unwrap();
    let statuses = inputs.budget_statuses();
    assert_eq!(statuses[0].spent, Money::from_cents(6000));
    assert!(!compute_budget_progress(&statuses[0]).is_over_budget);

    let settings = Settings::default();
    let doc = build_report(&inputs.transactions, &inputs.budgets, &inputs.categories, &inputs.range, &settings);
    let table: &TableBlock = match doc.section("Budget Performance") {
        Some(Section::Table(table)) => table,
        other => panic!("expected budget table, got {other:?}"),
    };
    assert_eq!(table.rows[0][1].text, "$60.00 / $100.00");

    let snapshot = Snapshot::from_source(&storage, date(2024, 1, 31)).unwrap();
    assert_eq!(snapshot.budgets[0].spent, Money::from_cents(6000));
}
