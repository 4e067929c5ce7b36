//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::{Datelike, NaiveDate};
use expense_core::models::{DateWindow, NewExpense};
use expense_core::{Database, RuleSet};
use rust_decimal_macros::dec;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_default_categories().unwrap();
    db
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn all_expenses(db: &Database) -> Vec<expense_core::Expense> {
    db.find_expenses_chronological(&DateWindow::all()).unwrap()
}

// ========== Init Command Tests ==========

#[test]
fn test_cmd_init_seeds_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.db");

    commands::cmd_init(&path).unwrap();
    // Running twice is harmless
    commands::cmd_init(&path).unwrap();

    let db = commands::open_db(&path).unwrap();
    assert_eq!(db.list_categories().unwrap().len(), 8);
}

#[test]
fn test_load_rules_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(
        &path,
        r#"
[[rules]]
category = "Coffee"
keywords = ["Starbucks", "espresso"]
"#,
    )
    .unwrap();

    let rules = commands::load_rules(Some(&path)).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules.classify("starbucks reserve"), "Coffee");
}

#[test]
fn test_load_rules_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::load_rules(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}

// ========== Add Command Tests ==========

#[test]
fn test_cmd_add_auto_categorizes() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    commands::cmd_add(
        &db,
        &rules,
        "12.50",
        "Starbucks",
        Some("2024-01-05"),
        None,
        None,
    )
    .unwrap();

    let expenses = all_expenses(&db);
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, dec!(12.50));
    assert_eq!(expenses[0].date, date("2024-01-05"));
    assert_eq!(expenses[0].category.as_deref(), Some("Restaurants"));
}

#[test]
fn test_cmd_add_explicit_category() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    commands::cmd_add(
        &db,
        &rules,
        "30",
        "Starbucks",
        Some("2024-01-05"),
        Some("gift card"),
        Some("Shopping"),
    )
    .unwrap();

    let expenses = all_expenses(&db);
    assert_eq!(expenses[0].category.as_deref(), Some("Shopping"));
    assert_eq!(expenses[0].note.as_deref(), Some("gift card"));
}

#[test]
fn test_cmd_add_unknown_category() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    let result = commands::cmd_add(
        &db,
        &rules,
        "30",
        "Starbucks",
        None,
        None,
        Some("Yachts"),
    );
    assert!(result.is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_cmd_add_defaults_to_today() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    commands::cmd_add(&db, &rules, "3.20", "Bus pass", None, None, None).unwrap();

    let expenses = all_expenses(&db);
    let today = chrono::Utc::now().date_naive();
    // Allow for the test straddling midnight
    assert!(expenses[0].date == today || expenses[0].date == today.pred_opt().unwrap());
    assert_eq!(expenses[0].category.as_deref(), Some("Transport"));
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    assert!(commands::cmd_add(&db, &rules, "abc", "Uber", None, None, None).is_err());
    assert!(commands::cmd_add(&db, &rules, "-4", "Uber", None, None, None).is_err());
    assert!(
        commands::cmd_add(&db, &rules, "4", "Uber", Some("01/05/2024"), None, None).is_err()
    );
    assert!(commands::cmd_add(&db, &rules, "4", "  ", None, None, None).is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

// ========== List / Delete Command Tests ==========

#[test]
fn test_cmd_list() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    assert!(commands::cmd_list(&db, None, None).is_ok());

    commands::cmd_add(&db, &rules, "9.99", "Netflix", Some("2024-01-15"), None, None).unwrap();
    assert!(commands::cmd_list(&db, Some("2024-01-01"), Some("2024-01-31")).is_ok());
    assert!(commands::cmd_list(&db, Some("2024-02-01"), Some("2024-01-01")).is_err());
    assert!(commands::cmd_list(&db, Some("yesterday"), None).is_err());
}

#[test]
fn test_cmd_delete() {
    let db = setup_test_db();
    let expense = db
        .create_expense(&NewExpense {
            amount: dec!(5),
            date: date("2024-01-01"),
            merchant: "Aldi".to_string(),
            note: None,
            category_id: None,
        })
        .unwrap();

    commands::cmd_delete(&db, expense.id).unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);

    assert!(commands::cmd_delete(&db, expense.id).is_err());
}

#[test]
fn test_cmd_backfill() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();
    db.create_expense(&NewExpense {
        amount: dec!(5),
        date: date("2024-01-01"),
        merchant: "Aldi".to_string(),
        note: None,
        category_id: None,
    })
    .unwrap();

    commands::cmd_backfill(&db, &rules).unwrap();

    let expenses = all_expenses(&db);
    assert_eq!(expenses[0].category.as_deref(), Some("Groceries"));

    // Second run has nothing to do
    commands::cmd_backfill(&db, &rules).unwrap();
}

// ========== Categories Command Tests ==========

#[test]
fn test_cmd_categories_list() {
    let db = setup_test_db();
    assert!(commands::cmd_categories_list(&db).is_ok());

    let empty = Database::in_memory().unwrap();
    assert!(commands::cmd_categories_list(&empty).is_ok());
}

#[test]
fn test_cmd_categories_add() {
    let db = setup_test_db();

    commands::cmd_categories_add(&db, "Gifts").unwrap();
    assert!(db.get_category_by_name("Gifts").unwrap().is_some());

    // Duplicate and blank names are rejected
    assert!(commands::cmd_categories_add(&db, "Gifts").is_err());
    assert!(commands::cmd_categories_add(&db, "").is_err());
}

#[test]
fn test_cmd_classify() {
    let rules = RuleSet::builtin();
    assert!(commands::cmd_classify(&rules, "Shell", Some("fuel")).is_ok());
    assert!(commands::cmd_classify(&rules, "Mystery Vendor", None).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    assert!(commands::cmd_report(&db, &DateWindow::all(), false).is_ok());

    commands::cmd_add(&db, &rules, "12.50", "Starbucks", Some("2024-01-05"), None, None).unwrap();
    commands::cmd_add(&db, &rules, "40.00", "Shell", Some("2024-01-10"), None, None).unwrap();

    assert!(commands::cmd_report(&db, &DateWindow::all(), false).is_ok());
    assert!(commands::cmd_report(&db, &DateWindow::all(), true).is_ok());

    let reversed = DateWindow::new(Some(date("2024-02-01")), Some(date("2024-01-01")));
    assert!(commands::cmd_report(&db, &reversed, false).is_err());
}

#[test]
fn test_cmd_report_huge_amount() {
    let db = setup_test_db();
    let rules = RuleSet::builtin();

    commands::cmd_add(
        &db,
        &rules,
        "1000000000000000000000000000",
        "Shell",
        Some("2024-01-05"),
        None,
        None,
    )
    .unwrap();

    assert!(commands::cmd_report(&db, &DateWindow::all(), false).is_ok());
    assert!(commands::cmd_report(&db, &DateWindow::all(), true).is_ok());
}

#[test]
fn test_share_of_total() {
    assert_eq!(commands::share_of_total(dec!(25), dec!(100)), Some(dec!(25)));
    assert_eq!(commands::share_of_total(dec!(0), dec!(0)), Some(dec!(0)));

    // amount * 100 doesn't fit, dividing first still gives the share
    let big = dec!(1000000000000000000000000000);
    assert_eq!(commands::share_of_total(big, big), Some(dec!(100)));
}

#[test]
fn test_resolve_period_custom_dates() {
    let window = commands::resolve_period("this-month", Some("2024-01-01"), Some("2024-01-31"))
        .unwrap();
    assert_eq!(window.from, Some(date("2024-01-01")));
    assert_eq!(window.to, Some(date("2024-01-31")));

    // One explicit bound leaves the other open
    let window = commands::resolve_period("all", Some("2024-03-01"), None).unwrap();
    assert_eq!(window.from, Some(date("2024-03-01")));
    assert_eq!(window.to, None);

    assert!(commands::resolve_period("all", Some("March"), None).is_err());
}

#[test]
fn test_resolve_preset() {
    let today = date("2024-03-15");

    let w = commands::resolve_preset("this-month", today).unwrap();
    assert_eq!(w.from, Some(date("2024-03-01")));
    assert_eq!(w.to, Some(today));

    let w = commands::resolve_preset("last-month", today).unwrap();
    assert_eq!(w.from, Some(date("2024-02-01")));
    assert_eq!(w.to, Some(date("2024-02-29")));

    let w = commands::resolve_preset("this-year", today).unwrap();
    assert_eq!(w.from, Some(date("2024-01-01")));

    let w = commands::resolve_preset("last-30-days", today).unwrap();
    assert_eq!(w.from, Some(date("2024-02-14")));

    let w = commands::resolve_preset("last-12-months", today).unwrap();
    assert_eq!(w.from, Some(date("2023-03-01")));

    let w = commands::resolve_preset("ALL", today).unwrap();
    assert!(w.is_unbounded());

    assert!(commands::resolve_preset("fortnight", today).is_err());
}

#[test]
fn test_resolve_preset_last_month_in_january() {
    let w = commands::resolve_preset("last-month", date("2024-01-20")).unwrap();
    assert_eq!(w.from, Some(date("2023-12-01")));
    assert_eq!(w.to, Some(date("2023-12-31")));

    let w = commands::resolve_preset("last-12-months", date("2024-01-20")).unwrap();
    assert_eq!(w.from.unwrap().year(), 2023);
    assert_eq!(w.from.unwrap().month(), 1);
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long merchant", 10), "this is...");
    assert_eq!(truncate("café crème brûlée", 8), "café ...");
}
