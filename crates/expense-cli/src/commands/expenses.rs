//! Expense command implementations

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use expense_core::models::{DateWindow, NewExpense};
use expense_core::{Categorizer, Database, RuleSet};
use rust_decimal::Decimal;

use super::truncate;

/// Parse a YYYY-MM-DD argument, naming the flag in the error
pub fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date '{}' (use YYYY-MM-DD)", flag, value))
}

pub fn cmd_add(
    db: &Database,
    rules: &RuleSet,
    amount: &str,
    merchant: &str,
    date: Option<&str>,
    note: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("Invalid amount '{}'", amount))?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Amount must not be negative");
    }

    let date = match date {
        Some(d) => parse_date_arg(d, "--date")?,
        None => Utc::now().date_naive(),
    };

    let category_id = match category {
        Some(name) => {
            let category = db.get_category_by_name(name)?.ok_or_else(|| {
                anyhow::anyhow!(
                    "Category '{}' not found. Create it with: expense categories add \"{}\"",
                    name,
                    name
                )
            })?;
            Some(category.id)
        }
        None => None,
    };

    let new = NewExpense {
        amount,
        date,
        merchant: merchant.trim().to_string(),
        note: note.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string),
        category_id,
    };

    let expense = Categorizer::new(db, rules).record_expense(new)?;

    println!(
        "✅ Recorded #{}: {} {} at {} → {}",
        expense.id,
        expense.date,
        expense.amount,
        expense.merchant,
        expense.category.as_deref().unwrap_or("Uncategorized")
    );

    Ok(())
}

pub fn cmd_list(db: &Database, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let window = DateWindow::new(
        from.map(|d| parse_date_arg(d, "--from")).transpose()?,
        to.map(|d| parse_date_arg(d, "--to")).transpose()?,
    );
    let expenses = db.find_expenses_in_range(&window)?;

    if expenses.is_empty() {
        println!("No expenses found. Record one with:");
        println!("  expense add 12.50 Starbucks");
        return Ok(());
    }

    println!();
    println!("📝 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in expenses {
        println!(
            "   [{:>4}] {} │ {:>10} │ {:25} │ {}",
            expense.id,
            expense.date,
            format!("{:.2}", expense.amount),
            truncate(&expense.merchant, 25),
            expense.category.as_deref().unwrap_or("\x1b[2mUncategorized\x1b[0m")
        );
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    let expense = db
        .get_expense(id)?
        .ok_or_else(|| anyhow::anyhow!("Expense {} not found", id))?;

    db.delete_expense(id)?;

    println!(
        "🗑️  Deleted #{}: {} {} at {}",
        expense.id, expense.date, expense.amount, expense.merchant
    );
    Ok(())
}

pub fn cmd_backfill(db: &Database, rules: &RuleSet) -> Result<()> {
    println!("🏷️  Categorizing uncategorized expenses...");

    let result = Categorizer::new(db, rules).backfill_uncategorized()?;

    if result.expenses_processed == 0 {
        println!("✅ Nothing to do, every expense has a category.");
        return Ok(());
    }

    println!("   Processed: {}", result.expenses_processed);
    println!("   Categorized: {}", result.expenses_categorized);
    if result.fallback_to_other > 0 {
        println!("   Fell back to Other: {}", result.fallback_to_other);
    }
    println!("✅ Backfill complete");

    Ok(())
}
