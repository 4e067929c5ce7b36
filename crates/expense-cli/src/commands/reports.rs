//! Report command implementations

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use expense_core::models::DateWindow;
use expense_core::Database;
use rust_decimal::Decimal;

use super::{parse_date_arg, truncate};

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("Invalid date {}-{:02}-{:02}", year, month, day))
}

/// Resolve a period preset, or explicit bounds, to a date window
///
/// `--from`/`--to` override the preset; giving only one leaves the other open.
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> Result<DateWindow> {
    if custom_from.is_some() || custom_to.is_some() {
        let from = custom_from
            .map(|d| parse_date_arg(d, "--from"))
            .transpose()?;
        let to = custom_to.map(|d| parse_date_arg(d, "--to")).transpose()?;
        return Ok(DateWindow::new(from, to));
    }

    let today = Utc::now().date_naive();
    resolve_preset(period, today)
}

/// Preset windows relative to `today`
pub fn resolve_preset(period: &str, today: NaiveDate) -> Result<DateWindow> {
    let (from, to) = match period.to_lowercase().as_str() {
        "this-month" => (ymd(today.year(), today.month(), 1)?, today),
        "last-month" => {
            let first_this_month = ymd(today.year(), today.month(), 1)?;
            let last_day = first_this_month
                .pred_opt()
                .context("No month before the current one")?;
            (ymd(last_day.year(), last_day.month(), 1)?, last_day)
        }
        "this-year" => (ymd(today.year(), 1, 1)?, today),
        "last-30-days" => (today - Duration::days(30), today),
        "last-90-days" => (today - Duration::days(90), today),
        "last-12-months" => {
            let from = if today.month() == 1 {
                ymd(today.year() - 1, 1, 1)?
            } else {
                ymd(today.year() - 1, today.month(), 1)?
            };
            (from, today)
        }
        "all" => return Ok(DateWindow::all()),
        _ => anyhow::bail!("Unknown period: {}. Available: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all", period),
    };

    Ok(DateWindow::new(Some(from), Some(to)))
}

fn describe_window(window: &DateWindow) -> String {
    match (window.from, window.to) {
        (None, None) => "all time".to_string(),
        (Some(from), None) => format!("{} onwards", from),
        (None, Some(to)) => format!("up to {}", to),
        (Some(from), Some(to)) => format!("{} to {}", from, to),
    }
}

pub fn cmd_report(db: &Database, window: &DateWindow, json: bool) -> Result<()> {
    let report = db.spending_summary(window)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Summary");
    println!("   Period: {}", describe_window(window));
    println!("   ─────────────────────────────────────────────");

    if report.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    println!("   Total: {:.2}", report.total);
    println!();
    println!("   {:25} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼────────────┼───────");

    for group in &report.by_category {
        let percentage = share_of_total(group.amount, report.total)
            .map(|p| format!("{:.1}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:25} │ {:>10} │ {:>5}%",
            truncate(&group.category, 25),
            format!("{:.2}", group.amount),
            percentage
        );
    }

    Ok(())
}

/// Percentage of `total` taken by `amount`, or `None` if it can't be represented
pub fn share_of_total(amount: Decimal, total: Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return Some(Decimal::ZERO);
    }
    let hundred = Decimal::from(100);
    // Near Decimal::MAX the multiply overflows, so divide first there
    amount
        .checked_mul(hundred)
        .and_then(|v| v.checked_div(total))
        .or_else(|| amount.checked_div(total).and_then(|r| r.checked_mul(hundred)))
}
