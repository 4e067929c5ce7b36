//! Spending summary aggregation
//!
//! Turns a list of expenses into a total and per-category subtotals. Groups are
//! keyed by category id (the absent category is its own group) and appear in the
//! order they are first seen in the input. Names are resolved after grouping, so
//! a missing or unknown id is reported as "Uncategorized".

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CategoryTotal, DateWindow, Expense, SummaryReport, UNCATEGORIZED};

/// Summarize expenses inside `window`, naming groups through `category_names`
pub fn summarize(
    expenses: &[Expense],
    category_names: &HashMap<i64, String>,
    window: &DateWindow,
) -> Result<SummaryReport> {
    window.validate()?;

    let mut groups: Vec<(Option<i64>, Decimal)> = Vec::new();
    let mut positions: HashMap<Option<i64>, usize> = HashMap::new();
    let mut total = Decimal::ZERO;
    let mut included = 0usize;

    for expense in expenses {
        if !window.contains(expense.date) {
            continue;
        }

        if expense.amount < Decimal::ZERO {
            return Err(Error::InvalidRecord(format!(
                "expense {} has negative amount {}",
                expense.id, expense.amount
            )));
        }

        total = add_amount(total, expense)?;
        included += 1;

        let position = *positions.entry(expense.category_id).or_insert_with(|| {
            groups.push((expense.category_id, Decimal::ZERO));
            groups.len() - 1
        });
        let group = &mut groups[position];
        group.1 = add_amount(group.1, expense)?;
    }

    let by_category: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category_id, amount)| CategoryTotal {
            category: category_id
                .and_then(|id| category_names.get(&id))
                .cloned()
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            amount,
        })
        .collect();

    debug_assert_eq!(
        by_category.iter().map(|g| g.amount).sum::<Decimal>(),
        total,
        "group amounts must add up to the total"
    );

    debug!(
        included,
        groups = by_category.len(),
        total = %total,
        "Built spending summary"
    );

    Ok(SummaryReport { total, by_category })
}

fn add_amount(acc: Decimal, expense: &Expense) -> Result<Decimal> {
    acc.checked_add(expense.amount).ok_or_else(|| {
        Error::InvalidRecord(format!(
            "amount {} on expense {} overflows the report total",
            expense.amount, expense.id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(id: i64, amount: Decimal, on: &str, category_id: Option<i64>) -> Expense {
        Expense {
            id,
            amount,
            date: date(on),
            merchant: format!("merchant {}", id),
            note: None,
            category_id,
            category: None,
            created_at: Utc::now(),
        }
    }

    fn names() -> HashMap<i64, String> {
        HashMap::from([
            (1, "Restaurants".to_string()),
            (2, "Transport".to_string()),
            (3, "Groceries".to_string()),
        ])
    }

    #[test]
    fn test_empty_collection() {
        let report = summarize(&[], &names(), &DateWindow::all()).unwrap();
        assert_eq!(report, SummaryReport::empty());
        assert_eq!(report.total, Decimal::ZERO);
        assert!(report.by_category.is_empty());
    }

    #[test]
    fn test_groups_in_discovery_order() {
        let expenses = vec![
            expense(1, dec!(12.50), "2024-01-05", Some(1)),
            expense(2, dec!(40.00), "2024-01-10", Some(2)),
            expense(3, dec!(7.25), "2024-01-11", Some(1)),
        ];

        let report = summarize(&expenses, &names(), &DateWindow::all()).unwrap();

        assert_eq!(report.total, dec!(59.75));
        assert_eq!(
            report.by_category,
            vec![
                CategoryTotal {
                    category: "Restaurants".to_string(),
                    amount: dec!(19.75)
                },
                CategoryTotal {
                    category: "Transport".to_string(),
                    amount: dec!(40.00)
                },
            ]
        );
    }

    #[test]
    fn test_exact_decimal_sums() {
        // 0.1 + 0.2 drifts in binary floating point
        let expenses: Vec<Expense> = (0..10)
            .map(|i| expense(i, dec!(0.10), "2024-01-01", Some(3)))
            .chain(std::iter::once(expense(10, dec!(0.20), "2024-01-01", Some(3))))
            .collect();

        let report = summarize(&expenses, &names(), &DateWindow::all()).unwrap();
        assert_eq!(report.total, dec!(1.20));
        assert_eq!(report.by_category[0].amount, dec!(1.20));
    }

    #[test]
    fn test_uncategorized_and_unknown_ids() {
        let expenses = vec![
            expense(1, dec!(5.00), "2024-01-01", None),
            expense(2, dec!(3.00), "2024-01-02", Some(99)),
            expense(3, dec!(2.00), "2024-01-03", None),
        ];

        let report = summarize(&expenses, &names(), &DateWindow::all()).unwrap();

        assert_eq!(report.total, dec!(10.00));
        // Null and unknown ids are separate groups that share the label
        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.by_category[0].category, UNCATEGORIZED);
        assert_eq!(report.by_category[0].amount, dec!(7.00));
        assert_eq!(report.by_category[1].category, UNCATEGORIZED);
        assert_eq!(report.by_category[1].amount, dec!(3.00));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let expenses = vec![
            expense(1, dec!(1.00), "2024-01-04", Some(1)),
            expense(2, dec!(2.00), "2024-01-05", Some(1)),
            expense(3, dec!(4.00), "2024-01-10", Some(2)),
            expense(4, dec!(8.00), "2024-01-11", Some(2)),
        ];
        let window = DateWindow::new(Some(date("2024-01-05")), Some(date("2024-01-10")));

        let report = summarize(&expenses, &names(), &window).unwrap();

        assert_eq!(report.total, dec!(6.00));
        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.by_category[0].amount, dec!(2.00));
        assert_eq!(report.by_category[1].amount, dec!(4.00));
    }

    #[test]
    fn test_open_ended_windows() {
        let expenses = vec![
            expense(1, dec!(1.00), "2023-12-31", Some(1)),
            expense(2, dec!(2.00), "2024-06-01", Some(1)),
        ];

        let from_only = DateWindow::new(Some(date("2024-01-01")), None);
        assert_eq!(
            summarize(&expenses, &names(), &from_only).unwrap().total,
            dec!(2.00)
        );

        let to_only = DateWindow::new(None, Some(date("2024-01-01")));
        assert_eq!(
            summarize(&expenses, &names(), &to_only).unwrap().total,
            dec!(1.00)
        );
    }

    #[test]
    fn test_window_excluding_everything() {
        let expenses = vec![expense(1, dec!(1.00), "2024-01-01", Some(1))];
        let window = DateWindow::new(Some(date("2025-01-01")), None);

        let report = summarize(&expenses, &names(), &window).unwrap();
        assert_eq!(report, SummaryReport::empty());
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        let window = DateWindow::new(Some(date("2024-02-01")), Some(date("2024-01-01")));
        let result = summarize(&[], &names(), &window);
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_negative_amount_is_invalid_record() {
        let expenses = vec![
            expense(1, dec!(1.00), "2024-01-01", Some(1)),
            expense(2, dec!(-3.00), "2024-01-02", Some(1)),
        ];
        let result = summarize(&expenses, &names(), &DateWindow::all());
        assert!(matches!(result, Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_negative_amount_outside_window_is_ignored() {
        let expenses = vec![
            expense(1, dec!(1.00), "2024-01-01", Some(1)),
            expense(2, dec!(-3.00), "2023-01-02", Some(1)),
        ];
        let window = DateWindow::new(Some(date("2024-01-01")), None);
        let report = summarize(&expenses, &names(), &window).unwrap();
        assert_eq!(report.total, dec!(1.00));
    }

    #[test]
    fn test_zero_amounts_still_form_a_group() {
        let expenses = vec![expense(1, dec!(0), "2024-01-01", Some(2))];
        let report = summarize(&expenses, &names(), &DateWindow::all()).unwrap();
        assert_eq!(report.total, dec!(0));
        assert_eq!(report.by_category.len(), 1);
        assert_eq!(report.by_category[0].category, "Transport");
    }

    #[test]
    fn test_total_matches_group_sum() {
        let expenses: Vec<Expense> = (0..50)
            .map(|i| {
                let category = match i % 4 {
                    0 => None,
                    n => Some(n),
                };
                let amount = Decimal::new(i * 137 + 1, 2);
                let day = 1 + (i % 28) as u32;
                expense(i, amount, &format!("2024-03-{:02}", day), category)
            })
            .collect();

        let window = DateWindow::new(Some(date("2024-03-05")), Some(date("2024-03-20")));
        let report = summarize(&expenses, &names(), &window).unwrap();

        let expected: Decimal = expenses
            .iter()
            .filter(|e| window.contains(e.date))
            .map(|e| e.amount)
            .sum();
        let grouped: Decimal = report.by_category.iter().map(|g| g.amount).sum();

        assert_eq!(report.total, expected);
        assert_eq!(grouped, expected);
    }
}
