use chrono::{Datelike, NaiveDate};

use engine::apply::{months_to_apply, plan_month};
use engine::charts::daily_series;
use engine::{Category, Entry, EntryKind, Money, Month, Template, summarize};

fn entry(id: &str, amount: i64, kind: EntryKind, category: Category, date: &str) -> Entry {
    Entry {
        id: id.to_string(),
        title: id.to_string(),
        amount: Money::new(amount),
        category,
        kind,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        predefined: false,
    }
}

fn template(id: &str, amount: i64, day_of_month: u32, active: bool) -> Template {
    Template {
        id: id.to_string(),
        title: id.to_string(),
        amount: Money::new(amount),
        category: Category::Bills,
        kind: EntryKind::Expense,
        day_of_month,
        active,
        description: None,
    }
}

#[test]
fn summary_and_series_agree_on_a_full_month() {
    let entries = vec![
        entry("rent", 800_00, EntryKind::Expense, Category::Rent, "2026-08-01"),
        entry("food1", 42_50, EntryKind::Expense, Category::Food, "2026-08-05"),
        entry("food2", 31_20, EntryKind::Expense, Category::Food, "2026-08-05"),
        entry("bonus", 150_00, EntryKind::Income, Category::Other, "2026-08-12"),
        entry("bus", 12_00, EntryKind::Expense, Category::Transport, "2026-08-23"),
    ];
    let salary = Money::new(2500_00);
    let summary = summarize(&entries, salary);

    // The balance definition holds however the entries shake out.
    assert_eq!(
        summary.income_total - summary.expense_total,
        summary.balance - salary
    );

    // The daily series accounts for every cent the summary saw.
    let series = daily_series(&entries);
    let series_expense: Money = series
        .iter()
        .fold(Money::ZERO, |acc, day| acc + day.expense);
    let series_income: Money = series.iter().fold(Money::ZERO, |acc, day| acc + day.income);
    assert_eq!(series_expense, summary.expense_total);
    assert_eq!(series_income, summary.income_total);

    // Days come out strictly ascending.
    assert!(series.windows(2).all(|pair| pair[0].day < pair[1].day));

    // Rent dominates the breakdown.
    assert_eq!(summary.breakdown[0].category, Category::Rent);
    let percent_total: f64 = summary.breakdown.iter().map(|share| share.percent).sum();
    assert!((percent_total - 100.0).abs() < 0.2);
}

#[test]
fn applying_across_a_range_lands_inside_every_month() {
    let templates = vec![
        template("rent", 800_00, 1, true),
        template("insurance", 55_00, 31, true),
        template("paused", 10_00, 15, false),
    ];

    let start: Month = "2026-01".parse().unwrap();
    let months = months_to_apply(start, Some("2026-12".parse().unwrap()));
    assert_eq!(months.len(), 12);

    for month in months {
        let planned = plan_month(&templates, None, month);
        // Two active templates, the paused one always skipped.
        assert_eq!(planned.len(), 2);
        for record in &planned {
            assert_eq!(Month::of(record.date), month);
            assert!(record.date.day() <= month.days());
        }
    }
}
