//! Chart series derived from a month-scoped entry list.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::{Category, Entry, EntryKind, Money};

/// Income and expense sums for one day of the month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub day: u32,
    pub income: Money,
    pub expense: Money,
}

/// Per-day accumulation of income and expense sums, sorted ascending by day.
///
/// Days without records are absent; no day appears twice.
#[must_use]
pub fn daily_series(entries: &[Entry]) -> Vec<DayTotals> {
    let mut days: BTreeMap<u32, DayTotals> = BTreeMap::new();

    for entry in entries {
        let day = entry.date.day();
        let totals = days.entry(day).or_insert(DayTotals {
            day,
            income: Money::ZERO,
            expense: Money::ZERO,
        });
        match entry.kind {
            EntryKind::Income => totals.income += entry.amount,
            EntryKind::Expense => totals.expense += entry.amount,
        }
    }

    days.into_values().collect()
}

/// Expense-only sums per category, filtered to positive amounts.
///
/// Order is irrelevant to the data; rendering assigns colors by position in
/// a fixed palette cycled by index.
#[must_use]
pub fn pie_series(entries: &[Entry]) -> Vec<(Category, Money)> {
    let mut slices: Vec<(Category, Money)> = Vec::new();

    for entry in entries {
        if entry.kind != EntryKind::Expense {
            continue;
        }
        match slices.iter_mut().find(|(c, _)| *c == entry.category) {
            Some((_, amount)) => *amount += entry.amount,
            None => slices.push((entry.category, entry.amount)),
        }
    }

    slices.retain(|(_, amount)| amount.is_positive());
    slices
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn entry(day: u32, amount: i64, kind: EntryKind, category: Category) -> Entry {
        Entry {
            id: format!("{day}-{amount}"),
            title: "test".to_string(),
            amount: Money::new(amount),
            category,
            kind,
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            predefined: false,
        }
    }

    #[test]
    fn daily_series_sorted_without_duplicates() {
        let entries = [
            entry(20, 10_00, EntryKind::Expense, Category::Food),
            entry(3, 5_00, EntryKind::Expense, Category::Food),
            entry(20, 7_00, EntryKind::Income, Category::Other),
            entry(11, 1_00, EntryKind::Expense, Category::Bills),
        ];
        let series = daily_series(&entries);

        let days: Vec<u32> = series.iter().map(|d| d.day).collect();
        assert_eq!(days, [3, 11, 20]);
        assert!(days.windows(2).all(|w| w[0] < w[1]));

        let day20 = series[2];
        assert_eq!(day20.income, Money::new(7_00));
        assert_eq!(day20.expense, Money::new(10_00));
    }

    #[test]
    fn daily_series_splits_income_and_expense() {
        let entries = [
            entry(5, 40_00, EntryKind::Income, Category::Other),
            entry(5, 15_00, EntryKind::Expense, Category::Rent),
        ];
        let series = daily_series(&entries);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].income, Money::new(40_00));
        assert_eq!(series[0].expense, Money::new(15_00));
    }

    #[test]
    fn pie_series_is_expense_only_and_positive() {
        let entries = [
            entry(1, 25_00, EntryKind::Expense, Category::Food),
            entry(2, 100_00, EntryKind::Income, Category::Food),
            entry(3, 0, EntryKind::Expense, Category::Bills),
            entry(4, 25_00, EntryKind::Expense, Category::Food),
        ];
        let slices = pie_series(&entries);

        assert_eq!(slices, [(Category::Food, Money::new(50_00))]);
    }
}
