//! Monthly aggregation over a month-scoped entry list.
//!
//! Everything here is recomputed from scratch on every call; nothing is
//! cached across scopes.

use crate::{Category, Entry, EntryKind, Money};

/// One category's slice of the month's expenses.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Money,
    /// Share of the expense total, rounded to one decimal.
    pub percent: f64,
}

/// Derived totals for one month. Never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonthlySummary {
    pub salary: Money,
    /// Sum of income entries, salary excluded.
    pub income_total: Money,
    pub expense_total: Money,
    /// Salary + recorded income.
    pub combined_income: Money,
    /// Combined income minus expense total.
    pub balance: Money,
    /// Category breakdown, descending by amount, ties in first-encountered
    /// order. Empty when the expense total is zero.
    pub breakdown: Vec<CategoryShare>,
}

/// Computes the monthly summary for a month-scoped entry list and the
/// month's salary.
#[must_use]
pub fn summarize(entries: &[Entry], salary: Money) -> MonthlySummary {
    let mut income_total = Money::ZERO;
    let mut expense_total = Money::ZERO;
    // Vec keeps first-encountered order, which decides ties in the sorted
    // breakdown.
    let mut by_category: Vec<(Category, Money)> = Vec::new();

    for entry in entries {
        match entry.kind {
            EntryKind::Income => income_total += entry.amount,
            EntryKind::Expense => {
                expense_total += entry.amount;
                match by_category.iter_mut().find(|(c, _)| *c == entry.category) {
                    Some((_, amount)) => *amount += entry.amount,
                    None => by_category.push((entry.category, entry.amount)),
                }
            }
        }
    }

    let breakdown = if expense_total.is_zero() {
        Vec::new()
    } else {
        // Stable sort: equal amounts keep first-encountered order.
        by_category.sort_by(|a, b| b.1.cmp(&a.1));
        by_category
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percent: percent_of(amount, expense_total),
            })
            .collect()
    };

    let combined_income = salary + income_total;
    MonthlySummary {
        salary,
        income_total,
        expense_total,
        combined_income,
        balance: combined_income - expense_total,
        breakdown,
    }
}

/// `part / total * 100`, rounded to one decimal.
fn percent_of(part: Money, total: Money) -> f64 {
    let raw = part.cents() as f64 / total.cents() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn entry(amount: i64, kind: EntryKind, category: Category) -> Entry {
        Entry {
            id: format!("{kind:?}-{category:?}-{amount}"),
            title: "test".to_string(),
            amount: Money::new(amount),
            category,
            kind,
            date: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
            predefined: false,
        }
    }

    #[test]
    fn worked_example() {
        let entries = [
            entry(100_00, EntryKind::Expense, Category::Food),
            entry(50_00, EntryKind::Expense, Category::Food),
            entry(200_00, EntryKind::Income, Category::Other),
        ];
        let summary = summarize(&entries, Money::new(1000_00));

        assert_eq!(summary.expense_total, Money::new(150_00));
        assert_eq!(summary.income_total, Money::new(200_00));
        assert_eq!(summary.combined_income, Money::new(1200_00));
        assert_eq!(summary.balance, Money::new(1050_00));
        assert_eq!(summary.breakdown.len(), 1);
        assert_eq!(summary.breakdown[0].category, Category::Food);
        assert_eq!(summary.breakdown[0].amount, Money::new(150_00));
        assert_eq!(summary.breakdown[0].percent, 100.0);
    }

    #[test]
    fn balance_definition_is_consistent() {
        let entries = [
            entry(37_50, EntryKind::Expense, Category::Bills),
            entry(12_34, EntryKind::Income, Category::Other),
            entry(99_99, EntryKind::Expense, Category::Transport),
        ];
        let salary = Money::new(2500_00);
        let summary = summarize(&entries, salary);

        assert_eq!(
            summary.income_total - summary.expense_total,
            summary.balance - salary
        );
    }

    #[test]
    fn breakdown_sorted_descending_with_stable_ties() {
        let entries = [
            entry(20_00, EntryKind::Expense, Category::Transport),
            entry(50_00, EntryKind::Expense, Category::Food),
            entry(20_00, EntryKind::Expense, Category::Bills),
        ];
        let summary = summarize(&entries, Money::ZERO);

        let order: Vec<Category> = summary.breakdown.iter().map(|s| s.category).collect();
        // Transport and Bills tie at 20; Transport was encountered first.
        assert_eq!(
            order,
            [Category::Food, Category::Transport, Category::Bills]
        );
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let entries = [
            entry(33_33, EntryKind::Expense, Category::Food),
            entry(33_33, EntryKind::Expense, Category::Rent),
            entry(33_34, EntryKind::Expense, Category::Loan),
        ];
        let summary = summarize(&entries, Money::ZERO);

        let total: f64 = summary.breakdown.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 0.2, "sum was {total}");
    }

    #[test]
    fn breakdown_empty_without_expenses() {
        let entries = [entry(500_00, EntryKind::Income, Category::Other)];
        let summary = summarize(&entries, Money::new(100_00));

        assert!(summary.breakdown.is_empty());
        assert_eq!(summary.expense_total, Money::ZERO);
        assert_eq!(summary.balance, Money::new(600_00));
    }

    #[test]
    fn empty_scope_is_all_zero() {
        let summary = summarize(&[], Money::ZERO);
        assert_eq!(summary, MonthlySummary::default());
    }
}
