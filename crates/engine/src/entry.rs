use chrono::NaiveDate;

use crate::{Category, Money, Month};

/// Direction of a ledger record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

/// A normalized expense/income record.
///
/// Built from the wire DTO at the client boundary: the id is already
/// canonical, the amount is integer cents and the category is the closed
/// enum.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    /// Magnitude in cents, always >= 0; the direction lives in `kind`.
    pub amount: Money,
    pub category: Category,
    pub kind: EntryKind,
    pub date: NaiveDate,
    /// Set on records materialized from a predefined template.
    pub predefined: bool,
}

impl Entry {
    /// The month this record belongs to, derived from its date.
    #[must_use]
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

/// A normalized predefined-expense template.
///
/// Not a ledger entry itself; applying it materializes dated [`Entry`]
/// records for a target month.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub amount: Money,
    pub category: Category,
    pub kind: EntryKind,
    /// 1-31, clamped into the target month on application.
    pub day_of_month: u32,
    pub active: bool,
    pub description: Option<String>,
}
