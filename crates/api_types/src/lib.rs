use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a ledger record.
///
/// Serialized as the wire's `type` field (`"expense"` / `"income"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl EntryKind {
    /// Returns the canonical wire string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

pub mod expense {
    use super::*;

    /// A persisted expense/income record as the backend returns it.
    ///
    /// Legacy deployments expose the identifier as `_id`; the alias folds
    /// both spellings into `id` so nothing past this boundary has to care.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Expense {
        #[serde(alias = "_id")]
        pub id: String,
        pub title: String,
        /// Decimal amount in major units, always >= 0.
        pub amount: f64,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: EntryKind,
        /// Calendar day (`YYYY-MM-DD`); the record's month is its prefix.
        pub date: NaiveDate,
        #[serde(default, rename = "isPredefined")]
        pub is_predefined: bool,
    }

    /// Request body for `POST /expenses` and `PUT /expenses/{id}`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        pub amount: f64,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: EntryKind,
        pub date: NaiveDate,
        #[serde(default, rename = "isPredefined")]
        pub is_predefined: bool,
    }
}

pub mod salary {
    use super::*;

    /// Salary for one month. At most one record per month exists; the
    /// backend answers 404 for months without one.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Salary {
        /// `YYYY-MM`.
        pub month: String,
        pub amount: f64,
    }
}

pub mod predefined {
    use super::*;

    /// A recurring expense template. Not a ledger entry itself; applying it
    /// materializes dated expense records.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredefinedExpense {
        #[serde(alias = "_id")]
        pub id: String,
        pub title: String,
        pub amount: f64,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: EntryKind,
        /// 1-31; clamped into the target month on application.
        pub day_of_month: u32,
        pub is_active: bool,
        #[serde(default)]
        pub description: Option<String>,
    }

    /// Request body for creating/updating a template.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredefinedExpenseNew {
        pub title: String,
        pub amount: f64,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: EntryKind,
        pub day_of_month: u32,
        pub is_active: bool,
        #[serde(default)]
        pub description: Option<String>,
    }

    /// Body for `POST /predefined-expenses/apply/{month}`.
    ///
    /// `predefined_expense_ids: None` means "all active templates".
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ApplyMonthRequest {
        pub predefined_expense_ids: Option<Vec<String>>,
        pub options: Option<ApplyOptions>,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ApplyOptions {
        /// Tags the materialized records as predefined-origin so the client
        /// can tell them apart from hand-entered ones.
        pub is_predefined: bool,
    }

    /// Response body: the records the backend created for the month.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ApplyMonthResponse {
        pub created: Vec<expense::Expense>,
    }
}
