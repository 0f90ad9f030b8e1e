//! Form state for the entry and template editors.
//!
//! Validation runs locally and blocks submission without touching the
//! network; the error strings go straight to the user.

use api_types::{expense::ExpenseNew, predefined::PredefinedExpenseNew};
use chrono::NaiveDate;
use engine::{Category, Entry, EntryKind, Money, Month, Template};

use super::convert::kind_to_api;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Title,
    Amount,
    Category,
    Kind,
    Date,
}

/// Add/edit buffer for an expense record.
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    /// Index into [`Category::ALL`].
    pub category: usize,
    pub kind: EntryKind,
    pub date: String,
    pub focus: ExpenseField,
    /// Id of the record being edited; `None` for a new one.
    pub editing: Option<String>,
    predefined: bool,
}

impl ExpenseForm {
    /// Empty form defaulting to the first day of the selected month.
    pub fn for_month(month: Month) -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: 0,
            kind: EntryKind::Expense,
            date: month.date_on(1).format("%Y-%m-%d").to_string(),
            focus: ExpenseField::Title,
            editing: None,
            predefined: false,
        }
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            amount: format!("{:.2}", entry.amount.to_major()),
            category: category_index(entry.category),
            kind: entry.kind,
            date: entry.date.format("%Y-%m-%d").to_string(),
            focus: ExpenseField::Title,
            editing: Some(entry.id.clone()),
            predefined: entry.predefined,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ExpenseField::Title => ExpenseField::Amount,
            ExpenseField::Amount => ExpenseField::Category,
            ExpenseField::Category => ExpenseField::Kind,
            ExpenseField::Kind => ExpenseField::Date,
            ExpenseField::Date => ExpenseField::Title,
        };
    }

    /// Routes a typed character to the focused text field; selector fields
    /// cycle instead.
    pub fn input(&mut self, ch: char) {
        match self.focus {
            ExpenseField::Title => self.title.push(ch),
            ExpenseField::Amount => self.amount.push(ch),
            ExpenseField::Date => self.date.push(ch),
            ExpenseField::Category => {
                if ch == ' ' {
                    self.cycle_category(1);
                }
            }
            ExpenseField::Kind => {
                if ch == ' ' {
                    self.toggle_kind();
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            ExpenseField::Title => {
                self.title.pop();
            }
            ExpenseField::Amount => {
                self.amount.pop();
            }
            ExpenseField::Date => {
                self.date.pop();
            }
            ExpenseField::Category | ExpenseField::Kind => {}
        }
    }

    pub fn cycle_category(&mut self, step: i32) {
        let len = Category::ALL.len() as i32;
        self.category = ((self.category as i32 + step).rem_euclid(len)) as usize;
    }

    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            EntryKind::Expense => EntryKind::Income,
            EntryKind::Income => EntryKind::Expense,
        };
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.category % Category::ALL.len()]
    }

    /// Builds the request payload, or the message that blocks submission.
    pub fn validate(&self) -> Result<ExpenseNew, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        let amount: Money = self
            .amount
            .parse()
            .map_err(|_| "Invalid amount.".to_string())?;
        if !amount.is_positive() {
            return Err("Amount must be greater than zero.".to_string());
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Invalid date, expected YYYY-MM-DD.".to_string())?;

        Ok(ExpenseNew {
            title: title.to_string(),
            amount: amount.to_major(),
            category: self.selected_category().as_str().to_string(),
            kind: kind_to_api(self.kind),
            date,
            is_predefined: self.predefined,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateField {
    Title,
    Amount,
    Category,
    Kind,
    Day,
    Active,
    Description,
}

/// Add/edit buffer for a predefined-expense template.
#[derive(Debug, Clone)]
pub struct TemplateForm {
    pub title: String,
    pub amount: String,
    pub category: usize,
    pub kind: EntryKind,
    pub day: String,
    pub active: bool,
    pub description: String,
    pub focus: TemplateField,
    pub editing: Option<String>,
}

impl TemplateForm {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: 0,
            kind: EntryKind::Expense,
            day: "1".to_string(),
            active: true,
            description: String::new(),
            focus: TemplateField::Title,
            editing: None,
        }
    }

    pub fn from_template(template: &Template) -> Self {
        Self {
            title: template.title.clone(),
            amount: format!("{:.2}", template.amount.to_major()),
            category: category_index(template.category),
            kind: template.kind,
            day: template.day_of_month.to_string(),
            active: template.active,
            description: template.description.clone().unwrap_or_default(),
            focus: TemplateField::Title,
            editing: Some(template.id.clone()),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            TemplateField::Title => TemplateField::Amount,
            TemplateField::Amount => TemplateField::Category,
            TemplateField::Category => TemplateField::Kind,
            TemplateField::Kind => TemplateField::Day,
            TemplateField::Day => TemplateField::Active,
            TemplateField::Active => TemplateField::Description,
            TemplateField::Description => TemplateField::Title,
        };
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            TemplateField::Title => self.title.push(ch),
            TemplateField::Amount => self.amount.push(ch),
            TemplateField::Day => self.day.push(ch),
            TemplateField::Description => self.description.push(ch),
            TemplateField::Category => {
                if ch == ' ' {
                    self.cycle_category(1);
                }
            }
            TemplateField::Kind => {
                if ch == ' ' {
                    self.kind = match self.kind {
                        EntryKind::Expense => EntryKind::Income,
                        EntryKind::Income => EntryKind::Expense,
                    };
                }
            }
            TemplateField::Active => {
                if ch == ' ' {
                    self.active = !self.active;
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            TemplateField::Title => {
                self.title.pop();
            }
            TemplateField::Amount => {
                self.amount.pop();
            }
            TemplateField::Day => {
                self.day.pop();
            }
            TemplateField::Description => {
                self.description.pop();
            }
            TemplateField::Category | TemplateField::Kind | TemplateField::Active => {}
        }
    }

    pub fn cycle_category(&mut self, step: i32) {
        let len = Category::ALL.len() as i32;
        self.category = ((self.category as i32 + step).rem_euclid(len)) as usize;
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.category % Category::ALL.len()]
    }

    pub fn validate(&self) -> Result<PredefinedExpenseNew, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        let amount: Money = self
            .amount
            .parse()
            .map_err(|_| "Invalid amount.".to_string())?;
        if !amount.is_positive() {
            return Err("Amount must be greater than zero.".to_string());
        }
        let day: u32 = self
            .day
            .trim()
            .parse()
            .map_err(|_| "Invalid day of month.".to_string())?;
        if !(1..=31).contains(&day) {
            return Err("Day of month must be between 1 and 31.".to_string());
        }
        let description = self.description.trim();

        Ok(PredefinedExpenseNew {
            title: title.to_string(),
            amount: amount.to_major(),
            category: self.selected_category().as_str().to_string(),
            kind: kind_to_api(self.kind),
            day_of_month: day,
            is_active: self.active,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        })
    }
}

/// Parses the salary input; zero is allowed, negatives are not.
pub fn parse_salary(input: &str) -> Result<Money, String> {
    if input.trim().is_empty() {
        return Ok(Money::ZERO);
    }
    let amount: Money = input
        .parse()
        .map_err(|_| "Invalid salary amount.".to_string())?;
    if amount.is_negative() {
        return Err("Salary cannot be negative.".to_string());
    }
    Ok(amount)
}

fn category_index(category: Category) -> usize {
    Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> Month {
        "2026-08".parse().unwrap()
    }

    #[test]
    fn expense_form_defaults_to_first_of_month() {
        let form = ExpenseForm::for_month(month());
        assert_eq!(form.date, "2026-08-01");
        assert!(form.editing.is_none());
    }

    #[test]
    fn expense_form_requires_title_and_amount() {
        let mut form = ExpenseForm::for_month(month());
        assert!(form.validate().is_err());

        form.title = "Groceries".to_string();
        assert!(form.validate().is_err());

        form.amount = "0".to_string();
        assert!(form.validate().is_err());

        form.amount = "49.90".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.title, "Groceries");
        assert_eq!(payload.amount, 49.9);
        assert_eq!(payload.category, "Food");
    }

    #[test]
    fn expense_form_rejects_bad_date() {
        let mut form = ExpenseForm::for_month(month());
        form.title = "Groceries".to_string();
        form.amount = "10".to_string();
        form.date = "2026-08".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn category_cycling_wraps() {
        let mut form = ExpenseForm::for_month(month());
        form.cycle_category(-1);
        assert_eq!(form.selected_category(), Category::Other);
        form.cycle_category(1);
        assert_eq!(form.selected_category(), Category::Food);
    }

    #[test]
    fn template_form_validates_day_range() {
        let mut form = TemplateForm::new();
        form.title = "Rent".to_string();
        form.amount = "800".to_string();

        form.day = "0".to_string();
        assert!(form.validate().is_err());
        form.day = "32".to_string();
        assert!(form.validate().is_err());

        form.day = "31".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.day_of_month, 31);
        assert!(payload.is_active);
        assert!(payload.description.is_none());
    }

    #[test]
    fn salary_parsing() {
        assert_eq!(parse_salary(""), Ok(Money::ZERO));
        assert_eq!(parse_salary("1000"), Ok(Money::new(1000_00)));
        assert_eq!(parse_salary("0"), Ok(Money::ZERO));
        assert!(parse_salary("-5").is_err());
        assert!(parse_salary("abc").is_err());
    }
}
