//! Wire DTO <-> domain conversions.
//!
//! All normalization happens here, at the client boundary: ids are already
//! canonical (serde folds `_id` into `id`), decimal amounts become integer
//! cents, and category labels collapse into the closed enum.

use api_types::expense::Expense;
use api_types::predefined::PredefinedExpense;
use engine::{Category, Entry, EntryKind, Money, Template};

pub fn kind_from_api(kind: api_types::EntryKind) -> EntryKind {
    match kind {
        api_types::EntryKind::Expense => EntryKind::Expense,
        api_types::EntryKind::Income => EntryKind::Income,
    }
}

pub fn kind_to_api(kind: EntryKind) -> api_types::EntryKind {
    match kind {
        EntryKind::Expense => api_types::EntryKind::Expense,
        EntryKind::Income => api_types::EntryKind::Income,
    }
}

pub fn entry_from_dto(dto: Expense) -> Entry {
    Entry {
        id: dto.id,
        title: dto.title,
        amount: Money::from_major(dto.amount),
        category: Category::from_label(&dto.category),
        kind: kind_from_api(dto.kind),
        date: dto.date,
        predefined: dto.is_predefined,
    }
}

pub fn template_from_dto(dto: PredefinedExpense) -> Template {
    Template {
        id: dto.id,
        title: dto.title,
        amount: Money::from_major(dto.amount),
        category: Category::from_label(&dto.category),
        kind: kind_from_api(dto.kind),
        day_of_month: dto.day_of_month,
        active: dto.is_active,
        description: dto.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_underscore_id_is_normalized() {
        let dto: Expense = serde_json::from_str(
            r#"{"_id": "abc123", "title": "Rent", "amount": 800.0,
                "category": "Rent", "type": "expense", "date": "2026-08-01"}"#,
        )
        .unwrap();
        let entry = entry_from_dto(dto);

        assert_eq!(entry.id, "abc123");
        assert_eq!(entry.amount, Money::new(800_00));
        assert_eq!(entry.category, Category::Rent);
        assert_eq!(entry.kind, EntryKind::Expense);
        assert!(!entry.predefined);
    }

    #[test]
    fn unknown_category_becomes_other() {
        let dto: PredefinedExpense = serde_json::from_str(
            r#"{"id": "t1", "title": "Gym", "amount": 29.99, "category": "Fitness",
                "type": "expense", "dayOfMonth": 5, "isActive": true}"#,
        )
        .unwrap();
        let template = template_from_dto(dto);

        assert_eq!(template.category, Category::Other);
        assert_eq!(template.amount, Money::new(29_99));
        assert_eq!(template.day_of_month, 5);
        assert!(template.active);
        assert!(template.description.is_none());
    }
}
