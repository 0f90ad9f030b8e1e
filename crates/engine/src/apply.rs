//! Apply planning: which templates materialize into which dated records.
//!
//! Planning is pure; submitting the plan to the backend is the client's job.

use chrono::NaiveDate;

use crate::{Category, EntryKind, Money, Month, Template};

/// Months covered when a range apply has no explicit end.
pub const APPLY_LOOKAHEAD_MONTHS: u32 = 12;

/// A record an apply run will create.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedEntry {
    pub template_id: String,
    pub title: String,
    pub amount: Money,
    pub category: Category,
    pub kind: EntryKind,
    pub date: NaiveDate,
}

/// Expands templates into the records one month's apply creates.
///
/// `ids: None` selects all templates. Inactive templates are skipped even
/// when explicitly listed; the active flag always wins over the id filter
/// (inherited policy, kept as-is). The template's day-of-month is clamped
/// into the target month.
///
/// Planning the same month twice yields the same records again: there is no
/// dedup, and re-applying doubles the month's entries.
#[must_use]
pub fn plan_month(templates: &[Template], ids: Option<&[String]>, month: Month) -> Vec<PlannedEntry> {
    templates
        .iter()
        .filter(|template| template.active)
        .filter(|template| match ids {
            Some(ids) => ids.iter().any(|id| *id == template.id),
            None => true,
        })
        .map(|template| PlannedEntry {
            template_id: template.id.clone(),
            title: template.title.clone(),
            amount: template.amount,
            category: template.category,
            kind: template.kind,
            date: month.date_on(template.day_of_month),
        })
        .collect()
}

/// The months a range apply touches.
///
/// Inclusive from `start` to `end`; with no `end`, a fixed
/// [`APPLY_LOOKAHEAD_MONTHS`]-month window starting at `start`.
#[must_use]
pub fn months_to_apply(start: Month, end: Option<Month>) -> Vec<Month> {
    let end = end.unwrap_or_else(|| start.plus(APPLY_LOOKAHEAD_MONTHS - 1));
    start.through(end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, amount: i64, day_of_month: u32, active: bool) -> Template {
        Template {
            id: id.to_string(),
            title: format!("template {id}"),
            amount: Money::new(amount),
            category: Category::Bills,
            kind: EntryKind::Expense,
            day_of_month,
            active,
            description: None,
        }
    }

    #[test]
    fn inactive_templates_are_skipped() {
        let templates = [
            template("a", 20_00, 1, true),
            template("b", 30_00, 5, true),
            template("c", 40_00, 10, false),
        ];
        let month: Month = "2026-08".parse().unwrap();

        let planned = plan_month(&templates, None, month);
        assert_eq!(planned.len(), 2);
        assert!(planned.iter().all(|p| p.template_id != "c"));
    }

    #[test]
    fn explicit_id_list_does_not_override_active_flag() {
        let templates = [
            template("a", 20_00, 1, true),
            template("c", 40_00, 10, false),
        ];
        let month: Month = "2026-08".parse().unwrap();
        let ids = vec!["a".to_string(), "c".to_string()];

        let planned = plan_month(&templates, Some(&ids), month);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].template_id, "a");
    }

    #[test]
    fn id_filter_selects_a_subset() {
        let templates = [
            template("a", 20_00, 1, true),
            template("b", 30_00, 5, true),
        ];
        let month: Month = "2026-08".parse().unwrap();
        let ids = vec!["b".to_string()];

        let planned = plan_month(&templates, Some(&ids), month);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].template_id, "b");
    }

    #[test]
    fn day_of_month_is_clamped_into_short_months() {
        let templates = [template("a", 10_00, 31, true)];

        let june: Month = "2026-06".parse().unwrap();
        let planned = plan_month(&templates, None, june);
        assert_eq!(
            planned[0].date,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
        );

        let february: Month = "2026-02".parse().unwrap();
        let planned = plan_month(&templates, None, february);
        assert_eq!(
            planned[0].date,
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }

    #[test]
    fn replanning_a_month_repeats_the_records() {
        // No dedup exists: re-applying the same month doubles its entries.
        let templates = [
            template("a", 20_00, 1, true),
            template("b", 30_00, 5, true),
        ];
        let month: Month = "2026-08".parse().unwrap();

        let first = plan_month(&templates, None, month);
        let second = plan_month(&templates, None, month);
        assert_eq!(first, second);
        assert_eq!(first.len() + second.len(), 4);
    }

    #[test]
    fn range_defaults_to_fixed_lookahead() {
        let start: Month = "2026-08".parse().unwrap();

        let months = months_to_apply(start, None);
        assert_eq!(months.len(), APPLY_LOOKAHEAD_MONTHS as usize);
        assert_eq!(months[0], start);
        assert_eq!(months[11].to_string(), "2027-07");
    }

    #[test]
    fn range_honors_explicit_end() {
        let start: Month = "2026-08".parse().unwrap();
        let end: Month = "2026-10".parse().unwrap();

        let months = months_to_apply(start, Some(end));
        assert_eq!(months.len(), 3);
        assert_eq!(months[2], end);
    }
}
