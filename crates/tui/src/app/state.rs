//! View state for the month on screen.
//!
//! Rendering reads this struct; mutation goes through the transition
//! functions below so the controller logic stays testable without a
//! terminal or a backend.

use engine::{Entry, Money, Month};

/// Load lifecycle of the selected month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    /// Dismissible; dismissing returns to `Idle`.
    Error(String),
}

/// What a reload brings back for one month.
#[derive(Debug, Clone)]
pub struct MonthData {
    pub entries: Vec<Entry>,
    pub salary: Money,
}

/// Outcome of an optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Local state already matches the backend.
    Applied,
    /// The result left the selected month's scope; reload in full.
    NeedsReload,
}

#[derive(Debug)]
pub struct ViewState {
    pub month: Month,
    pub load: LoadState,
    /// Records of the selected month, as last loaded plus optimistic edits.
    pub entries: Vec<Entry>,
    pub salary: Money,
    /// Id of the record currently being edited, independent of load state.
    pub editing: Option<String>,
    /// At most one apply batch runs at a time.
    pub applying: bool,
}

impl ViewState {
    pub fn new(month: Month) -> Self {
        Self {
            month,
            load: LoadState::Idle,
            entries: Vec::new(),
            salary: Money::ZERO,
            editing: None,
            applying: false,
        }
    }

    /// Switches the selected month. Returns `false` when nothing changed.
    ///
    /// The stale list is dropped immediately so a slow reload never shows
    /// another month's records under the new header.
    pub fn select_month(&mut self, month: Month) -> bool {
        if month == self.month {
            return false;
        }
        self.month = month;
        self.entries.clear();
        self.salary = Money::ZERO;
        self.editing = None;
        true
    }

    /// Marks a load in flight and returns the month it was issued for.
    ///
    /// Pass the token back to [`ViewState::finish_load`]; responses keyed to
    /// a month that is no longer selected are discarded there.
    pub fn begin_load(&mut self) -> Month {
        self.load = LoadState::Loading;
        self.month
    }

    /// Applies a finished load. Returns `false` for discarded stale results.
    pub fn finish_load(
        &mut self,
        requested: Month,
        result: Result<MonthData, String>,
    ) -> bool {
        if requested != self.month {
            return false;
        }
        match result {
            Ok(data) => {
                self.entries = data.entries;
                self.salary = data.salary;
                self.load = LoadState::Idle;
            }
            Err(message) => self.load = LoadState::Error(message),
        }
        true
    }

    /// Surfaces a failed mutation in the banner.
    pub fn fail(&mut self, message: String) {
        self.load = LoadState::Error(message);
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.load, LoadState::Error(_)) {
            self.load = LoadState::Idle;
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    /// Folds a freshly created record into the list when it belongs to the
    /// selected month.
    pub fn entry_created(&mut self, entry: Entry) -> Mutation {
        if entry.month() != self.month {
            return Mutation::NeedsReload;
        }
        self.entries.push(entry);
        Mutation::Applied
    }

    /// Replaces an updated record in place, or asks for a reload when the
    /// update moved it out of the selected month.
    ///
    /// A successful update always ends the edit.
    pub fn entry_updated(&mut self, entry: Entry) -> Mutation {
        if self.editing.as_deref() == Some(entry.id.as_str()) {
            self.editing = None;
        }
        if entry.month() != self.month {
            self.entries.retain(|existing| existing.id != entry.id);
            return Mutation::NeedsReload;
        }
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        Mutation::Applied
    }

    /// Drops a deleted record; deleting the record under edit ends the edit.
    pub fn entry_deleted(&mut self, id: &str) {
        self.entries.retain(|entry| entry.id != id);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
    }

    pub fn salary_saved(&mut self, month: Month, amount: Money) {
        if month == self.month {
            self.salary = amount;
        }
    }

    pub fn start_edit(&mut self, id: &str) {
        self.editing = Some(id.to_string());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}

/// Outcome of a range apply, month by month.
///
/// One month's failure never aborts the rest of the range; the report says
/// which months made it and which did not.
#[derive(Debug, Clone, Default)]
pub struct ApplyRangeReport {
    pub succeeded: Vec<(Month, usize)>,
    pub failed: Vec<(Month, String)>,
}

impl ApplyRangeReport {
    pub fn record_success(&mut self, month: Month, created: usize) {
        self.succeeded.push((month, created));
    }

    pub fn record_failure(&mut self, month: Month, message: String) {
        self.failed.push((month, message));
    }

    pub fn months_touched(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn total_created(&self) -> usize {
        self.succeeded.iter().map(|(_, created)| created).sum()
    }

    pub fn summary_line(&self) -> String {
        if self.failed.is_empty() {
            format!(
                "Applied to {} months, created {} records",
                self.succeeded.len(),
                self.total_created()
            )
        } else {
            format!(
                "Applied to {}/{} months, created {} records ({} failed)",
                self.succeeded.len(),
                self.months_touched(),
                self.total_created(),
                self.failed.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Category, EntryKind};

    use super::*;

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn entry(id: &str, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            title: "test".to_string(),
            amount: Money::new(10_00),
            category: Category::Food,
            kind: EntryKind::Expense,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            predefined: false,
        }
    }

    fn loaded(entries: Vec<Entry>) -> Result<MonthData, String> {
        Ok(MonthData {
            entries,
            salary: Money::new(1000_00),
        })
    }

    #[test]
    fn load_cycle_reaches_idle() {
        let mut state = ViewState::new(month("2026-08"));
        let token = state.begin_load();
        assert!(state.is_loading());

        assert!(state.finish_load(token, loaded(vec![entry("a", "2026-08-03")])));
        assert_eq!(state.load, LoadState::Idle);
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.salary, Money::new(1000_00));
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = ViewState::new(month("2026-08"));
        let token = state.begin_load();

        // Month changes while the response is in flight.
        assert!(state.select_month(month("2026-09")));
        let newer = state.begin_load();

        assert!(!state.finish_load(token, loaded(vec![entry("a", "2026-08-03")])));
        assert!(state.entries.is_empty());
        assert!(state.is_loading());

        assert!(state.finish_load(newer, loaded(vec![entry("b", "2026-09-01")])));
        assert_eq!(state.entries[0].id, "b");
    }

    #[test]
    fn load_failure_surfaces_and_dismisses() {
        let mut state = ViewState::new(month("2026-08"));
        let token = state.begin_load();
        assert!(state.finish_load(token, Err("backend unreachable".to_string())));
        assert_eq!(state.error(), Some("backend unreachable"));

        state.dismiss_error();
        assert_eq!(state.load, LoadState::Idle);
    }

    #[test]
    fn create_in_scope_appends_without_reload() {
        let mut state = ViewState::new(month("2026-08"));
        assert_eq!(
            state.entry_created(entry("a", "2026-08-15")),
            Mutation::Applied
        );
        assert_eq!(state.entries.len(), 1);
    }

    #[test]
    fn create_out_of_scope_requests_reload() {
        let mut state = ViewState::new(month("2026-08"));
        assert_eq!(
            state.entry_created(entry("a", "2026-09-01")),
            Mutation::NeedsReload
        );
        assert!(state.entries.is_empty());
    }

    #[test]
    fn update_replaces_in_place_and_ends_edit() {
        let mut state = ViewState::new(month("2026-08"));
        state.entry_created(entry("a", "2026-08-15"));
        state.start_edit("a");

        let mut changed = entry("a", "2026-08-20");
        changed.amount = Money::new(99_00);
        assert_eq!(state.entry_updated(changed), Mutation::Applied);
        assert_eq!(state.entries[0].amount, Money::new(99_00));
        assert!(state.editing.is_none());
    }

    #[test]
    fn update_that_leaves_the_month_requests_reload() {
        let mut state = ViewState::new(month("2026-08"));
        state.entry_created(entry("a", "2026-08-15"));

        assert_eq!(
            state.entry_updated(entry("a", "2026-09-15")),
            Mutation::NeedsReload
        );
        assert!(state.entries.is_empty());
    }

    #[test]
    fn deleting_the_edited_record_clears_editing() {
        let mut state = ViewState::new(month("2026-08"));
        state.entry_created(entry("a", "2026-08-15"));
        state.start_edit("a");

        state.entry_deleted("a");
        assert!(state.entries.is_empty());
        assert!(state.editing.is_none());
    }

    #[test]
    fn salary_for_another_month_is_ignored() {
        let mut state = ViewState::new(month("2026-08"));
        state.salary_saved(month("2026-09"), Money::new(500_00));
        assert_eq!(state.salary, Money::ZERO);

        state.salary_saved(month("2026-08"), Money::new(500_00));
        assert_eq!(state.salary, Money::new(500_00));
    }

    #[test]
    fn range_report_tracks_partial_failure() {
        let mut report = ApplyRangeReport::default();
        report.record_success(month("2026-08"), 3);
        report.record_success(month("2026-09"), 3);
        report.record_failure(month("2026-10"), "backend unreachable".to_string());

        assert_eq!(report.months_touched(), 3);
        assert_eq!(report.total_created(), 6);
        assert_eq!(
            report.summary_line(),
            "Applied to 2/3 months, created 6 records (1 failed)"
        );
    }
}
