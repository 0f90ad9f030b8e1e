use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use engine::{Money, Month, Template, apply};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    local_state::{self, LocalState},
    ui,
};

pub mod convert;
pub mod form;
pub mod state;

use form::{ExpenseForm, TemplateForm, parse_salary};
use state::{ApplyRangeReport, MonthData, Mutation, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Expenses,
    Summary,
    Charts,
    Predefined,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Expenses => "Expenses",
            Self::Summary => "Summary",
            Self::Charts => "Charts",
            Self::Predefined => "Predefined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Debug, Default)]
pub struct PredefinedState {
    pub templates: Vec<Template>,
    pub selected: usize,
    pub error: Option<String>,
    pub form: Option<TemplateForm>,
    /// Last range apply outcome, shown until dismissed.
    pub report: Option<ApplyRangeReport>,
}

impl PredefinedState {
    fn select_next(&mut self) {
        if self.templates.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.templates.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn selected_template(&self) -> Option<&Template> {
        self.templates.get(self.selected)
    }
}

#[derive(Debug)]
pub struct AppState {
    pub view: ViewState,
    pub section: Section,
    pub expenses_selected: usize,
    pub expense_form: Option<ExpenseForm>,
    /// Local validation message for the open form; blocks submission.
    pub form_error: Option<String>,
    /// Salary input buffer; `Some` while editing.
    pub salary_input: Option<String>,
    pub predefined: PredefinedState,
    pub connection_ok: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

pub struct App {
    client: Client,
    state_path: String,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state_path = local_state::default_state_path().to_string();
        let local = LocalState::load(&state_path).unwrap_or_default();

        let month = config
            .month
            .as_deref()
            .or(local.last_month.as_deref())
            .and_then(|raw| raw.parse::<Month>().ok())
            .unwrap_or_else(current_month);

        let state = AppState {
            view: ViewState::new(month),
            section: Section::Expenses,
            expenses_selected: 0,
            expense_form: None,
            form_error: None,
            salary_input: None,
            predefined: PredefinedState::default(),
            connection_ok: false,
            last_refresh: None,
            toast: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            client,
            state_path,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.check_health().await;
        self.reload_month().await;
        self.reload_templates().await;

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn input_open(&self) -> bool {
        self.state.expense_form.is_some()
            || self.state.salary_input.is_some()
            || self.state.predefined.form.is_some()
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Any key clears a lingering toast.
        self.state.toast = None;

        match ui::keymap::map_key(key, self.input_open()) {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Cancel => self.handle_cancel(),
            ui::keymap::AppAction::NextField => {
                if let Some(form) = self.state.expense_form.as_mut() {
                    form.next_field();
                } else if let Some(form) = self.state.predefined.form.as_mut() {
                    form.next_field();
                }
            }
            ui::keymap::AppAction::Submit => self.handle_submit().await,
            ui::keymap::AppAction::Backspace => {
                if let Some(form) = self.state.expense_form.as_mut() {
                    form.backspace();
                } else if let Some(form) = self.state.predefined.form.as_mut() {
                    form.backspace();
                } else if let Some(input) = self.state.salary_input.as_mut() {
                    input.pop();
                }
            }
            ui::keymap::AppAction::Up => self.handle_up_down(-1),
            ui::keymap::AppAction::Down => self.handle_up_down(1),
            ui::keymap::AppAction::Left => {
                if !self.input_open() {
                    self.change_month(self.state.view.month.prev()).await;
                }
            }
            ui::keymap::AppAction::Right => {
                if !self.input_open() {
                    self.change_month(self.state.view.month.next()).await;
                }
            }
            ui::keymap::AppAction::Input(ch) => self.handle_input(ch).await,
            ui::keymap::AppAction::None => {}
        }

        Ok(())
    }

    fn handle_cancel(&mut self) {
        if self.state.expense_form.take().is_some() {
            self.state.form_error = None;
            self.state.view.cancel_edit();
        } else if self.state.predefined.form.take().is_some() {
            self.state.form_error = None;
        } else if self.state.salary_input.take().is_some() {
            self.state.form_error = None;
        } else if self.state.predefined.report.take().is_some() {
            // Report dismissed.
        } else {
            self.state.view.dismiss_error();
            self.state.predefined.error = None;
        }
    }

    fn handle_up_down(&mut self, step: i32) {
        if let Some(form) = self.state.expense_form.as_mut() {
            match form.focus {
                form::ExpenseField::Category => form.cycle_category(step),
                form::ExpenseField::Kind => form.toggle_kind(),
                _ => {}
            }
            return;
        }
        if let Some(form) = self.state.predefined.form.as_mut() {
            match form.focus {
                form::TemplateField::Category => form.cycle_category(step),
                form::TemplateField::Kind | form::TemplateField::Active => form.input(' '),
                _ => {}
            }
            return;
        }
        if self.state.salary_input.is_some() {
            return;
        }

        match self.state.section {
            Section::Expenses => {
                let len = self.state.view.entries.len();
                if len == 0 {
                    return;
                }
                if step > 0 {
                    self.state.expenses_selected =
                        (self.state.expenses_selected + 1).min(len - 1);
                } else {
                    self.state.expenses_selected = self.state.expenses_selected.saturating_sub(1);
                }
            }
            Section::Predefined => {
                if step > 0 {
                    self.state.predefined.select_next();
                } else {
                    self.state.predefined.select_prev();
                }
            }
            Section::Summary | Section::Charts => {}
        }
    }

    async fn handle_submit(&mut self) {
        if self.state.expense_form.is_some() {
            self.submit_expense_form().await;
        } else if self.state.predefined.form.is_some() {
            self.submit_template_form().await;
        } else if self.state.salary_input.is_some() {
            self.submit_salary().await;
        } else {
            match self.state.section {
                Section::Expenses => self.edit_selected_expense(),
                Section::Summary => self.open_salary_input(),
                Section::Predefined => self.edit_selected_template(),
                Section::Charts => {}
            }
        }
    }

    async fn handle_input(&mut self, ch: char) {
        if let Some(form) = self.state.expense_form.as_mut() {
            form.input(ch);
            return;
        }
        if let Some(form) = self.state.predefined.form.as_mut() {
            form.input(ch);
            return;
        }
        if let Some(input) = self.state.salary_input.as_mut() {
            input.push(ch);
            return;
        }

        match ch {
            'e' | 'E' => self.state.section = Section::Expenses,
            's' | 'S' => self.state.section = Section::Summary,
            'c' | 'C' => self.state.section = Section::Charts,
            'p' | 'P' => self.state.section = Section::Predefined,
            'r' | 'R' => {
                self.check_health().await;
                self.reload_month().await;
                self.reload_templates().await;
            }
            _ => match self.state.section {
                Section::Expenses => self.handle_expenses_key(ch).await,
                Section::Summary => self.handle_summary_key(ch).await,
                Section::Predefined => self.handle_predefined_key(ch).await,
                Section::Charts => {}
            },
        }
    }

    async fn handle_expenses_key(&mut self, ch: char) {
        match ch {
            'a' => {
                self.state.expense_form = Some(ExpenseForm::for_month(self.state.view.month));
                self.state.form_error = None;
            }
            'd' => self.delete_selected_expense().await,
            _ => {}
        }
    }

    async fn handle_summary_key(&mut self, ch: char) {
        match ch {
            'i' => self.open_salary_input(),
            'x' => self.clear_salary().await,
            _ => {}
        }
    }

    async fn handle_predefined_key(&mut self, ch: char) {
        match ch {
            'n' => {
                self.state.predefined.form = Some(TemplateForm::new());
                self.state.form_error = None;
            }
            'd' => self.delete_selected_template().await,
            't' => self.toggle_selected_template().await,
            'a' => self.apply_selected_template().await,
            'm' => self.apply_all_to_month().await,
            'A' => self.apply_range().await,
            _ => {}
        }
    }

    fn open_salary_input(&mut self) {
        let current = self.state.view.salary;
        let prefill = if current.is_zero() {
            String::new()
        } else {
            format!("{:.2}", current.to_major())
        };
        self.state.salary_input = Some(prefill);
        self.state.form_error = None;
    }

    fn edit_selected_expense(&mut self) {
        let Some(entry) = self
            .state
            .view
            .entries
            .get(self.state.expenses_selected)
            .cloned()
        else {
            return;
        };
        self.state.view.start_edit(&entry.id);
        self.state.expense_form = Some(ExpenseForm::from_entry(&entry));
        self.state.form_error = None;
    }

    fn edit_selected_template(&mut self) {
        let Some(template) = self.state.predefined.selected_template().cloned() else {
            return;
        };
        self.state.predefined.form = Some(TemplateForm::from_template(&template));
        self.state.form_error = None;
    }

    async fn change_month(&mut self, month: Month) {
        if !self.state.view.select_month(month) {
            return;
        }
        self.state.expenses_selected = 0;
        self.state.expense_form = None;
        self.state.salary_input = None;
        self.save_local_state();
        self.reload_month().await;
    }

    fn save_local_state(&self) {
        let local = LocalState {
            last_month: Some(self.state.view.month.to_string()),
        };
        if let Err(err) = local.save(&self.state_path) {
            tracing::warn!("failed to persist local state: {err}");
        }
    }

    async fn check_health(&mut self) {
        self.state.connection_ok = self.client.health().await.is_ok();
    }

    async fn reload_month(&mut self) {
        let requested = self.state.view.begin_load();
        let result = self.fetch_month(requested).await;
        if self.state.view.finish_load(requested, result) {
            self.state.last_refresh = Some(Local::now());
        }
    }

    async fn fetch_month(&self, month: Month) -> std::result::Result<MonthData, String> {
        let expenses = self
            .client
            .expenses_for_month(month)
            .await
            .map_err(message_for_error)?;
        let salary = self
            .client
            .salary_for_month(month)
            .await
            .map_err(message_for_error)?;

        Ok(MonthData {
            entries: expenses.into_iter().map(convert::entry_from_dto).collect(),
            salary: salary
                .map(|s| Money::from_major(s.amount))
                .unwrap_or(Money::ZERO),
        })
    }

    async fn reload_templates(&mut self) {
        match self.client.predefined_list().await {
            Ok(templates) => {
                self.state.predefined.templates = templates
                    .into_iter()
                    .map(convert::template_from_dto)
                    .collect();
                self.state.predefined.error = None;
                let len = self.state.predefined.templates.len();
                if self.state.predefined.selected >= len {
                    self.state.predefined.selected = len.saturating_sub(1);
                }
            }
            Err(err) => {
                self.state.predefined.error = Some(message_for_error(err));
            }
        }
    }

    async fn submit_expense_form(&mut self) {
        let Some(form) = self.state.expense_form.clone() else {
            return;
        };
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                self.state.form_error = Some(message);
                return;
            }
        };

        let result = match form.editing.as_deref() {
            Some(id) => self.client.expense_update(id, &payload).await,
            None => self.client.expense_create(&payload).await,
        };

        match result {
            Ok(dto) => {
                let entry = convert::entry_from_dto(dto);
                let mutation = if form.editing.is_some() {
                    self.state.view.entry_updated(entry)
                } else {
                    self.state.view.entry_created(entry)
                };
                self.state.expense_form = None;
                self.state.form_error = None;
                self.set_toast(
                    if form.editing.is_some() {
                        "Expense updated"
                    } else {
                        "Expense added"
                    },
                    ToastLevel::Success,
                );
                if mutation == Mutation::NeedsReload {
                    self.reload_month().await;
                }
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    async fn delete_selected_expense(&mut self) {
        let Some(entry) = self.state.view.entries.get(self.state.expenses_selected) else {
            return;
        };
        let id = entry.id.clone();

        match self.client.expense_delete(&id).await {
            Ok(()) => {
                self.state.view.entry_deleted(&id);
                let len = self.state.view.entries.len();
                if self.state.expenses_selected >= len {
                    self.state.expenses_selected = len.saturating_sub(1);
                }
                self.set_toast("Expense deleted", ToastLevel::Info);
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    async fn submit_salary(&mut self) {
        let Some(input) = self.state.salary_input.clone() else {
            return;
        };
        let amount = match parse_salary(&input) {
            Ok(amount) => amount,
            Err(message) => {
                self.state.form_error = Some(message);
                return;
            }
        };

        let month = self.state.view.month;
        match self.client.salary_set(month, amount.to_major()).await {
            Ok(_) => {
                self.state.view.salary_saved(month, amount);
                self.state.salary_input = None;
                self.state.form_error = None;
                self.set_toast("Salary saved", ToastLevel::Success);
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    async fn clear_salary(&mut self) {
        let month = self.state.view.month;
        match self.client.salary_delete(month).await {
            // Nothing to delete means the salary is already absent (= zero).
            Ok(()) | Err(ClientError::NotFound) => {
                self.state.view.salary_saved(month, Money::ZERO);
                self.set_toast("Salary cleared", ToastLevel::Info);
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    async fn submit_template_form(&mut self) {
        let Some(form) = self.state.predefined.form.clone() else {
            return;
        };
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                self.state.form_error = Some(message);
                return;
            }
        };

        let result = match form.editing.as_deref() {
            Some(id) => self.client.predefined_update(id, &payload).await,
            None => self.client.predefined_create(&payload).await,
        };

        match result {
            Ok(_) => {
                self.state.predefined.form = None;
                self.state.form_error = None;
                self.set_toast(
                    if form.editing.is_some() {
                        "Template updated"
                    } else {
                        "Template created"
                    },
                    ToastLevel::Success,
                );
                self.reload_templates().await;
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    async fn delete_selected_template(&mut self) {
        let Some(template) = self.state.predefined.selected_template() else {
            return;
        };
        let id = template.id.clone();

        match self.client.predefined_delete(&id).await {
            Ok(()) => {
                self.set_toast("Template deleted", ToastLevel::Info);
                self.reload_templates().await;
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    async fn toggle_selected_template(&mut self) {
        let Some(template) = self.state.predefined.selected_template().cloned() else {
            return;
        };
        let payload = api_types::predefined::PredefinedExpenseNew {
            title: template.title.clone(),
            amount: template.amount.to_major(),
            category: template.category.as_str().to_string(),
            kind: convert::kind_to_api(template.kind),
            day_of_month: template.day_of_month,
            is_active: !template.active,
            description: template.description.clone(),
        };

        match self.client.predefined_update(&template.id, &payload).await {
            Ok(_) => self.reload_templates().await,
            Err(err) => self.state.view.fail(message_for_error(err)),
        }
    }

    /// Applies the selected template to the month on screen.
    ///
    /// Inactive templates are skipped even when explicitly chosen; the
    /// active flag always wins over the selection.
    async fn apply_selected_template(&mut self) {
        let Some(template) = self.state.predefined.selected_template().cloned() else {
            return;
        };
        if !template.active {
            self.state.predefined.error = Some("Template is inactive.".to_string());
            return;
        }
        let ids = [template.id.clone()];
        self.apply_to_month(Some(&ids)).await;
    }

    async fn apply_all_to_month(&mut self) {
        self.apply_to_month(None).await;
    }

    async fn apply_to_month(&mut self, ids: Option<&[String]>) {
        if self.state.view.applying {
            return;
        }
        self.state.view.applying = true;

        let month = self.state.view.month;
        match self.client.apply_to_month(month, ids).await {
            Ok(response) => {
                self.set_toast(
                    format!("Applied {} record(s) to {month}", response.created.len()),
                    ToastLevel::Success,
                );
                self.reload_month().await;
            }
            Err(err) => self.state.view.fail(message_for_error(err)),
        }

        self.state.view.applying = false;
    }

    /// Applies all active templates month by month across the lookahead
    /// window, collecting a per-month report instead of aborting on the
    /// first failure.
    async fn apply_range(&mut self) {
        if self.state.view.applying {
            return;
        }
        self.state.view.applying = true;

        let months = apply::months_to_apply(self.state.view.month, None);
        let mut report = ApplyRangeReport::default();
        for month in months {
            match self.client.apply_to_month(month, None).await {
                Ok(response) => report.record_success(month, response.created.len()),
                Err(err) => report.record_failure(month, message_for_error(err)),
            }
        }

        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            created = report.total_created(),
            "range apply finished"
        );
        let level = if report.failed.is_empty() {
            ToastLevel::Success
        } else {
            ToastLevel::Error
        };
        self.set_toast(report.summary_line(), level);
        self.state.predefined.report = Some(report);
        self.state.view.applying = false;

        self.reload_month().await;
    }

    fn set_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
        });
    }
}

fn current_month() -> Month {
    Month::of(Local::now().date_naive())
}

fn message_for_error(err: ClientError) -> String {
    match err {
        ClientError::NotFound => "Not found.".to_string(),
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Backend unreachable: {err}"),
    }
}
