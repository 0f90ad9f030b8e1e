use engine::{Entry, EntryKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, form::ExpenseField},
    ui::{components::card::Card, components::money::styled_amount, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
    if state.expense_form.is_some() {
        constraints.push(Constraint::Length(10));
    }
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);
    if state.expense_form.is_some() {
        render_form(frame, layout[2], state, &theme);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let count = state.view.entries.len();
    let mut line = vec![
        Span::styled(
            state.view.month.label(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("◀", Style::default().fg(theme.accent)),
        Span::raw(" / "),
        Span::styled("▶", Style::default().fg(theme.accent)),
        Span::raw(" change month   "),
        Span::styled("Records", Style::default().fg(theme.dim)),
        Span::raw(format!(": {count}")),
    ];
    if state.view.is_loading() {
        line.push(Span::raw("   "));
        line.push(Span::styled("Loading...", Style::default().fg(theme.dim)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Expenses ")
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.view.entries.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No records this month. Press a to add one.",
                Style::default().fg(theme.dim),
            )))
            .block(block)
            .alignment(ratatui::layout::Alignment::Center),
            area,
        );
        return;
    }

    let items = state
        .view
        .entries
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.expenses_selected));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_line(entry: &Entry, theme: &Theme) -> Line<'static> {
    let date = entry.date.format("%d %b").to_string();
    let signed = match entry.kind {
        EntryKind::Income => entry.amount,
        EntryKind::Expense => -entry.amount,
    };
    let marker = if entry.predefined { "  auto" } else { "" };

    Line::from(vec![
        Span::styled(date, Style::default().fg(theme.dim)),
        Span::raw("  "),
        Span::styled(
            format!("{:<24}", truncate(&entry.title, 24)),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("{:<14}", entry.category.as_str()),
            Style::default().fg(theme.dim),
        ),
        styled_amount(signed, theme),
        Span::styled(marker, Style::default().fg(theme.dim)),
    ])
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(form) = &state.expense_form else {
        return;
    };

    let title = if form.editing.is_some() {
        "Edit Expense"
    } else {
        "Add Expense"
    };
    let card = Card::new(title, theme).focused(true);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut lines = vec![
        field_line("Title", &form.title, form.focus == ExpenseField::Title, theme),
        field_line(
            "Amount",
            &form.amount,
            form.focus == ExpenseField::Amount,
            theme,
        ),
        field_line(
            "Category",
            &format!("< {} >", form.selected_category()),
            form.focus == ExpenseField::Category,
            theme,
        ),
        field_line(
            "Type",
            &format!("< {} >", form.kind.as_str()),
            form.focus == ExpenseField::Kind,
            theme,
        ),
        field_line("Date", &form.date, form.focus == ExpenseField::Date, theme),
    ];

    if let Some(message) = &state.form_error {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

pub(super) fn field_line(
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let value_style = if focused {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
