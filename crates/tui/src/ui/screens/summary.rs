use engine::summarize;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::card::{Card, StatCard},
        components::charts::percentage_bar,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    // Recomputed on every draw; totals never outlive the scope they came
    // from.
    let summary = summarize(&state.view.entries, state.view.salary);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Salary input
            Constraint::Length(3), // Stat cards
            Constraint::Min(5),    // Category breakdown
        ])
        .split(area);

    render_salary_row(frame, layout[0], state, &theme);
    render_stat_cards(frame, layout[1], &summary, &theme);
    render_breakdown(frame, layout[2], &summary, &theme);
}

fn render_salary_row(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.salary_input.is_some();
    let card = Card::new("Monthly Salary", theme).focused(editing);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut spans = match &state.salary_input {
        Some(input) => vec![
            Span::styled(
                format!("{input}_"),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Enter save   Esc cancel", Style::default().fg(theme.dim)),
        ],
        None => vec![
            Span::styled(
                state.view.salary.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   i edit   x clear", Style::default().fg(theme.dim)),
        ],
    };
    if editing && let Some(message) = &state.form_error {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(theme.error),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_stat_cards(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: &engine::MonthlySummary,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    StatCard::new("Salary", summary.salary.to_string(), theme).render(frame, cols[0]);
    StatCard::new(
        "Total Income",
        format!("+{}", summary.combined_income),
        theme,
    )
    .value_style(Style::default().fg(theme.positive))
    .render(frame, cols[1]);
    StatCard::new("Total Expenses", format!("-{}", summary.expense_total), theme)
        .value_style(Style::default().fg(theme.negative))
        .render(frame, cols[2]);
    let balance_color = if summary.balance.is_negative() {
        theme.negative
    } else {
        theme.positive
    };
    StatCard::new("Balance", summary.balance.to_string(), theme)
        .value_style(Style::default().fg(balance_color))
        .render(frame, cols[3]);
}

fn render_breakdown(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: &engine::MonthlySummary,
    theme: &Theme,
) {
    let title = format!(
        "Expense Breakdown ({} categories)",
        summary.breakdown.len()
    );
    let card = Card::new(&title, theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if summary.breakdown.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expenses this month.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let rows: Vec<Line> = summary
        .breakdown
        .iter()
        .take(inner.height as usize)
        .map(|share| {
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", share.category.as_str()),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:>12}", share.amount.to_string()),
                    Style::default().fg(theme.negative),
                ),
                Span::raw("  "),
                Span::styled(
                    percentage_bar(share.percent, 20),
                    Style::default().fg(theme.negative),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}
