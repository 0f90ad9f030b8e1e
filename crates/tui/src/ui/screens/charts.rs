use engine::charts::{daily_series, pie_series};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::{
    app::AppState,
    ui::{components::card::Card, components::charts::ascii_bar, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    if state.view.entries.is_empty() {
        let card = Card::new("Monthly Charts", &theme);
        let inner = card.inner(area);
        card.render_frame(frame, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No data available for this month. Add expenses to see charts!",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_daily(frame, layout[0], state, &theme);
    render_categories(frame, layout[1], state, &theme);
}

fn render_daily(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Daily Income vs Expenses", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let series = daily_series(&state.view.entries);
    if series.is_empty() {
        return;
    }

    let mut chart = BarChart::default().bar_width(4).bar_gap(0).group_gap(2);
    for day in &series {
        let bars = [
            Bar::default()
                .value(day.income.cents().max(0) as u64 / 100)
                .style(Style::default().fg(theme.positive)),
            Bar::default()
                .value(day.expense.cents().max(0) as u64 / 100)
                .style(Style::default().fg(theme.negative)),
        ];
        let group = BarGroup::default()
            .label(Line::from(format!("{:02}", day.day)))
            .bars(&bars);
        chart = chart.data(group);
    }

    frame.render_widget(chart, inner);
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Expenses by Category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let slices = pie_series(&state.view.entries);
    if slices.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expense data for this month.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let total: i64 = slices.iter().map(|(_, amount)| amount.cents()).sum();
    let max = slices
        .iter()
        .map(|(_, amount)| amount.cents())
        .max()
        .unwrap_or(1);

    let rows: Vec<Line> = slices
        .iter()
        .enumerate()
        .take(inner.height as usize)
        .map(|(index, (category, amount))| {
            // Colors follow slice position, cycling the fixed palette.
            let color = theme.palette_color(index);
            let percent = if total > 0 {
                amount.cents() as f64 / total as f64 * 100.0
            } else {
                0.0
            };

            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!("{:<16}", category.as_str()),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:>12}", amount.to_string()),
                    Style::default().fg(theme.dim),
                ),
                Span::raw("  "),
                Span::styled(
                    ascii_bar(amount.cents().max(0) as u64, max.max(0) as u64, 20),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {percent:>5.1}%"),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}
