use engine::{EntryKind, Template, apply::plan_month};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, form::TemplateField},
    ui::{
        components::card::Card,
        components::money::styled_amount,
        screens::expenses::field_line,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
    if state.predefined.form.is_some() {
        constraints.push(Constraint::Length(12));
    } else if state.predefined.report.is_some() {
        constraints.push(Constraint::Length(9));
    }
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);
    if state.predefined.form.is_some() {
        render_form(frame, layout[2], state, &theme);
    } else if state.predefined.report.is_some() {
        render_report(frame, layout[2], state, &theme);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    // Preview of what a full apply would do, so the count is visible before
    // any request goes out.
    let planned = plan_month(&state.predefined.templates, None, state.view.month).len();

    let mut line = vec![
        Span::styled("Month", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", state.view.month)),
        Span::styled("Apply now", Style::default().fg(theme.dim)),
        Span::raw(format!(": {planned} record(s)")),
    ];
    if state.view.applying {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            "Applying...",
            Style::default().fg(theme.accent),
        ));
    }
    if let Some(message) = &state.predefined.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            message.clone(),
            Style::default().fg(theme.error),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Predefined Expenses ")
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.predefined.templates.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No predefined expenses. Press n to create one.",
                Style::default().fg(theme.dim),
            )))
            .block(block)
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items = state
        .predefined
        .templates
        .iter()
        .map(|template| ListItem::new(template_line(template, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.predefined.selected));

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

fn template_line(template: &Template, theme: &Theme) -> Line<'static> {
    let signed = match template.kind {
        EntryKind::Income => template.amount,
        EntryKind::Expense => -template.amount,
    };
    let description = template
        .description
        .as_deref()
        .map(|d| format!("  {d}"))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            format!("{:<24}", template.title.clone()),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("Day {:<4}", template.day_of_month),
            Style::default().fg(theme.dim),
        ),
        Span::styled(
            format!("{:<14}", template.category.as_str()),
            Style::default().fg(theme.dim),
        ),
        styled_amount(signed, theme),
    ];
    if !template.active {
        spans.push(Span::styled(
            "  inactive",
            Style::default().fg(theme.error),
        ));
    }
    if !description.is_empty() {
        spans.push(Span::styled(description, Style::default().fg(theme.dim)));
    }

    Line::from(spans)
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(form) = &state.predefined.form else {
        return;
    };

    let title = if form.editing.is_some() {
        "Edit Template"
    } else {
        "New Template"
    };
    let card = Card::new(title, theme).focused(true);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let active_label = if form.active { "yes" } else { "no" };
    let mut lines = vec![
        field_line("Title", &form.title, form.focus == TemplateField::Title, theme),
        field_line(
            "Amount",
            &form.amount,
            form.focus == TemplateField::Amount,
            theme,
        ),
        field_line(
            "Category",
            &format!("< {} >", form.selected_category()),
            form.focus == TemplateField::Category,
            theme,
        ),
        field_line(
            "Type",
            &format!("< {} >", form.kind.as_str()),
            form.focus == TemplateField::Kind,
            theme,
        ),
        field_line("Day", &form.day, form.focus == TemplateField::Day, theme),
        field_line(
            "Active",
            &format!("< {active_label} >"),
            form.focus == TemplateField::Active,
            theme,
        ),
        field_line(
            "Notes",
            &form.description,
            form.focus == TemplateField::Description,
            theme,
        ),
    ];

    if let Some(message) = &state.form_error {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_report(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(report) = &state.predefined.report else {
        return;
    };

    let card = Card::new("Range Apply Report", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(report.summary_line(), Style::default().fg(theme.text)),
        Span::styled("   Esc dismiss", Style::default().fg(theme.dim)),
    ])];

    for (month, created) in report
        .succeeded
        .iter()
        .take(inner.height.saturating_sub(1) as usize)
    {
        lines.push(Line::from(vec![
            Span::styled(month.to_string(), Style::default().fg(theme.dim)),
            Span::styled(
                format!("  created {created}"),
                Style::default().fg(theme.positive),
            ),
        ]));
    }
    for (month, message) in &report.failed {
        lines.push(Line::from(vec![
            Span::styled(month.to_string(), Style::default().fg(theme.dim)),
            Span::styled(
                format!("  failed: {message}"),
                Style::default().fg(theme.error),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
