pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let banner = state.view.error().is_some();
    let mut constraints = vec![
        Constraint::Length(1), // Info bar
        Constraint::Length(2), // Tab bar
    ];
    if banner {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0)); // Main content
    constraints.push(Constraint::Length(1)); // Bottom bar

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let mut next = 2;
    if banner {
        render_error_banner(frame, layout[next], state, &theme);
        next += 1;
    }
    let content = layout[next];
    match state.section {
        Section::Expenses => screens::expenses::render(frame, content, state),
        Section::Summary => screens::summary::render(frame, content, state),
        Section::Charts => screens::charts::render(frame, content, state),
        Section::Predefined => screens::predefined::render(frame, content, state),
    }

    render_bottom_bar(frame, layout[next + 1], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if state.connection_ok { "OK" } else { "ERR" };
    let status_style = if state.connection_ok {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.error)
    };

    let line = Line::from(vec![
        Span::styled("Backend", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Month", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.view.month)),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_error_banner(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(message) = state.view.error() else {
        return;
    };
    let line = Line::from(vec![
        Span::styled("⚠ ", Style::default().fg(theme.error)),
        Span::styled(message.to_string(), Style::default().fg(theme.error)),
        Span::raw("  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" dismiss"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("◀ ▶", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" month"));
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("r", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" refresh"));

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Returns context-specific keyboard hints based on current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let form_open = state.expense_form.is_some()
        || state.predefined.form.is_some()
        || state.salary_input.is_some();
    if form_open {
        return vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ];
    }

    match state.section {
        Section::Expenses => vec![
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" add  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" edit  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" delete"),
        ],
        Section::Summary => vec![
            Span::styled("i", Style::default().fg(theme.accent)),
            Span::raw(" salary  "),
            Span::styled("x", Style::default().fg(theme.accent)),
            Span::raw(" clear"),
        ],
        Section::Charts => Vec::new(),
        Section::Predefined => vec![
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" new  "),
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" apply one  "),
            Span::styled("m", Style::default().fg(theme.accent)),
            Span::raw(" apply month  "),
            Span::styled("A", Style::default().fg(theme.accent)),
            Span::raw(" apply all  "),
            Span::styled("t", Style::default().fg(theme.accent)),
            Span::raw(" toggle  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" delete"),
        ],
    }
}
