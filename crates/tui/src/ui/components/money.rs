use engine::Money;
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Creates a styled span for a money amount with semantic coloring.
///
/// - Positive amounts: green with `+` prefix
/// - Negative amounts: red (no prefix, negative sign shown)
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme) -> Span<'static> {
    let (color, prefix) = if amount.is_positive() {
        (theme.positive, "+")
    } else if amount.is_negative() {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(format!("{prefix}{amount}"), Style::default().fg(color))
}
