/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Creates a percentage bar with label, e.g. `████████░░ 80.0%`.
#[must_use]
pub fn percentage_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0 * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!(
        "{}{} {percent:>5.1}%",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}
