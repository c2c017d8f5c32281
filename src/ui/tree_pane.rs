use crate::core::tree::{RowLabel, TreeRow, preview};
use crate::core::value::JsonValue;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

/// Render the visible tree rows. The cursor row gets a `❯` marker when the
/// pane is focused; the selected row is accented independently of the
/// cursor so it stays visible while the focus is elsewhere.
pub fn render_rows(
    rows: &[TreeRow<'_>],
    range: (usize, usize),
    active: usize,
    selected: usize,
    focused: bool,
    theme: &Theme,
) -> Vec<SpanLine> {
    let (start, end) = range;
    let mut lines = Vec::with_capacity(end.saturating_sub(start));

    for (index, row) in rows.iter().enumerate().take(end).skip(start) {
        let is_active = index == active;
        let is_selected = index == selected;

        let cursor = if focused && is_active { "❯ " } else { "  " };
        let mut line: SpanLine = vec![
            Span::styled(cursor, theme.accent),
            Span::new("  ".repeat(row.depth)),
        ];

        if row.closing {
            line.push(Span::styled("  ", theme.label));
            line.push(Span::styled(closing_bracket(row.value), theme.punctuation));
            lines.push(line);
            continue;
        }

        let icon = if row.expandable() {
            if row.expanded { "▼ " } else { "▶ " }
        } else {
            "  "
        };
        line.push(Span::styled(icon, theme.label));

        let label_style = if is_selected { theme.accent } else { theme.key };
        match &row.label {
            RowLabel::Root => line.push(Span::styled("JSON", label_style)),
            RowLabel::Key(key) => line.push(Span::styled(format!("\"{key}\""), label_style)),
            RowLabel::Index(index) => line.push(Span::styled(index.to_string(), label_style)),
        }
        line.push(Span::styled(": ", theme.punctuation));

        if row.expanded {
            line.push(Span::styled(opening_bracket(row.value), theme.punctuation));
        } else if row.value.is_container() && row.value.child_count() == 0 {
            // Both brackets on one row: nothing to expand.
            line.push(Span::styled(empty_brackets(row.value), theme.punctuation));
        } else if let Some(text) = preview(row.value) {
            line.push(Span::styled(text, theme.preview));
        } else {
            line.push(Span::styled(
                row.value.summary(),
                theme.scalar(row.value.kind()),
            ));
        }
        lines.push(line);
    }
    lines
}

fn empty_brackets(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Array(_) => "[]",
        _ => "{}",
    }
}

fn opening_bracket(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Array(_) => "[",
        _ => "{",
    }
}

fn closing_bracket(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Array(_) => "]",
        _ => "}",
    }
}
