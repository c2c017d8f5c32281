use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::theme::Theme;
use unicode_width::UnicodeWidthStr;

/// A titled stack of lines occupying one column of the frame.
pub struct Pane {
    pub title: String,
    pub lines: Vec<SpanLine>,
    pub focused: bool,
}

impl Pane {
    pub fn new(title: impl Into<String>, lines: Vec<SpanLine>, focused: bool) -> Self {
        Self {
            title: title.into(),
            lines,
            focused,
        }
    }
}

/// Join panes side by side: each column is padded to its widest line and
/// separated by a vertical rule. Titles form the first row; the focused
/// pane's title is accented.
pub fn compose(panes: &[Pane], theme: &Theme) -> Vec<SpanLine> {
    let widths: Vec<usize> = panes
        .iter()
        .map(|pane| {
            pane.lines
                .iter()
                .map(|line| line_width(line))
                .chain([pane.title.as_str().width()])
                .max()
                .unwrap_or(0)
        })
        .collect();
    let rows = panes.iter().map(|pane| pane.lines.len()).max().unwrap_or(0);

    let mut out = Vec::with_capacity(rows + 1);

    let mut title_row: SpanLine = Vec::new();
    for (index, pane) in panes.iter().enumerate() {
        if index > 0 {
            title_row.push(Span::styled(" │ ", theme.punctuation));
        }
        let style = if pane.focused {
            theme.accent
        } else {
            theme.header
        };
        title_row.push(Span::styled(pane.title.clone(), style));
        pad_to(&mut title_row, pane.title.as_str().width(), widths[index]);
    }
    out.push(title_row);

    for row in 0..rows {
        let mut line: SpanLine = Vec::new();
        for (index, pane) in panes.iter().enumerate() {
            if index > 0 {
                line.push(Span::styled(" │ ", theme.punctuation));
            }
            let mut used = 0;
            if let Some(cells) = pane.lines.get(row) {
                used = line_width(cells);
                line.extend(cells.iter().cloned());
            }
            pad_to(&mut line, used, widths[index]);
        }
        out.push(line);
    }
    out
}

fn pad_to(line: &mut SpanLine, used: usize, width: usize) {
    if used < width {
        line.push(Span::new(" ".repeat(width - used)));
    }
}
