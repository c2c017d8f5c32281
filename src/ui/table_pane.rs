use crate::core::table::{SortDirection, SortKey, TableSort};
use crate::core::value::JsonValue;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use unicode_width::UnicodeWidthStr;

const NAME_HEADER: &str = "Name";
const VALUE_HEADER: &str = "Value";

/// Render the property table for the selected node. Non-object selections
/// produce a single placeholder line.
pub fn render_table(
    rows: &[(&str, &JsonValue)],
    sort: TableSort,
    is_object: bool,
    theme: &Theme,
) -> Vec<SpanLine> {
    if !is_object {
        return vec![vec![Span::styled(
            "select an object to view its properties",
            theme.placeholder,
        )]];
    }

    let name_header = header_text(NAME_HEADER, SortKey::Name, sort);
    let value_header = header_text(VALUE_HEADER, SortKey::Value, sort);

    let empty_note = if rows.is_empty() {
        "(no properties)".width()
    } else {
        0
    };
    let name_width = rows
        .iter()
        .map(|(key, _)| key.width())
        .chain([name_header.as_str().width(), empty_note])
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.summary().as_str().width())
        .chain([value_header.as_str().width()])
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border_line('┌', '┬', '┐', name_width, value_width, theme));

    let sorted_key = |key: SortKey| sort.key == key;
    lines.push(vec![
        Span::styled("│ ", theme.punctuation),
        Span::styled(
            pad(name_header.as_str(), name_width),
            header_style(sorted_key(SortKey::Name), theme),
        ),
        Span::styled(" │ ", theme.punctuation),
        Span::styled(
            pad(value_header.as_str(), value_width),
            header_style(sorted_key(SortKey::Value), theme),
        ),
        Span::styled(" │", theme.punctuation),
    ]);
    lines.push(border_line('├', '┼', '┤', name_width, value_width, theme));

    if rows.is_empty() {
        lines.push(vec![
            Span::styled("│ ", theme.punctuation),
            Span::styled(pad("(no properties)", name_width), theme.placeholder),
            Span::styled(" │ ", theme.punctuation),
            Span::new(pad("", value_width)),
            Span::styled(" │", theme.punctuation),
        ]);
    }

    for (key, value) in rows {
        lines.push(vec![
            Span::styled("│ ", theme.punctuation),
            Span::styled(pad(key, name_width), theme.key),
            Span::styled(" │ ", theme.punctuation),
            Span::styled(
                pad(value.summary().as_str(), value_width),
                theme.scalar(value.kind()),
            ),
            Span::styled(" │", theme.punctuation),
        ]);
    }

    lines.push(border_line('└', '┴', '┘', name_width, value_width, theme));
    lines
}

/// Header caption with its sort marker: the active column shows the
/// direction, the other an idle `↕`.
fn header_text(caption: &str, key: SortKey, sort: TableSort) -> String {
    let marker = if sort.key == key {
        match sort.direction {
            SortDirection::Asc => '↑',
            SortDirection::Desc => '↓',
        }
    } else {
        '↕'
    };
    format!("{caption} {marker}")
}

fn header_style(sorted: bool, theme: &Theme) -> crate::ui::style::Style {
    if sorted { theme.accent } else { theme.header }
}

fn pad(text: &str, width: usize) -> String {
    let deficit = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(deficit))
}

fn border_line(
    left: char,
    middle: char,
    right: char,
    name_width: usize,
    value_width: usize,
    theme: &Theme,
) -> SpanLine {
    let mut text = String::new();
    text.push(left);
    text.push_str("─".repeat(name_width + 2).as_str());
    text.push(middle);
    text.push_str("─".repeat(value_width + 2).as_str());
    text.push(right);
    vec![Span::styled(text, theme.punctuation)]
}

#[cfg(test)]
mod tests {
    use super::render_table;
    use crate::core::parse::parse_source;
    use crate::core::table::{SortDirection, SortKey, TableSort, project};
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;

    #[test]
    fn object_rows_render_inside_the_grid() {
        let doc = parse_source(r#"{"name":"donut","ppu":0.55}"#).expect("document should parse");
        let sort = TableSort::default();
        let rows = project(&doc, sort);
        let lines = render_table(rows.as_slice(), sort, true, &Theme::default_theme());

        let text: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(text[1], "│ Name ↑ │ Value ↕ │");
        assert_eq!(text[3], "│ name   │ \"donut\" │");
        assert_eq!(text[4], "│ ppu    │ 0.55    │");
        assert!(text[0].starts_with('┌'));
        assert!(text[5].starts_with('└'));
    }

    #[test]
    fn sorted_column_shows_its_direction() {
        let sort = TableSort {
            key: SortKey::Value,
            direction: SortDirection::Desc,
        };
        let lines = render_table(&[], sort, true, &Theme::default_theme());
        let header = line_text(&lines[1]);
        assert!(header.contains("Name ↕"));
        assert!(header.contains("Value ↓"));
    }

    #[test]
    fn non_object_selection_shows_the_placeholder() {
        let lines = render_table(&[], TableSort::default(), false, &Theme::default_theme());
        assert_eq!(lines.len(), 1);
        assert_eq!(
            line_text(&lines[0]),
            "select an object to view its properties"
        );
    }

    #[test]
    fn empty_object_still_draws_the_grid() {
        let lines = render_table(&[], TableSort::default(), true, &Theme::default_theme());
        let text: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(text.len(), 5);
        assert!(text[3].contains("(no properties)"));
    }
}
