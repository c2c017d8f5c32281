use crate::core::highlight::Highlighter;
use crate::ui::editor::Editor;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use crate::ui::theme::Theme;

/// Render the editor buffer with syntax highlighting. Tokens are produced
/// over the whole source so multi-line strings keep their class, then split
/// back into lines for display. The cursor is painted as a background cell
/// when the pane is focused.
pub fn render_source(
    editor: &Editor,
    highlighter: &Highlighter,
    range: (usize, usize),
    focused: bool,
    theme: &Theme,
) -> Vec<SpanLine> {
    if editor.is_empty() {
        let placeholder = Span::styled("paste JSON here...", theme.placeholder);
        let line = if focused {
            vec![cursor_span(' ', theme), placeholder]
        } else {
            vec![placeholder]
        };
        return vec![line];
    }

    let source = editor.text();
    let mut lines = highlight_lines(source.as_str(), highlighter, theme);
    if focused {
        let (row, col) = editor.cursor();
        if let Some(line) = lines.get_mut(row) {
            *line = paint_cursor(line.as_slice(), col, theme);
        }
    }

    let (start, end) = range;
    lines
        .into_iter()
        .take(end)
        .skip(start)
        .collect()
}

/// Tokenize the whole buffer and split token text on newlines, so every
/// returned line maps 1:1 to an editor line.
fn highlight_lines(source: &str, highlighter: &Highlighter, theme: &Theme) -> Vec<SpanLine> {
    let mut lines: Vec<SpanLine> = vec![Vec::new()];
    for token in highlighter.tokens(source) {
        let style = theme.token(token.class);
        let mut pieces = token.text.split('\n');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                last_line(&mut lines).push(Span::styled(first, style));
            }
        }
        for piece in pieces {
            lines.push(Vec::new());
            if !piece.is_empty() {
                last_line(&mut lines).push(Span::styled(piece, style));
            }
        }
    }
    lines
}

fn last_line(lines: &mut Vec<SpanLine>) -> &mut SpanLine {
    let last = lines.len() - 1;
    &mut lines[last]
}

/// Re-split a span line around the cursor column and invert that one cell.
fn paint_cursor(line: &[Span], col: usize, theme: &Theme) -> SpanLine {
    let mut out: SpanLine = Vec::with_capacity(line.len() + 2);
    let mut offset = 0usize;
    let mut painted = false;

    for span in line {
        let len = span.text.chars().count();
        if painted || col >= offset + len {
            out.push(span.clone());
            offset += len;
            continue;
        }

        let split = col - offset;
        let before: String = span.text.chars().take(split).collect();
        let under: char = span.text.chars().nth(split).unwrap_or(' ');
        let after: String = span.text.chars().skip(split + 1).collect();
        if !before.is_empty() {
            out.push(Span::styled(before, span.style));
        }
        out.push(cursor_span(under, theme));
        if !after.is_empty() {
            out.push(Span::styled(after, span.style));
        }
        offset += len;
        painted = true;
    }

    // Cursor past the end of the line gets an inverted blank cell.
    if !painted {
        out.push(cursor_span(' ', theme));
    }
    out
}

fn cursor_span(under: char, theme: &Theme) -> Span {
    let style = Style::new()
        .color(crate::ui::style::Color::Black)
        .background(theme.accent.color.unwrap_or(crate::ui::style::Color::White));
    Span::styled(under.to_string(), style)
}

#[cfg(test)]
mod tests {
    use super::render_source;
    use crate::core::highlight::{Highlighter, TokenClass};
    use crate::ui::editor::Editor;
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;

    #[test]
    fn lines_round_trip_through_highlighting() {
        let editor = Editor::from_text("{\n  \"a\": [1, true]\n}");
        let lines = render_source(
            &editor,
            &Highlighter::new(),
            (0, 3),
            false,
            &Theme::default_theme(),
        );
        let text: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(text, vec!["{", "  \"a\": [1, true]", "}"]);
    }

    #[test]
    fn key_and_literal_spans_take_token_styles() {
        let theme = Theme::default_theme();
        let editor = Editor::from_text("{\"a\": null}");
        let lines = render_source(&editor, &Highlighter::new(), (0, 1), false, &theme);
        let key = lines[0]
            .iter()
            .find(|span| span.text == "\"a\":")
            .expect("key token should render as one span");
        assert_eq!(key.style, theme.token(TokenClass::Key));
        let null = lines[0]
            .iter()
            .find(|span| span.text == "null")
            .expect("null token should render");
        assert_eq!(null.style, theme.token(TokenClass::Null));
    }

    #[test]
    fn focused_cursor_inverts_one_cell() {
        let editor = Editor::from_text("ab");
        let lines = render_source(
            &editor,
            &Highlighter::new(),
            (0, 1),
            true,
            &Theme::default_theme(),
        );
        // Cursor sits at (0, 0): the "a" cell carries a background.
        let first = &lines[0][0];
        assert_eq!(first.text, "a");
        assert!(first.style.background.is_some());
        assert_eq!(line_text(&lines[0]), "ab");
    }

    #[test]
    fn empty_buffer_shows_the_placeholder() {
        let editor = Editor::new();
        let lines = render_source(
            &editor,
            &Highlighter::new(),
            (0, 1),
            false,
            &Theme::default_theme(),
        );
        assert_eq!(line_text(&lines[0]), "paste JSON here...");
    }
}
