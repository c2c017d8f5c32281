use crate::core::highlight::Highlighter;
use crate::core::parse::Document;
use crate::core::path::NodePath;
use crate::core::selection::Selection;
use crate::core::table::{SortKey, TableSort, project};
use crate::core::tree::{TreeState, flatten};
use crate::core::value::JsonValue;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, TerminalSize};
use crate::ui::editor::{EditOutcome, Editor};
use crate::ui::layout::{Pane, compose};
use crate::ui::scroll::{Viewport, step_wrapping};
use crate::ui::source_pane::render_source;
use crate::ui::span::{Span, SpanLine};
use crate::ui::table_pane::render_table;
use crate::ui::theme::Theme;
use crate::ui::tree_pane::render_rows;

const STATUS_HINTS: &str = "Tab panes · ↑↓ move · Enter select · Space expand · ^F format · ^L clear · ^Q quit";

/// First-run document: a small object with every node kind represented, so
/// the viewer opens onto something explorable.
pub const SAMPLE_DOCUMENT: &str = r#"{
  "id": "0001",
  "type": "donut",
  "name": "Cake",
  "ppu": 0.55,
  "available": true,
  "topping": [
    { "id": "5001", "type": "None" },
    { "id": "5002", "type": "Glazed" },
    { "id": "5005", "type": "Sugar" },
    { "id": "5007", "type": "Powdered Sugar" },
    { "id": "5006", "type": "Chocolate with Sprinkles" },
    { "id": "5003", "type": "Chocolate" },
    { "id": "5004", "type": "Maple" }
  ],
  "related": null
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    Source,
    Tree,
    Table,
}

impl PaneId {
    fn next(self) -> Self {
        match self {
            Self::Source => Self::Tree,
            Self::Tree => Self::Table,
            Self::Table => Self::Source,
        }
    }

    fn prev(self) -> Self {
        self.next().next()
    }
}

/// Top-level state: the source buffer, the parsed document, and the
/// per-pane view state, with one key-dispatch entry point.
pub struct App {
    editor: Editor,
    highlighter: Highlighter,
    document: Document,
    tree_state: TreeState,
    tree_cursor: usize,
    tree_view: Viewport,
    selection: Selection,
    sort: TableSort,
    focus: PaneId,
    source_view: Viewport,
    theme: Theme,
    size: TerminalSize,
    quit: bool,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            editor: Editor::new(),
            highlighter: Highlighter::new(),
            document: Document::Empty,
            tree_state: TreeState::new(),
            tree_cursor: 0,
            tree_view: Viewport::default(),
            selection: Selection::new(),
            sort: TableSort::default(),
            focus: PaneId::Source,
            source_view: Viewport::default(),
            theme,
            size: TerminalSize {
                width: 80,
                height: 24,
            },
            quit: false,
        }
    }

    /// Load a source text as if it had been typed, parsing it immediately.
    pub fn load_source(&mut self, source: &str) {
        self.editor.set_text(source);
        self.reparse();
        if self.document.value().is_some() {
            self.focus = PaneId::Tree;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn focus(&self) -> PaneId {
        self.focus
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.size = TerminalSize { width, height };
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => {
                    self.quit = true;
                    return;
                }
                KeyCode::Char('l') => {
                    self.editor.clear();
                    self.reparse();
                    self.focus = PaneId::Source;
                    return;
                }
                KeyCode::Char('f') => {
                    self.reformat();
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            KeyCode::Esc => {
                self.quit = true;
                return;
            }
            _ => {}
        }

        match self.focus {
            PaneId::Source => {
                if self.editor.on_key(key) == EditOutcome::Edited {
                    self.reparse();
                }
            }
            PaneId::Tree => self.on_tree_key(key),
            PaneId::Table => self.on_table_key(key),
        }
    }

    fn on_tree_key(&mut self, key: KeyEvent) {
        let Some(root) = self.document.value() else {
            return;
        };
        let rows = flatten(root, &self.tree_state);
        let total = rows.len();
        let active = self.tree_cursor.min(total.saturating_sub(1));
        // Own the bits of the active row needed once `rows` is gone.
        let row = rows
            .get(active)
            .map(|row| (row.path.clone(), row.expandable(), row.expanded));
        drop(rows);

        match key.code {
            KeyCode::Up => {
                self.tree_cursor = step_wrapping(active, -1, total);
                self.tree_view.follow(self.tree_cursor, total);
            }
            KeyCode::Down => {
                self.tree_cursor = step_wrapping(active, 1, total);
                self.tree_view.follow(self.tree_cursor, total);
            }
            KeyCode::Enter => {
                if let Some((path, _, _)) = row {
                    self.selection.select(path);
                }
            }
            KeyCode::Char(' ') => self.toggle_row(row, None),
            KeyCode::Right => self.toggle_row(row, Some(true)),
            KeyCode::Left => self.toggle_row(row, Some(false)),
            _ => {}
        }
    }

    /// Toggle the container under the cursor. `want_expanded` restricts the
    /// action to one direction so Right never collapses and Left never
    /// expands. Toggling never moves the selection.
    fn toggle_row(&mut self, row: Option<(NodePath, bool, bool)>, want_expanded: Option<bool>) {
        let Some((path, expandable, expanded)) = row else {
            return;
        };
        if !expandable {
            return;
        }
        if want_expanded.is_some_and(|want| want == expanded) {
            return;
        }
        self.tree_state.toggle(&path);

        // Collapsing can shrink the visible list under the cursor.
        if let Some(root) = self.document.value() {
            let total = flatten(root, &self.tree_state).len();
            self.tree_cursor = self.tree_cursor.min(total.saturating_sub(1));
            self.tree_view.follow(self.tree_cursor, total);
        }
    }

    fn on_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => self.sort.click(SortKey::Name),
            KeyCode::Char('v') => self.sort.click(SortKey::Value),
            _ => {}
        }
    }

    /// Re-read the buffer into a fresh document. Every replacement resets
    /// expansion and selection, even when the new text parses to an equal
    /// value.
    fn reparse(&mut self) {
        self.document = Document::from_source(self.editor.text().as_str());
        self.tree_state.clear();
        self.selection.reset();
        self.tree_cursor = 0;
        self.tree_view.reset();
    }

    /// Pretty-print the current document back into the editor. Key order
    /// and number literals survive the round trip.
    fn reformat(&mut self) {
        let Some(value) = self.document.value() else {
            return;
        };
        let Ok(pretty) = serde_json::to_string_pretty(value) else {
            return;
        };
        self.editor.set_text(pretty.as_str());
        self.reparse();
    }

    pub fn render(&mut self) -> Vec<SpanLine> {
        let body_height = (self.size.height as usize).saturating_sub(3);

        let source_lines = self.render_source_pane(body_height);
        let tree_lines = self.render_tree_pane(body_height);
        let table_lines = self.render_table_pane();

        let mut frame = compose(
            &[
                Pane::new("Source", source_lines, self.focus == PaneId::Source),
                Pane::new("Tree", tree_lines, self.focus == PaneId::Tree),
                Pane::new("Properties", table_lines, self.focus == PaneId::Table),
            ],
            &self.theme,
        );
        frame.push(Vec::new());
        frame.push(self.status_line());
        frame
    }

    fn render_source_pane(&mut self, height: usize) -> Vec<SpanLine> {
        self.source_view.set_height(height.max(1));
        let total = self.editor.lines().len();
        let (cursor_row, _) = self.editor.cursor();
        self.source_view.follow(cursor_row, total);
        let window = self.source_view.window(total);

        let mut lines = render_source(
            &self.editor,
            &self.highlighter,
            (window.start, window.end),
            self.focus == PaneId::Source,
            &self.theme,
        );
        if let Some(note) = self.source_view.overflow_note(total) {
            lines.push(vec![Span::styled(note, self.theme.label)]);
        }
        lines
    }

    fn render_tree_pane(&mut self, height: usize) -> Vec<SpanLine> {
        match &self.document {
            Document::Empty => {
                vec![vec![Span::styled("no document", self.theme.placeholder)]]
            }
            Document::Failed(error) => {
                vec![vec![Span::styled(
                    format!("invalid JSON: {error}"),
                    self.theme.error,
                )]]
            }
            Document::Ready(root) => {
                let rows = flatten(root, &self.tree_state);
                let total = rows.len();
                self.tree_view.set_height(height.max(1));
                self.tree_cursor = self.tree_cursor.min(total.saturating_sub(1));
                self.tree_view.follow(self.tree_cursor, total);
                let window = self.tree_view.window(total);

                let selected = rows
                    .iter()
                    .position(|row| !row.closing && self.selection.is_selected(&row.path))
                    .unwrap_or(usize::MAX);

                let mut lines = render_rows(
                    rows.as_slice(),
                    (window.start, window.end),
                    self.tree_cursor,
                    selected,
                    self.focus == PaneId::Tree,
                    &self.theme,
                );
                if let Some(note) = self.tree_view.overflow_note(total) {
                    lines.push(vec![Span::styled(note, self.theme.label)]);
                }
                lines
            }
        }
    }

    fn render_table_pane(&self) -> Vec<SpanLine> {
        let Some(root) = self.document.value() else {
            return vec![vec![Span::styled("no document", self.theme.placeholder)]];
        };
        let selected = self.selection.resolve(root);
        let is_object = matches!(selected, JsonValue::Object(_));
        let rows = project(selected, self.sort);
        render_table(rows.as_slice(), self.sort, is_object, &self.theme)
    }

    fn status_line(&self) -> SpanLine {
        let (status, style) = match &self.document {
            Document::Empty => ("waiting for input".to_string(), self.theme.placeholder),
            Document::Ready(root) => {
                let selector = self.selection.path().to_string();
                let kind = self.selection.resolve(root).kind();
                (
                    format!("✓ valid JSON · {selector} · {kind}"),
                    self.theme.accent,
                )
            }
            Document::Failed(error) => (format!("✗ {error}"), self.theme.error),
        };
        vec![
            Span::styled(status, style),
            Span::new("  "),
            Span::styled(STATUS_HINTS, self.theme.label),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{App, PaneId};
    use crate::core::parse::Document;
    use crate::core::path::NodePath;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::theme::Theme;

    fn app_with(source: &str) -> App {
        let mut app = App::new(Theme::default_theme());
        app.load_source(source);
        app
    }

    fn frame_text(app: &mut App) -> String {
        app.render()
            .iter()
            .map(|line| crate::ui::span::line_text(line))
            .collect::<Vec<String>>()
            .join("\n")
    }

    #[test]
    fn loading_valid_json_focuses_the_tree() {
        let app = app_with(r#"{"a":1}"#);
        assert_eq!(app.focus(), PaneId::Tree);
        assert!(matches!(app.document(), Document::Ready(_)));
    }

    #[test]
    fn tab_cycles_the_panes() {
        let mut app = app_with(r#"{"a":1}"#);
        app.on_key(KeyEvent::plain(KeyCode::Tab));
        assert_eq!(app.focus(), PaneId::Table);
        app.on_key(KeyEvent::plain(KeyCode::Tab));
        assert_eq!(app.focus(), PaneId::Source);
        app.on_key(KeyEvent::plain(KeyCode::BackTab));
        assert_eq!(app.focus(), PaneId::Table);
    }

    #[test]
    fn enter_selects_and_space_only_toggles() {
        let mut app = app_with(r#"{"topping":[{"type":"Glazed"}]}"#);
        app.on_key(KeyEvent::plain(KeyCode::Down));
        app.on_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(app.selection().path().to_string(), "topping");

        // Space expands the array without moving the selection.
        app.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(app.selection().path().to_string(), "topping");
    }

    #[test]
    fn right_expands_and_left_collapses() {
        let mut app = app_with(r#"{"items":[1,2]}"#);
        app.on_key(KeyEvent::plain(KeyCode::Down));
        app.on_key(KeyEvent::plain(KeyCode::Right));
        assert!(frame_text(&mut app).contains("▼ \"items\""));
        app.on_key(KeyEvent::plain(KeyCode::Left));
        assert!(frame_text(&mut app).contains("▶ \"items\""));
        // A second Left on a collapsed node is a no-op.
        app.on_key(KeyEvent::plain(KeyCode::Left));
        assert!(frame_text(&mut app).contains("▶ \"items\""));
    }

    #[test]
    fn collapsing_above_the_cursor_pulls_it_back() {
        let mut app = app_with(r#"{"a":[1,2,3]}"#);
        app.on_key(KeyEvent::plain(KeyCode::Down));
        app.on_key(KeyEvent::plain(KeyCode::Right));
        for _ in 0..5 {
            app.on_key(KeyEvent::plain(KeyCode::Down));
        }
        // Cursor sits on the root's closing brace; Left collapses the root.
        app.on_key(KeyEvent::plain(KeyCode::Left));
        assert!(frame_text(&mut app).contains("▶ JSON: {...} 1 keys"));
        app.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(app.selection().path().is_root());
    }

    #[test]
    fn sample_document_parses_and_loads() {
        let mut app = App::new(Theme::default_theme());
        app.load_source(super::SAMPLE_DOCUMENT);
        assert!(matches!(app.document(), Document::Ready(_)));
        assert_eq!(app.focus(), PaneId::Tree);
        assert!(frame_text(&mut app).contains("\"topping\": [...] 7 items"));
    }

    #[test]
    fn editing_replaces_the_document_and_resets_state() {
        let mut app = app_with(r#"{"a":{"b":1}}"#);
        app.on_key(KeyEvent::plain(KeyCode::Down));
        app.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(!app.selection().path().is_root());

        app.on_key(KeyEvent::plain(KeyCode::BackTab));
        assert_eq!(app.focus(), PaneId::Source);
        app.on_key(KeyEvent::plain(KeyCode::End));
        app.on_key(KeyEvent::plain(KeyCode::Backspace));
        // Buffer now ends mid-object: the document fails, selection resets.
        assert!(matches!(app.document(), Document::Failed(_)));
        assert!(app.selection().path().is_root());
    }

    #[test]
    fn reformat_keeps_key_order_and_resets_selection() {
        let mut app = app_with(r#"{"zeta":1,"alpha":{"k":2}}"#);
        app.on_key(KeyEvent::plain(KeyCode::Down));
        app.on_key(KeyEvent::plain(KeyCode::Enter));

        app.on_key(KeyEvent::ctrl(KeyCode::Char('f')));
        assert!(app.selection().path().is_root());
        let Document::Ready(value) = app.document() else {
            panic!("document should stay valid after reformat");
        };
        let keys: Vec<&String> = match value {
            crate::core::value::JsonValue::Object(entries) => entries.keys().collect(),
            _ => panic!("root should stay an object"),
        };
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn clear_empties_everything() {
        let mut app = app_with(r#"{"a":1}"#);
        app.on_key(KeyEvent::ctrl(KeyCode::Char('l')));
        assert_eq!(app.document(), &Document::Empty);
        assert_eq!(app.focus(), PaneId::Source);
        assert_eq!(app.selection().path(), &NodePath::root());
    }

    #[test]
    fn ctrl_q_requests_quit() {
        let mut app = app_with("");
        assert!(!app.should_quit());
        app.on_key(KeyEvent::ctrl(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn render_produces_a_frame_for_every_document_state() {
        for source in ["", "{\"a\":1}", "{oops"] {
            let mut app = app_with(source);
            let frame = app.render();
            assert!(!frame.is_empty());
        }
    }
}
