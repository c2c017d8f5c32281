use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Buffer content changed; the document needs a re-parse.
    Edited,
    /// Cursor moved without changing content.
    Moved,
    Ignored,
}

/// Multi-line text buffer with a (row, col) cursor. Columns are char
/// offsets; the goal column is remembered across vertical movement so the
/// cursor snaps back out of short lines.
#[derive(Debug, Clone)]
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    goal_col: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            goal_col: 0,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.set_text(text);
        editor
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = 0;
        self.col = 0;
        self.goal_col = 0;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        self.lines.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Cursor position as (row, char column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn on_key(&mut self, key: KeyEvent) -> EditOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return EditOutcome::Ignored;
        }

        match key.code {
            KeyCode::Char(ch) => {
                self.insert_char(ch);
                EditOutcome::Edited
            }
            KeyCode::Enter => {
                self.split_line();
                EditOutcome::Edited
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    EditOutcome::Edited
                } else {
                    EditOutcome::Ignored
                }
            }
            KeyCode::Delete => {
                if self.delete_forward() {
                    EditOutcome::Edited
                } else {
                    EditOutcome::Ignored
                }
            }
            KeyCode::Left => {
                self.move_left();
                EditOutcome::Moved
            }
            KeyCode::Right => {
                self.move_right();
                EditOutcome::Moved
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                EditOutcome::Moved
            }
            KeyCode::Down => {
                self.move_vertical(1);
                EditOutcome::Moved
            }
            KeyCode::Home => {
                self.col = 0;
                self.goal_col = 0;
                EditOutcome::Moved
            }
            KeyCode::End => {
                self.col = self.line_len(self.row);
                self.goal_col = self.col;
                EditOutcome::Moved
            }
            _ => EditOutcome::Ignored,
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines
            .get(row)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    fn byte_at(&self, row: usize, col: usize) -> usize {
        let line = &self.lines[row];
        line.char_indices()
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }

    fn insert_char(&mut self, ch: char) {
        let byte = self.byte_at(self.row, self.col);
        self.lines[self.row].insert(byte, ch);
        self.col += 1;
        self.goal_col = self.col;
    }

    fn split_line(&mut self) {
        let byte = self.byte_at(self.row, self.col);
        let rest = self.lines[self.row].split_off(byte);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
        self.goal_col = 0;
    }

    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let byte = self.byte_at(self.row, self.col - 1);
            self.lines[self.row].remove(byte);
            self.col -= 1;
            self.goal_col = self.col;
            return true;
        }
        if self.row > 0 {
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.goal_col = self.col;
            self.lines[self.row].push_str(tail.as_str());
            return true;
        }
        false
    }

    fn delete_forward(&mut self) -> bool {
        if self.col < self.line_len(self.row) {
            let byte = self.byte_at(self.row, self.col);
            self.lines[self.row].remove(byte);
            return true;
        }
        if self.row + 1 < self.lines.len() {
            let tail = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(tail.as_str());
            return true;
        }
        false
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
        self.goal_col = self.col;
    }

    fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
        self.goal_col = self.col;
    }

    fn move_vertical(&mut self, delta: isize) {
        let next = self.row as isize + delta;
        if next < 0 || next >= self.lines.len() as isize {
            return;
        }
        self.row = next as usize;
        self.col = self.goal_col.min(self.line_len(self.row));
    }
}

#[cfg(test)]
mod tests {
    use super::{EditOutcome, Editor};
    use crate::terminal::{KeyCode, KeyEvent};

    fn type_text(editor: &mut Editor, text: &str) {
        for ch in text.chars() {
            let key = if ch == '\n' {
                KeyEvent::plain(KeyCode::Enter)
            } else {
                KeyEvent::plain(KeyCode::Char(ch))
            };
            assert_eq!(editor.on_key(key), EditOutcome::Edited);
        }
    }

    #[test]
    fn typing_builds_the_buffer() {
        let mut editor = Editor::new();
        type_text(&mut editor, "{\n  \"a\": 1\n}");
        assert_eq!(editor.text(), "{\n  \"a\": 1\n}");
        assert_eq!(editor.cursor(), (2, 1));
    }

    #[test]
    fn backspace_joins_lines_at_column_zero() {
        let mut editor = Editor::from_text("ab\ncd");
        editor.on_key(KeyEvent::plain(KeyCode::Down));
        assert_eq!(editor.cursor(), (1, 0));
        editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn delete_joins_the_next_line_at_end() {
        let mut editor = Editor::from_text("ab\ncd");
        editor.on_key(KeyEvent::plain(KeyCode::End));
        editor.on_key(KeyEvent::plain(KeyCode::Delete));
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn vertical_movement_remembers_the_goal_column() {
        let mut editor = Editor::from_text("longer line\nab\nanother long line");
        editor.on_key(KeyEvent::plain(KeyCode::End));
        editor.on_key(KeyEvent::plain(KeyCode::Down));
        assert_eq!(editor.cursor(), (1, 2));
        editor.on_key(KeyEvent::plain(KeyCode::Down));
        assert_eq!(editor.cursor(), (2, 11));
    }

    #[test]
    fn horizontal_movement_crosses_line_boundaries() {
        let mut editor = Editor::from_text("ab\ncd");
        editor.on_key(KeyEvent::plain(KeyCode::End));
        editor.on_key(KeyEvent::plain(KeyCode::Right));
        assert_eq!(editor.cursor(), (1, 0));
        editor.on_key(KeyEvent::plain(KeyCode::Left));
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut editor = Editor::new();
        type_text(&mut editor, "é😀x");
        editor.on_key(KeyEvent::plain(KeyCode::Left));
        editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(editor.text(), "éx");
    }
}
