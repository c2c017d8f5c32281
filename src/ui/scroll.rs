use std::ops::Range;

/// Window of `height` lines over a longer list, tracked by its top line.
/// The cursor itself lives with the pane; the viewport only follows it.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    top: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self { top: 0, height }
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    pub fn reset(&mut self) {
        self.top = 0;
    }

    /// Slide the window the minimal distance that brings `line` inside it,
    /// then clamp the window to the list.
    pub fn follow(&mut self, line: usize, total: usize) {
        if self.height == 0 || total <= self.height {
            self.top = 0;
            return;
        }
        if line < self.top {
            self.top = line;
        } else if line >= self.top + self.height {
            self.top = line + 1 - self.height;
        }
        self.top = self.top.min(total - self.height);
    }

    pub fn window(&self, total: usize) -> Range<usize> {
        if self.height == 0 {
            return 0..total;
        }
        let start = self.top.min(total);
        start..(start + self.height).min(total)
    }

    /// How many lines are hidden on each side, as a short status fragment.
    /// `None` when the whole list fits.
    pub fn overflow_note(&self, total: usize) -> Option<String> {
        if self.height == 0 || total <= self.height {
            return None;
        }
        let window = self.window(total);
        let mut note = String::new();
        if window.start > 0 {
            note.push_str(format!("↑ {}", window.start).as_str());
        }
        if window.end < total {
            if !note.is_empty() {
                note.push_str("  ");
            }
            note.push_str(format!("↓ {}", total - window.end).as_str());
        }
        Some(note)
    }
}

/// Cursor step with wrap-around at both ends of the list.
pub fn step_wrapping(current: usize, delta: isize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let len = total as isize;
    let clamped = (current.min(total - 1)) as isize;
    ((clamped + delta).rem_euclid(len)) as usize
}
