#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;

use crate::domain::models::CursorMove;
use crate::domain::models::Field;
use crate::domain::models::Focus;
use crate::domain::models::FormulaDraft;
use crate::domain::models::Symbol;

fn byte_offset(text: &str, char_idx: usize) -> usize {
    return text
        .char_indices()
        .nth(char_idx)
        .map(|(offset, _)| return offset)
        .unwrap_or(text.len());
}

fn splice(text: &str, start: usize, end: usize, insert: &str) -> String {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);

    return format!("{}{insert}{}", &text[..start_byte], &text[end_byte..]);
}

/// Owns the premise and conclusion being composed, which of the two has
/// focus, and the selection inside the focused field.
///
/// Symbol insertion replaces the selection right away but only moves the
/// caret behind the inserted symbol once the new text has been rendered, see
/// [`FormulaComposer::after_render`].
#[derive(Default)]
pub struct FormulaComposer {
    draft: FormulaDraft,
    pending_cursor: Option<usize>,
    selection_anchor: Option<usize>,
}

impl FormulaComposer {
    pub fn draft(&self) -> &FormulaDraft {
        return &self.draft;
    }

    pub fn premise(&self) -> &str {
        return &self.draft.premise;
    }

    pub fn conclusion(&self) -> &str {
        return &self.draft.conclusion;
    }

    pub fn focus(&self) -> Focus {
        return self.draft.focus;
    }

    pub fn cursor(&self) -> (usize, usize) {
        return (self.draft.cursor_start, self.draft.cursor_end);
    }

    pub fn pending_cursor(&self) -> Option<usize> {
        return self.pending_cursor;
    }

    /// Where the terminal cursor is drawn. For a selection that is the end
    /// being moved.
    pub fn caret(&self) -> usize {
        let (start, end) = self.cursor();
        if self.selection_anchor == Some(end) {
            return start;
        }

        return end;
    }

    /// An empty premise is rejected before it ever reaches the solve workflow.
    pub fn is_submittable(&self) -> bool {
        return !self.draft.premise.is_empty();
    }

    pub fn record_focus(&mut self, field: Field, cursor_start: usize, cursor_end: usize) {
        let len = self.draft.char_len(field);
        let start = cursor_start.min(cursor_end).min(len);
        let end = cursor_start.max(cursor_end).min(len);

        self.draft.focus = field.into();
        self.draft.cursor_start = start;
        self.draft.cursor_end = end;
        self.pending_cursor = None;
        self.selection_anchor = None;
    }

    pub fn clear_focus(&mut self) {
        self.draft.focus = Focus::None;
        self.draft.cursor_start = 0;
        self.draft.cursor_end = 0;
        self.pending_cursor = None;
        self.selection_anchor = None;
    }

    /// Moves focus to the next field with the caret at the end of its text.
    pub fn cycle_focus(&mut self) {
        let next = match self.draft.focus {
            Focus::None | Focus::Conclusion => Field::Premise,
            Focus::Premise => Field::Conclusion,
        };

        let len = self.draft.char_len(next);
        self.record_focus(next, len, len);
    }

    pub fn set_premise(&mut self, text: &str) {
        self.set_text(Field::Premise, text);
    }

    pub fn set_conclusion(&mut self, text: &str) {
        self.set_text(Field::Conclusion, text);
    }

    fn set_text(&mut self, field: Field, text: &str) {
        *self.draft.text_mut(field) = text.to_string();

        if self.draft.focus.field() == Some(field) {
            self.clamp_cursor(field);
            self.selection_anchor = None;
        }
    }

    fn clamp_cursor(&mut self, field: Field) {
        let len = self.draft.char_len(field);
        self.draft.cursor_start = self.draft.cursor_start.min(len);
        self.draft.cursor_end = self.draft.cursor_end.min(len);
    }

    /// Replaces the selection of the focused field with the symbol. Returns
    /// false without touching the draft when no field has focus.
    pub fn insert_symbol(&mut self, symbol: Symbol) -> bool {
        self.after_render();

        let field = match self.draft.focus.field() {
            Some(field) => field,
            None => return false,
        };

        let (start, end) = self.cursor();
        let text = splice(self.draft.text(field), start, end, &symbol.to_string());
        *self.draft.text_mut(field) = text;

        self.clamp_cursor(field);
        self.selection_anchor = None;
        self.pending_cursor = Some(start + symbol.char_len());

        return true;
    }

    /// Applies the caret position scheduled by `insert_symbol`. Called once
    /// the updated text has been drawn.
    pub fn after_render(&mut self) {
        let pos = match self.pending_cursor.take() {
            Some(pos) => pos,
            None => return,
        };

        if let Some(field) = self.draft.focus.field() {
            let pos = pos.min(self.draft.char_len(field));
            self.draft.cursor_start = pos;
            self.draft.cursor_end = pos;
        }
    }

    /// Typed or pasted text. Line breaks are dropped since both fields are
    /// single line.
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.after_render();

        let field = match self.draft.focus.field() {
            Some(field) => field,
            None => return false,
        };

        let text = text.replace(['\n', '\r'], "");
        let (start, end) = self.cursor();
        let updated = splice(self.draft.text(field), start, end, &text);
        *self.draft.text_mut(field) = updated;

        let pos = start + text.chars().count();
        self.draft.cursor_start = pos;
        self.draft.cursor_end = pos;
        self.selection_anchor = None;

        return true;
    }

    pub fn delete_backward(&mut self) -> bool {
        self.after_render();

        let field = match self.draft.focus.field() {
            Some(field) => field,
            None => return false,
        };

        let (mut start, end) = self.cursor();
        if start == end {
            if start == 0 {
                return false;
            }
            start -= 1;
        }

        let updated = splice(self.draft.text(field), start, end, "");
        *self.draft.text_mut(field) = updated;
        self.draft.cursor_start = start;
        self.draft.cursor_end = start;
        self.selection_anchor = None;

        return true;
    }

    pub fn delete_forward(&mut self) -> bool {
        self.after_render();

        let field = match self.draft.focus.field() {
            Some(field) => field,
            None => return false,
        };

        let (start, mut end) = self.cursor();
        if start == end {
            if end == self.draft.char_len(field) {
                return false;
            }
            end += 1;
        }

        let updated = splice(self.draft.text(field), start, end, "");
        *self.draft.text_mut(field) = updated;
        self.draft.cursor_start = start;
        self.draft.cursor_end = start;
        self.selection_anchor = None;

        return true;
    }

    /// Moves the caret. With `extend` the selection grows or shrinks from the
    /// position where extending started.
    pub fn move_cursor(&mut self, movement: CursorMove, extend: bool) {
        self.after_render();

        let field = match self.draft.focus.field() {
            Some(field) => field,
            None => return,
        };

        let len = self.draft.char_len(field);
        let (start, end) = self.cursor();

        if !extend {
            self.selection_anchor = None;
            let pos = match movement {
                CursorMove::Left if start != end => start,
                CursorMove::Right if start != end => end,
                CursorMove::Left => start.saturating_sub(1),
                CursorMove::Right => (end + 1).min(len),
                CursorMove::Home => 0,
                CursorMove::End => len,
            };
            self.draft.cursor_start = pos;
            self.draft.cursor_end = pos;
            return;
        }

        let anchor = *self.selection_anchor.get_or_insert(start);
        let head = if anchor == start { end } else { start };
        let head = match movement {
            CursorMove::Left => head.saturating_sub(1),
            CursorMove::Right => (head + 1).min(len),
            CursorMove::Home => 0,
            CursorMove::End => len,
        };

        self.draft.cursor_start = anchor.min(head);
        self.draft.cursor_end = anchor.max(head);
    }

    pub fn select_all(&mut self) {
        self.after_render();

        if let Some(field) = self.draft.focus.field() {
            self.draft.cursor_start = 0;
            self.draft.cursor_end = self.draft.char_len(field);
            self.selection_anchor = Some(0);
        }
    }
}
