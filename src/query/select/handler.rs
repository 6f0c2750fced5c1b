use std::cmp::min;

use crate::{item::Choice, query::Key, style::Style};

/// Number of rows shown at once unless configured otherwise.
pub const DEFAULT_ROWS: usize = 7;

/// What a select prompt currently has selected.
#[derive(Debug)]
pub enum Selected<'a> {
    /// Single-choice mode: the focused choice, if the list is not empty.
    One(Option<&'a Choice>),
    /// Multiple-choice mode: selected choices in list order.
    Many(Vec<&'a Choice>),
}

/// Owns the choices of a select prompt, the cursor and the visible page.
///
/// The cursor is an absolute position in the list. Only `rows` choices
/// starting at `offset` are visible, and the page scrolls so that the
/// cursor is always inside it.
#[derive(Debug)]
pub struct ListHandler {
    list: Vec<Choice>,
    cursor: usize,
    offset: usize,
    rows: usize,
}

impl ListHandler {
    pub fn new(list: Vec<Choice>) -> Self {
        Self {
            list,
            cursor: 0,
            offset: 0,
            rows: DEFAULT_ROWS,
        }
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows.max(1);
        self.offset = 0;
        self.scroll();
        self
    }

    /// Moves the cursor to `index`, clamped to the list.
    pub fn with_cursor(mut self, index: usize) -> Self {
        self.cursor = min(index, self.list.len().saturating_sub(1));
        self.scroll();
        self
    }

    pub fn choices(&self) -> &[Choice] {
        &self.list
    }

    pub fn visible(&self) -> &[Choice] {
        let end = min(self.offset + self.rows, self.list.len());
        &self.list[self.offset..end]
    }

    /// Position of the cursor inside [`visible`](Self::visible).
    pub fn index(&self) -> usize {
        self.cursor - self.offset
    }

    pub fn focused(&self) -> Option<&Choice> {
        self.list.get(self.cursor)
    }

    pub fn selected(&self, multiple: bool) -> Selected<'_> {
        if multiple {
            Selected::Many(self.list.iter().filter(|c| c.is_selected()).collect())
        } else {
            Selected::One(self.focused())
        }
    }

    fn scroll(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.rows {
            self.offset = self.cursor + 1 - self.rows;
        }
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        self.cursor = cursor;
        self.scroll();
        true
    }

    /// Handles a movement key and returns `true` if it was handled.
    ///
    /// Up and Down wrap around the ends of the list.
    pub fn on_key(&mut self, key: Key) -> bool {
        let len = self.list.len();
        if len == 0 {
            return false;
        }
        match key {
            Key::Up => self.move_to((self.cursor + len - 1) % len),
            Key::Down => self.move_to((self.cursor + 1) % len),
            Key::Home => self.move_to(0),
            Key::End => self.move_to(len - 1),
            Key::PageUp => self.move_to(self.cursor.saturating_sub(self.rows)),
            Key::PageDown => self.move_to(min(self.cursor + self.rows, len - 1)),
            _ => false,
        }
    }

    /// Handles the keys every list understands besides movement.
    ///
    /// Digits focus the n-th visible choice. Returns `false` for anything
    /// else so the caller can alert.
    pub fn dispatch(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => c
                .to_digit(10)
                .is_some_and(|n| self.focus_number(n as usize)),
            _ => false,
        }
    }

    /// Focuses the `n`-th visible choice, counting from one.
    pub fn focus_number(&mut self, n: usize) -> bool {
        if n == 0 || n > self.visible().len() {
            return false;
        }
        self.move_to(self.offset + n - 1)
    }

    /// Toggles the focused choice. Disabled choices cannot be toggled.
    pub fn toggle(&mut self) -> bool {
        match self.list.get_mut(self.cursor) {
            Some(choice) if !choice.disabled => {
                choice.selected = !choice.selected;
                true
            }
            _ => false,
        }
    }

    /// Selects every enabled choice, or clears them all if they already are.
    pub fn toggle_all(&mut self) -> bool {
        let mut enabled = self.list.iter_mut().filter(|c| !c.disabled).peekable();
        if enabled.peek().is_none() {
            return false;
        }
        let enabled: Vec<_> = enabled.collect();
        let select = !enabled.iter().all(|c| c.selected);
        for choice in enabled {
            choice.selected = select;
        }
        true
    }

    pub fn invert(&mut self) -> bool {
        let mut changed = false;
        for choice in self.list.iter_mut().filter(|c| !c.disabled) {
            choice.selected = !choice.selected;
            changed = true;
        }
        changed
    }

    pub fn pointer(&self, style: &impl Style, focused: bool) -> String {
        if focused {
            style.em("❯")
        } else {
            " ".to_string()
        }
    }

    pub fn indicator(&self, style: &impl Style, choice: &Choice) -> String {
        if choice.disabled {
            style.disabled("◯")
        } else if choice.is_selected() {
            style.success("◉")
        } else {
            style.muted("◯")
        }
    }

    /// Names of the selected choices.
    pub fn get_result(&self, multiple: bool) -> Vec<String> {
        match self.selected(multiple) {
            Selected::One(choice) => choice.map(|c| c.name.clone()).into_iter().collect(),
            Selected::Many(choices) => choices.into_iter().map(|c| c.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::style::PlainStyle;

    fn handler(names: &[&str]) -> ListHandler {
        ListHandler::new(names.iter().copied().map(Choice::from).collect())
    }

    fn names(choices: &[Choice]) -> Vec<&str> {
        choices.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn up_and_down_wrap() {
        let mut h = handler(&["a", "b", "c"]);
        assert!(h.on_key(Key::Up));
        assert_eq!(h.focused().unwrap().name, "c");
        assert!(h.on_key(Key::Down));
        assert_eq!(h.focused().unwrap().name, "a");
    }

    #[test]
    fn page_scrolls_with_cursor() {
        let mut h = handler(&["a", "b", "c", "d", "e"]).with_rows(2);
        assert_eq!(names(h.visible()), ["a", "b"]);
        h.on_key(Key::Down);
        h.on_key(Key::Down);
        assert_eq!(names(h.visible()), ["b", "c"]);
        assert_eq!(h.index(), 1);
        h.on_key(Key::End);
        assert_eq!(names(h.visible()), ["d", "e"]);
        h.on_key(Key::Down);
        assert_eq!(names(h.visible()), ["a", "b"]);
        assert_eq!(h.index(), 0);
        h.on_key(Key::PageDown);
        assert_eq!(h.focused().unwrap().name, "c");
        h.on_key(Key::PageUp);
        assert_eq!(h.focused().unwrap().name, "a");
    }

    #[test]
    fn navigation_keeps_index_inside_visible() {
        let keys = [
            Key::Down,
            Key::PageDown,
            Key::Up,
            Key::End,
            Key::Down,
            Key::PageUp,
            Key::Home,
            Key::Up,
            Key::Up,
        ];
        for rows in 1..6 {
            let mut h = handler(&["a", "b", "c", "d"]).with_rows(rows);
            for key in keys {
                h.on_key(key);
                assert!(h.index() < h.visible().len());
                assert_eq!(h.visible()[h.index()].name, h.focused().unwrap().name);
            }
        }
    }

    #[test]
    fn empty_list_ignores_movement() {
        let mut h = handler(&[]);
        assert!(!h.on_key(Key::Down));
        assert!(h.focused().is_none());
        assert!(h.visible().is_empty());
        assert!(!h.toggle());
        assert!(!h.toggle_all());
    }

    #[test]
    fn initial_cursor_is_clamped() {
        let h = handler(&["a", "b", "c"]).with_rows(2).with_cursor(10);
        assert_eq!(h.focused().unwrap().name, "c");
        assert_eq!(names(h.visible()), ["b", "c"]);
    }

    #[test]
    fn toggles_respect_disabled_choices() {
        let mut h = ListHandler::new(vec![
            Choice::new("a"),
            Choice::new("b").disabled(),
            Choice::new("c"),
        ]);
        assert!(h.toggle());
        h.on_key(Key::Down);
        assert!(!h.toggle());
        assert_eq!(h.get_result(true), ["a"]);

        assert!(h.toggle_all());
        assert_eq!(h.get_result(true), ["a", "c"]);
        assert!(h.toggle_all());
        assert!(h.get_result(true).is_empty());

        h.on_key(Key::Home);
        h.toggle();
        assert!(h.invert());
        assert_eq!(h.get_result(true), ["c"]);
    }

    #[test]
    fn digits_focus_visible_choices() {
        let mut h = handler(&["a", "b", "c"]);
        assert!(h.dispatch(Key::Char('3')));
        assert_eq!(h.focused().unwrap().name, "c");
        assert!(!h.dispatch(Key::Char('4')));
        assert!(!h.dispatch(Key::Char('0')));
        assert!(!h.dispatch(Key::Char('x')));
        assert_eq!(h.focused().unwrap().name, "c");
    }

    #[test]
    fn single_result_is_focused_choice() {
        let mut h = handler(&["a", "b"]);
        h.on_key(Key::Down);
        assert_eq!(h.get_result(false), ["b"]);
    }

    #[test]
    fn glyphs() {
        let h = handler(&["a"]);
        assert_eq!(h.pointer(&PlainStyle, true), "❯");
        assert_eq!(h.pointer(&PlainStyle, false), " ");
        assert_eq!(h.indicator(&PlainStyle, &Choice::new("x").selected(true)), "◉");
        assert_eq!(h.indicator(&PlainStyle, &Choice::new("x")), "◯");
    }
}
