use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

/// Single-line editor behind the search box and the value-menu filter.
#[derive(Default)]
pub struct Inputter {
    current_input: String,
    cursor_pos: usize, // in chars
    finished: bool,
    canceled: bool,
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub canceled: bool,
    pub cursor_pos: usize,
}

impl Inputter {
    pub fn read(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.finished = true,
            (KeyCode::Esc, _) => {
                self.finished = true;
                self.canceled = true;
            }
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Left, _) => self.cursor_pos = self.cursor_pos.saturating_sub(1),
            (KeyCode::Right, _) => {
                self.cursor_pos = std::cmp::min(self.cursor_pos + 1, self.char_len())
            }
            (KeyCode::Home, _) => self.cursor_pos = 0,
            (KeyCode::End, _) => self.cursor_pos = self.char_len(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.set(""),
            (KeyCode::Char(chr), m) if !m.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_pos();
                self.current_input.insert(at, chr);
                self.cursor_pos += 1;
            }
            _ => trace!("Input ignores {:?}", key),
        }
        self.get()
    }

    /// Replace the text and move the cursor to its end.
    pub fn set(&mut self, s: &str) {
        self.current_input = s.to_string();
        self.cursor_pos = self.char_len();
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            input: self.current_input.clone(),
            finished: self.finished,
            canceled: self.canceled,
            cursor_pos: self.cursor_pos,
        }
    }

    pub fn clear(&mut self) {
        self.canceled = false;
        self.finished = false;
        self.current_input.clear();
        self.cursor_pos = 0;
    }

    fn char_len(&self) -> usize {
        self.current_input.chars().count()
    }

    fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_pos();
            self.current_input.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor_pos < self.char_len() {
            let at = self.byte_pos();
            self.current_input.remove(at);
        }
    }

    fn byte_pos(&self) -> usize {
        self.current_input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut Inputter, s: &str) {
        for c in s.chars() {
            input.read(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn edits_in_the_middle() {
        let mut input = Inputter::default();
        type_str(&mut input, "joão");
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Backspace));
        let r = input.read(key(KeyCode::Char('a')));
        assert_eq!(r.input, "joao");
        assert_eq!(r.cursor_pos, 3);
        input.read(key(KeyCode::Home));
        let r = input.read(key(KeyCode::Delete));
        assert_eq!(r.input, "oao");
    }

    #[test]
    fn enter_and_escape() {
        let mut input = Inputter::default();
        type_str(&mut input, "x");
        assert!(input.read(key(KeyCode::Enter)).finished);
        input.clear();
        let r = input.read(key(KeyCode::Esc));
        assert!(r.finished && r.canceled);
    }

    #[test]
    fn set_moves_cursor_to_end() {
        let mut input = Inputter::default();
        input.set("ção");
        assert_eq!(input.get().cursor_pos, 3);
        let r = input.read(key(KeyCode::Backspace));
        assert_eq!(r.input, "çã");
        assert_eq!(r.cursor_pos, 2);
    }
}
