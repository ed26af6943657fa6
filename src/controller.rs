use std::time::Duration;
use tracing::trace;

use crate::domain::{Message, SVConfig, SVError};
use crate::model::Model;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &SVConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, SVError> {
        if !event::poll(Duration::from_millis(self.event_poll_time))? {
            return Ok(None);
        }
        let message = match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                if model.raw_keyevents() {
                    Some(Message::RawKey(key))
                } else {
                    Self::handle_key(key)
                }
            }
            Event::Resize(width, height) => Some(Message::Resize(width as usize, height as usize)),
            _ => None,
        };
        Ok(message)
    }

    pub fn handle_key(key: KeyEvent) -> Option<Message> {
        let message = match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Char('q'), _) => Some(Message::Quit),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Some(Message::MoveUp),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Some(Message::MoveDown),
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Some(Message::MoveLeft),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Some(Message::MoveRight),
            (KeyCode::Char('n'), _) | (KeyCode::PageDown, _) => Some(Message::NextPage),
            (KeyCode::Char('p'), _) | (KeyCode::PageUp, _) => Some(Message::PrevPage),
            (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(Message::FirstPage),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(Message::LastPage),
            (KeyCode::Char('+'), _) => Some(Message::NextPageSize),
            (KeyCode::Char('-'), _) => Some(Message::PrevPageSize),
            (KeyCode::Char('/'), _) => Some(Message::Search),
            (KeyCode::Char('x'), _) => Some(Message::ClearQuery),
            (KeyCode::Char('c'), _) => Some(Message::ChooseColumn),
            (KeyCode::Char('v'), _) => Some(Message::ValueMenu),
            (KeyCode::Char('X'), _) => Some(Message::ClearValues),
            (KeyCode::Char(' '), _) => Some(Message::Toggle),
            (KeyCode::Char('s'), _) => Some(Message::Sort),
            (KeyCode::Char('r'), _) => Some(Message::Clear),
            (KeyCode::Char('R'), _) | (KeyCode::F(5), _) => Some(Message::Refresh),
            (KeyCode::Char('e'), _) => Some(Message::Export),
            (KeyCode::Char('y'), _) => Some(Message::CopyView),
            (KeyCode::Char('?'), _) => Some(Message::Help),
            (KeyCode::Enter, _) => Some(Message::Enter),
            (KeyCode::Esc, _) => Some(Message::Exit),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
        Controller::handle_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn maps_keys() {
        assert_eq!(press(KeyCode::Char('q'), KeyModifiers::NONE), Some(Message::Quit));
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Message::Quit));
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::NONE), Some(Message::ChooseColumn));
        assert_eq!(press(KeyCode::Char('R'), KeyModifiers::SHIFT), Some(Message::Refresh));
        assert_eq!(press(KeyCode::PageDown, KeyModifiers::NONE), Some(Message::NextPage));
        assert_eq!(press(KeyCode::Char('Z'), KeyModifiers::SHIFT), None);
    }
}
