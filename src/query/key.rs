use std::collections::VecDeque;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{Error, Result};

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Escape,
    /// Ctrl+C.
    Interrupt,
    Space,
    Char(char),
    Unknown,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Self::Interrupt
            }
            _ if event.modifiers.contains(KeyModifiers::CONTROL) => Self::Unknown,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,
            KeyCode::Enter => Self::Enter,
            KeyCode::Esc => Self::Escape,
            KeyCode::Char(' ') => Self::Space,
            KeyCode::Char(c) => Self::Char(c),
            _ => Self::Unknown,
        }
    }
}

/// Where a prompt reads its keys from.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Key>;
}

/// Reads keypresses from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct EventKeys;

impl KeySource for EventKeys {
    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(event) = event::read()? {
                if event.kind == KeyEventKind::Press {
                    return Ok(event.into());
                }
            }
        }
    }
}

/// A fixed sequence of keys. Reading past the end fails with
/// [`Error::InputClosed`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or(Error::InputClosed)
    }
}
