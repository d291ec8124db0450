//! Typed-name shortcut buffer
//!
//! Characters accumulate until they spell a timer name (case-insensitive),
//! at which point the name is reported and the buffer clears. `/` clears the
//! buffer explicitly.

/// What a single keystroke did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Buffer holds a prefix of some name (or is empty)
    Pending,
    /// Buffer spelled this timer key and has been cleared
    Matched(String),
    /// `/` was typed
    Cleared,
    /// Whitespace or control character, buffer untouched
    Ignored,
}

#[derive(Debug, Clone)]
pub struct CommandBuffer {
    keys: Vec<String>,
    buffer: String,
}

impl CommandBuffer {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
            buffer: String::new(),
        }
    }

    pub fn push(&mut self, c: char) -> KeyEvent {
        if c == '/' {
            self.buffer.clear();
            return KeyEvent::Cleared;
        }
        if c.is_control() || c.is_whitespace() {
            return KeyEvent::Ignored;
        }

        self.buffer.extend(c.to_lowercase());
        if let Some(event) = self.resolve() {
            return event;
        }

        // Dead end: start over from this character
        self.buffer = c.to_lowercase().collect();
        if let Some(event) = self.resolve() {
            return event;
        }
        self.buffer.clear();
        KeyEvent::Pending
    }

    fn resolve(&mut self) -> Option<KeyEvent> {
        if let Some(key) = self.keys.iter().find(|key| **key == self.buffer) {
            let key = key.clone();
            self.buffer.clear();
            return Some(KeyEvent::Matched(key));
        }
        if self.keys.iter().any(|key| key.starts_with(&self.buffer)) {
            return Some(KeyEvent::Pending);
        }
        None
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}
