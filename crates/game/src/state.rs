//! Presentation state: which screen is showing and the feedback log.
//!
//! Nothing here affects game rules. Screens are pure view toggles and messages
//! are only ever read by the front end.

/// Which panel the front end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title screen before the first `start`.
    Start,
    /// Question panel.
    Quiz,
    /// Planet selection panel.
    PlanetSelection,
}

/// Tone of a feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
}

/// One feedback line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub text: String,
    pub kind: MessageKind,
}

/// Feedback lines waiting to be shown. Oldest lines drop off past the cap.
#[derive(Debug, Clone)]
pub struct GameMessages {
    messages: Vec<GameMessage>,
    capacity: usize,
}

impl Default for GameMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMessages {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            capacity: 50,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.messages.push(GameMessage { text: text.into(), kind });
        if self.messages.len() > self.capacity {
            self.messages.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, MessageKind::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, MessageKind::Success);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, MessageKind::Warning);
    }

    /// Most recent line, if any.
    #[cfg(test)]
    pub(crate) fn latest(&self) -> Option<&GameMessage> {
        self.messages.last()
    }

    /// Hand every pending line to the caller, oldest first.
    pub fn drain(&mut self) -> Vec<GameMessage> {
        std::mem::take(&mut self.messages)
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
