use chrono::{DateTime, Utc};

/// Who authored a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One timestamped line in the conversation panel.
#[derive(Debug, Clone)]
pub struct ConversationEntry {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only conversation history for the current session.
///
/// Grows unbounded for the session's lifetime; cleared only when a new
/// session starts.
#[derive(Debug, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.entries.push(ConversationEntry {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Live speech readout: interim results are preview-only and never reach
/// the conversation log; a committed transcript replaces the preview.
#[derive(Debug, Default)]
pub struct VoicePreview {
    interim: Option<String>,
    committed: String,
}

impl VoicePreview {
    pub fn set_interim(&mut self, text: impl Into<String>) {
        self.interim = Some(text.into());
    }

    pub fn commit(&mut self, text: impl Into<String>) {
        self.interim = None;
        self.committed = text.into();
    }

    pub fn clear(&mut self) {
        self.interim = None;
        self.committed.clear();
    }

    pub fn interim(&self) -> Option<&str> {
        self.interim.as_deref()
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }
}
