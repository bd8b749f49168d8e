/// A message delivered by the chat platform.
///
/// Transient: built per event by an adapter and dropped once handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: String,
    pub channel_id: u64,
    pub author_is_bot: bool,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(channel_id: u64, text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            channel_id,
            author_is_bot: false,
            text: text.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn from_bot(mut self, is_bot: bool) -> Self {
        self.author_is_bot = is_bot;
        self
    }

    /// Short preview used in log lines.
    pub fn preview(&self) -> String {
        let mut preview: String = self.text.chars().take(50).collect();
        if self.text.chars().count() > 50 {
            preview.push('…');
        }
        preview
    }
}
