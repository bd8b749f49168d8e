use std::fmt;

/// What a single message's orchestration decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Already in the target language; nothing to post.
    Suppressed,
    /// Translated text to post.
    Translated(String),
    /// Human-readable cause of a detect/translate failure.
    Failed(String),
}

impl ReplyOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            ReplyOutcome::Suppressed => "suppressed",
            ReplyOutcome::Translated(_) => "translated",
            ReplyOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, ReplyOutcome::Suppressed)
    }
}

impl fmt::Display for ReplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
