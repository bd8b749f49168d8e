//! Formats orchestration outcomes and posts them as replies

use crate::domain::entities::language;
use crate::domain::entities::ReplyOutcome;
use crate::domain::traits::ReplySink;

/// Discord rejects messages longer than this many characters.
pub const MAX_REPLY_CHARS: usize = 2000;

/// Service for turning a ReplyOutcome into at most one reply
#[derive(Debug, Clone)]
pub struct ReplyService {
    target: String,
}

impl ReplyService {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Reply text for `outcome`, or `None` when nothing should be sent.
    pub fn format(&self, outcome: &ReplyOutcome) -> Option<String> {
        let text = match outcome {
            ReplyOutcome::Suppressed => return None,
            ReplyOutcome::Translated(text) => format!(
                "{} ({}): {}",
                language::flag(&self.target),
                self.target,
                text
            ),
            ReplyOutcome::Failed(cause) => format!("❌ Auto-translate failed: {}", cause),
        };
        Some(truncate(text, MAX_REPLY_CHARS))
    }

    /// Post the reply for `outcome`. Best effort: send failures are logged
    /// and dropped. Returns whether a reply was delivered.
    pub async fn emit<R: ReplySink + ?Sized>(&self, outcome: &ReplyOutcome, sink: &R) -> bool {
        let Some(text) = self.format(outcome) else {
            return false;
        };

        match sink.send_reply(&text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send {} reply: {}", outcome, e);
                false
            }
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        return text;
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
