//! Message dispatcher - Routes eligible messages through translation

use crate::application::services::{MessageFilter, ReplyService, TranslationService};
use crate::domain::entities::{Category, IncomingMessage, ReplyOutcome};
use crate::domain::traits::{LanguageService, ReplySink};

/// Per-message pipeline: filter, orchestrate, reply.
///
/// Holds only immutable configuration, so one instance is shared by every
/// in-flight message.
pub struct MessageDispatcher<L: LanguageService> {
    filter: MessageFilter,
    translator: TranslationService<L>,
    replies: ReplyService,
}

impl<L: LanguageService> MessageDispatcher<L> {
    pub fn new(filter: MessageFilter, translator: TranslationService<L>) -> Self {
        let replies = ReplyService::new(translator.target());
        Self {
            filter,
            translator,
            replies,
        }
    }

    pub fn filter(&self) -> &MessageFilter {
        &self.filter
    }

    pub fn translator(&self) -> &TranslationService<L> {
        &self.translator
    }

    /// Handle one message. Returns `None` when the filter rejected it,
    /// otherwise the outcome that was (or was not) replied with.
    pub async fn dispatch<R: ReplySink + ?Sized>(
        &self,
        message: &IncomingMessage,
        category: Option<&Category>,
        sink: &R,
    ) -> Option<ReplyOutcome> {
        if !self.filter.is_eligible(message, category) {
            tracing::debug!(
                "[{}] Skipping message (bot: {}, category: {:?})",
                message.channel_id,
                message.author_is_bot,
                category.map(|c| c.id)
            );
            return None;
        }

        tracing::debug!("[{}] Translating: {}", message.channel_id, message.preview());

        let outcome = self.translator.process(&message.text).await;
        match &outcome {
            ReplyOutcome::Suppressed => {
                tracing::info!("[{}] No reply needed for {}", message.channel_id, message.id);
            }
            ReplyOutcome::Translated(_) => {
                tracing::info!("[{}] Translated message {}", message.channel_id, message.id);
            }
            ReplyOutcome::Failed(cause) => {
                tracing::warn!("[{}] Translation of {} failed: {}", message.channel_id, message.id, cause);
            }
        }

        self.replies.emit(&outcome, sink).await;
        Some(outcome)
    }
}
