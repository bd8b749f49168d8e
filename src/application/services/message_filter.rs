use crate::domain::entities::{Category, IncomingMessage, WatchedCategorySet};

/// Decides which messages are worth a translation attempt
#[derive(Debug, Clone)]
pub struct MessageFilter {
    watched: WatchedCategorySet,
}

impl MessageFilter {
    pub fn new(watched: WatchedCategorySet) -> Self {
        Self { watched }
    }

    pub fn watched(&self) -> &WatchedCategorySet {
        &self.watched
    }

    /// Human author, and the channel sits in a watched category.
    pub fn is_eligible(&self, message: &IncomingMessage, category: Option<&Category>) -> bool {
        if message.author_is_bot {
            return false;
        }
        category.is_some_and(|c| self.watched.contains(c.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCHED: u64 = 1380497681688035450;

    fn filter() -> MessageFilter {
        MessageFilter::new(WatchedCategorySet::new([WATCHED, 42]))
    }

    #[test]
    fn test_bot_author_never_eligible() {
        let filter = filter();
        let msg = IncomingMessage::new(7, "hola").from_bot(true);
        for id in [WATCHED, 42, 99] {
            let cat = Category::new(id, "any");
            assert!(!filter.is_eligible(&msg, Some(&cat)));
        }
        assert!(!filter.is_eligible(&msg, None));
    }

    #[test]
    fn test_uncategorised_channel_not_eligible() {
        let msg = IncomingMessage::new(7, "hola");
        assert!(!filter().is_eligible(&msg, None));
    }

    #[test]
    fn test_membership_decides() {
        let filter = filter();
        let msg = IncomingMessage::new(7, "hola");

        assert!(filter.is_eligible(&msg, Some(&Category::new(WATCHED, "international"))));
        assert!(filter.is_eligible(&msg, Some(&Category::new(42, "other"))));
        assert!(!filter.is_eligible(&msg, Some(&Category::new(43, "general"))));
        assert!(!filter.is_eligible(&msg, Some(&Category::new(0, "zero"))));
    }

    #[test]
    fn test_empty_watch_set_rejects_everything() {
        let filter = MessageFilter::new(WatchedCategorySet::default());
        let msg = IncomingMessage::new(7, "hola");
        assert!(!filter.is_eligible(&msg, Some(&Category::new(WATCHED, "x"))));
    }
}
