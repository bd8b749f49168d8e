//! Application services - Per-message business logic

pub mod message_filter;
pub mod reply_service;
pub mod translation_service;

pub use message_filter::MessageFilter;
pub use reply_service::ReplyService;
pub use translation_service::{SourceStrategy, TranslationService};
