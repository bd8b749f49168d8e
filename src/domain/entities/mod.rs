//! Domain entities - Core business objects with no external dependencies

pub mod category;
pub mod language;
pub mod message;
pub mod outcome;

pub use category::{Category, WatchedCategorySet};
pub use language::{DetectionResult, TranslationResult};
pub use message::IncomingMessage;
pub use outcome::ReplyOutcome;
