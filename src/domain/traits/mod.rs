//! Domain traits - Abstractions for infrastructure implementations

pub mod language;
pub mod reply;

pub use language::LanguageService;
pub use reply::ReplySink;
