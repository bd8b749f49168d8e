//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Messages, categories, language results, reply outcomes
//! - Traits: Abstractions for infrastructure (LanguageService, ReplySink)

pub mod entities;
pub mod traits;
