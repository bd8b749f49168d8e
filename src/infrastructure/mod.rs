//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Language: LibreTranslate-compatible detect/translate client
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod language;
pub mod adapters;
