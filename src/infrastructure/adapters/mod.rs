//! Platform adapters - Discord, plus a console loop for development

pub mod console;
pub mod discord;
