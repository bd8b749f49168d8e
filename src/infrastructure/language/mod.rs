//! Language service integration - LibreTranslate-compatible HTTP API

pub mod config;
pub mod libretranslate;

#[cfg(test)]
mod tests;

pub use config::ServiceConfig;
pub use libretranslate::LibreTranslateClient;
