//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Filtering, translation orchestration, reply formatting
//! - Errors: Domain-specific errors
//! - Messaging: Per-message dispatching

pub mod errors;
pub mod services;
pub mod messaging;
