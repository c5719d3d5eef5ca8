//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Catalog: The fixed command set
//! - Services: Message processing loop
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and cooldown-gated dispatching
//! - Bootstrap: Startup sequence

pub mod bootstrap;
pub mod catalog;
pub mod errors;
pub mod services;
pub mod messaging;
