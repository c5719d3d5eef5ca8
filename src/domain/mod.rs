//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Command, Message, User, cooldown state)
//! - Traits: Abstractions for infrastructure (Bot, Clock)

pub mod entities;
pub mod traits;
