//! Message handling - Command parsing and cooldown-gated dispatch

pub mod dispatcher;
pub mod parser;

pub use dispatcher::CommandDispatcher;
pub use parser::MessageParser;
