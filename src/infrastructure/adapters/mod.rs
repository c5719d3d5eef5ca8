//! Chat platform adapters

pub mod console;
pub mod twitch;

pub use console::ConsoleAdapter;
pub use twitch::TwitchAdapter;
