//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod clock;

pub use bot::{Bot, BotInfo};
pub use clock::{Clock, ManualClock, SystemClock};
