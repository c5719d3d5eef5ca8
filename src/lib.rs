//! curi-bot - answers a fixed set of chat commands on Twitch,
//! one reply per command every 30 seconds.

pub mod domain;
pub mod application;
pub mod infrastructure;
