//! Authoritative server for a two-player hidden-mine duel.

pub mod config;
pub mod game;
pub mod http;
pub mod protocol;
pub mod room;
pub mod telemetry;
pub mod ws;
