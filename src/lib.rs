//! Chomper game library crate.

pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod map;
pub mod scores;
pub mod terminal;
