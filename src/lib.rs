//! Stratagem rules engine library.
//!
//! Exposes the board representation, rule-set configuration, validators,
//! combat resolution, and the game state machine for Stratego-style
//! capture games.

pub mod board;
pub mod engine;
pub mod observer;
pub mod resolve;
pub mod validate;
pub mod variant;
