//! Move resolution.
//!
//! Decides battles, tracks repetition, and settles whether a move ended the
//! game.

pub mod combat;
pub mod repetition;
pub mod termination;

pub use combat::{apply_battle, resolve_battle, Battle, BattleEffect, BattleOutcome, BattleRule};
pub use repetition::{Repetition, RepetitionTracker};
pub use termination::settle;
