//! Setup and move validation.
//!
//! Both validators are pure: they inspect a configuration and a board and
//! report the first rule a request breaks.

pub mod movement;
pub mod setup;

pub use movement::{validate_move, MoveError, MoveKind, ValidatedMove};
pub use setup::{build_board, build_position, validate_setup, SetupError};
