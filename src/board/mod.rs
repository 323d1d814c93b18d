//! Board representation and piece types.
//!
//! Contains the coordinate type, the piece and result value types, and the
//! occupancy grid shared by every rule set.

pub mod location;
pub mod piece;
pub mod state;

pub use location::Location;
pub use piece::{
    Color, Move, MoveResult, MoveStatus, PerColor, Piece, PieceLocation, PieceType, ALL_COLORS,
    ALL_PIECE_TYPES, PIECE_TYPE_COUNT,
};
pub use state::Board;
