//! Game-end settlement.
//!
//! After a move has been applied the provisional result is checked against
//! the movable-piece counters and the move limit.

use crate::board::{Color, MoveResult, MoveStatus, PerColor};

/// Settles the final result of an applied move.
///
/// A side with no movable pieces left loses; both sides exhausted is a draw
/// with no outcome. Otherwise the provisional result stands, except that an
/// undecided game reaching `move_limit` accepted moves is drawn.
pub fn settle(
    provisional: MoveResult,
    movable: PerColor<u32>,
    moves_made: u32,
    move_limit: Option<u32>,
) -> MoveResult {
    match (movable[Color::Red], movable[Color::Blue]) {
        (0, 0) => return MoveResult::new(MoveStatus::Draw, None),
        (0, _) => return MoveResult::new(MoveStatus::BlueWins, provisional.outcome),
        (_, 0) => return MoveResult::new(MoveStatus::RedWins, provisional.outcome),
        _ => {}
    }
    match move_limit {
        Some(limit) if provisional.status.is_ok() && moves_made >= limit => {
            MoveResult::new(MoveStatus::Draw, provisional.outcome)
        }
        _ => provisional,
    }
}
