//! Move validation.
//!
//! Checks a requested move against the game phase, turn order, ownership,
//! and the geometry allowed for the moving piece. Validation never touches
//! the board; a move that passes is described by a `ValidatedMove` which the
//! engine then applies.

use thiserror::Error;

use crate::board::{Board, Color, Location, Move, Piece, PieceType};
use crate::engine::GameStatus;
use crate::variant::GameConfig;

/// Reasons a requested move is refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game has not been started")]
    NotStarted,

    #[error("the game is over")]
    GameOver,

    #[error("a {0} cannot move")]
    ImmovablePiece(PieceType),

    #[error("{0} lies off the board")]
    OffBoard(Location),

    #[error("no {piece} at {location}")]
    PieceNotFound { piece: PieceType, location: Location },

    #[error("{0} must make the first move")]
    WrongFirstMover(Color),

    #[error("{0} moved last and must wait")]
    OutOfTurn(Color),

    #[error("own piece already at {0}")]
    OwnPieceAtDestination(Location),

    #[error("{0} is impassable terrain")]
    TerrainAtDestination(Location),

    #[error("{from} to {to} is not a straight orthogonal line")]
    NotStraightLine { from: Location, to: Location },

    #[error("a {piece} cannot move {distance} cells")]
    TooFar { piece: PieceType, distance: u32 },

    #[error("path blocked at {0}")]
    PathBlocked(Location),

    #[error("long-range move cannot end on the occupied cell {0}")]
    LongRangeAttack(Location),

    #[error("two-cell assault needs a target at {0}")]
    AssaultWithoutTarget(Location),
}

/// The geometric form of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// One cell along an axis.
    Step,
    /// Several cells along a clear line onto an empty cell.
    Dash,
    /// Exactly two cells onto an enemy over an empty midpoint.
    Assault,
}

/// A move that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    pub mover: Color,
    pub piece: Piece,
    pub kind: MoveKind,
    /// Enemy piece standing on the destination, if any.
    pub defender: Option<Piece>,
}

/// Validates `mv` against the current position.
///
/// Checks run in a fixed order and the first failure is reported.
pub fn validate_move(
    config: &GameConfig,
    board: &Board,
    status: GameStatus,
    last_mover: Option<Color>,
    mv: Move,
) -> Result<ValidatedMove, MoveError> {
    match status {
        GameStatus::NotStarted => return Err(MoveError::NotStarted),
        GameStatus::GameOver => return Err(MoveError::GameOver),
        GameStatus::InProgress => {}
    }
    if !mv.piece.is_movable() {
        return Err(MoveError::ImmovablePiece(mv.piece));
    }
    for cell in [mv.from, mv.to] {
        if !board.contains(cell) {
            return Err(MoveError::OffBoard(cell));
        }
    }

    let piece = board
        .get(mv.from)
        .filter(|p| p.piece_type == mv.piece)
        .ok_or(MoveError::PieceNotFound {
            piece: mv.piece,
            location: mv.from,
        })?;
    let Some(mover) = piece.owner else {
        return Err(MoveError::PieceNotFound {
            piece: mv.piece,
            location: mv.from,
        });
    };

    match last_mover {
        None if mover != config.first_mover => {
            return Err(MoveError::WrongFirstMover(config.first_mover))
        }
        Some(last) if last == mover => return Err(MoveError::OutOfTurn(mover)),
        _ => {}
    }

    let defender = board.get(mv.to);
    match defender {
        Some(p) if p.is_owned_by(mover) => return Err(MoveError::OwnPieceAtDestination(mv.to)),
        Some(p) if p.is_terrain() => return Err(MoveError::TerrainAtDestination(mv.to)),
        _ => {}
    }

    let kind = movement_kind(config, board, mv, defender.is_some())?;
    Ok(ValidatedMove {
        mover,
        piece,
        kind,
        defender,
    })
}

/// Classifies the geometry of `mv`, rejecting shapes the piece may not make.
fn movement_kind(
    config: &GameConfig,
    board: &Board,
    mv: Move,
    occupied: bool,
) -> Result<MoveKind, MoveError> {
    let distance = mv.from.distance_to(mv.to).ok_or(MoveError::NotStraightLine {
        from: mv.from,
        to: mv.to,
    })?;
    if distance == 1 {
        return Ok(MoveKind::Step);
    }

    if config.movement.long_range == Some(mv.piece) {
        if let Some(blocked) = mv.from.between(mv.to).into_iter().find(|&c| !board.is_empty(c)) {
            return Err(MoveError::PathBlocked(blocked));
        }
        if occupied {
            return Err(MoveError::LongRangeAttack(mv.to));
        }
        return Ok(MoveKind::Dash);
    }

    if config.movement.assault == Some(mv.piece) && distance == 2 {
        if !occupied {
            return Err(MoveError::AssaultWithoutTarget(mv.to));
        }
        let midpoint = mv.from.offset(
            (mv.to.x - mv.from.x).signum(),
            (mv.to.y - mv.from.y).signum(),
        );
        if !board.is_empty(midpoint) {
            return Err(MoveError::PathBlocked(midpoint));
        }
        return Ok(MoveKind::Assault);
    }

    Err(MoveError::TooFar {
        piece: mv.piece,
        distance,
    })
}
