//! Setup validation and board initialization.
//!
//! Each side supplies a collection of pieces with their starting cells. A
//! setup is accepted when it has the mandated size, its piece multiset matches
//! the roster (within the configured substitution budget), and the sum of its
//! position weights equals the side's home-region constant.

use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::board::{
    Board, Color, Location, Piece, PieceLocation, ALL_PIECE_TYPES, PIECE_TYPE_COUNT,
};
use crate::variant::GameConfig;

/// Reasons a setup is refused at construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no setup supplied for {0}")]
    MissingSetup(Color),

    #[error("{color} setup has {found} pieces, expected {expected}")]
    WrongPieceCount {
        color: Color,
        expected: u32,
        found: u32,
    },

    #[error("{0} setup has the wrong combination of pieces")]
    WrongCombination(Color),

    #[error("{0} setup is not placed in its home region")]
    WrongPlacement(Color),

    #[error("{color} setup contains a piece at {location} it does not own")]
    WrongOwner { color: Color, location: Location },

    #[error("setup piece at {0} lies off the board")]
    OffBoard(Location),

    #[error("more than one setup piece at {0}")]
    DuplicateLocation(Location),
}

/// Validates one side's setup against `config`.
pub fn validate_setup(
    config: &GameConfig,
    color: Color,
    setup: &[PieceLocation],
) -> Result<(), SetupError> {
    let result = check_setup(config, color, setup);
    if let Err(ref e) = result {
        debug!("{} setup rejected for {}: {}", color, config.name, e);
    }
    result
}

fn check_setup(
    config: &GameConfig,
    color: Color,
    setup: &[PieceLocation],
) -> Result<(), SetupError> {
    if setup.is_empty() {
        return Err(SetupError::MissingSetup(color));
    }
    let found = setup.len() as u32;
    if found != config.setup_size {
        return Err(SetupError::WrongPieceCount {
            color,
            expected: config.setup_size,
            found,
        });
    }
    if let Some(pl) = setup.iter().find(|pl| !pl.piece.is_owned_by(color)) {
        return Err(SetupError::WrongOwner {
            color,
            location: pl.location,
        });
    }
    check_cells(config, setup)?;

    let mut counts = [0u32; PIECE_TYPE_COUNT];
    for pl in setup {
        counts[pl.piece.piece_type.index()] += 1;
    }
    let mut deviation = 0;
    for pt in ALL_PIECE_TYPES {
        let required = config.required(pt);
        let count = counts[pt.index()];
        if config.exact_pieces.contains(&pt) && count != required {
            return Err(SetupError::WrongCombination(color));
        }
        deviation += required.abs_diff(count);
    }
    if deviation > config.substitution_budget {
        return Err(SetupError::WrongCombination(color));
    }

    let total: i64 = setup
        .iter()
        .map(|pl| pl.location.position_weight(config.width))
        .sum();
    if total != config.home_totals[color] {
        return Err(SetupError::WrongPlacement(color));
    }
    Ok(())
}

/// Rejects cells that are off the board or used twice.
fn check_cells(config: &GameConfig, pieces: &[PieceLocation]) -> Result<(), SetupError> {
    let mut seen = HashSet::with_capacity(pieces.len());
    for pl in pieces {
        if !config.in_bounds(pl.location) {
            return Err(SetupError::OffBoard(pl.location));
        }
        if !seen.insert(pl.location) {
            return Err(SetupError::DuplicateLocation(pl.location));
        }
    }
    Ok(())
}

/// Validates both setups and lays out the initial board.
///
/// Both collections are placed first, then terrain is stamped over the board.
pub fn build_board(
    config: &GameConfig,
    red: &[PieceLocation],
    blue: &[PieceLocation],
) -> Result<Board, SetupError> {
    validate_setup(config, Color::Red, red)?;
    validate_setup(config, Color::Blue, blue)?;
    let mut board = Board::empty(config.width, config.height);
    for pl in red.iter().chain(blue) {
        if !board.place(pl.location, pl.piece) {
            // Home regions of a custom config may overlap.
            return Err(SetupError::DuplicateLocation(pl.location));
        }
    }
    stamp_terrain(config, &mut board);
    Ok(board)
}

/// Lays out an arbitrary position, checking only bounds and duplicates.
pub fn build_position(config: &GameConfig, pieces: &[PieceLocation]) -> Result<Board, SetupError> {
    check_cells(config, pieces)?;
    let mut board = Board::empty(config.width, config.height);
    for pl in pieces {
        board.set(pl.location, pl.piece);
    }
    stamp_terrain(config, &mut board);
    Ok(board)
}

fn stamp_terrain(config: &GameConfig, board: &mut Board) {
    for &cell in &config.terrain {
        board.set(cell, Piece::terrain());
    }
}
