//! Piece types, ownership, and move results.
//!
//! Defines the two sides, the closed set of piece types with their combat
//! rank, and the value types that describe a move and its result.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::location::Location;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
}

/// Both colors in index order.
pub const ALL_COLORS: [Color; 2] = [Color::Red, Color::Blue];

impl Color {
    /// Returns the other side.
    pub const fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// A pair of values, one per side, indexed by `Color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerColor<T> {
    pub red: T,
    pub blue: T,
}

impl<T> PerColor<T> {
    pub const fn new(red: T, blue: T) -> Self {
        PerColor { red, blue }
    }
}

impl<T> Index<Color> for PerColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        match color {
            Color::Red => &self.red,
            Color::Blue => &self.blue,
        }
    }
}

impl<T> IndexMut<Color> for PerColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::Red => &mut self.red,
            Color::Blue => &mut self.blue,
        }
    }
}

/// Every kind of piece that can stand on a board.
///
/// `ChokePoint` is the unowned terrain marker. The remaining types are listed
/// from strongest to weakest in raw combat order. Ordering follows `rank`,
/// so `Spy < Marshal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    Marshal,
    General,
    Colonel,
    Major,
    Captain,
    FirstLieutenant,
    Lieutenant,
    Sergeant,
    Miner,
    Scout,
    Spy,
    Bomb,
    Flag,
    ChokePoint,
}

/// Number of piece types.
pub const PIECE_TYPE_COUNT: usize = 14;

/// All piece types, strongest first.
pub const ALL_PIECE_TYPES: [PieceType; PIECE_TYPE_COUNT] = [
    PieceType::Marshal,
    PieceType::General,
    PieceType::Colonel,
    PieceType::Major,
    PieceType::Captain,
    PieceType::FirstLieutenant,
    PieceType::Lieutenant,
    PieceType::Sergeant,
    PieceType::Miner,
    PieceType::Scout,
    PieceType::Spy,
    PieceType::Bomb,
    PieceType::Flag,
    PieceType::ChokePoint,
];

impl PieceType {
    /// Combat rank. Higher beats lower in the default comparison.
    pub const fn rank(self) -> u8 {
        match self {
            PieceType::ChokePoint => 0,
            PieceType::Flag => 1,
            PieceType::Bomb => 2,
            PieceType::Spy => 3,
            PieceType::Scout => 4,
            PieceType::Miner => 5,
            PieceType::Sergeant => 6,
            PieceType::Lieutenant => 7,
            PieceType::FirstLieutenant => 8,
            PieceType::Captain => 9,
            PieceType::Major => 10,
            PieceType::Colonel => 11,
            PieceType::General => 12,
            PieceType::Marshal => 13,
        }
    }

    /// Returns true if a piece of this type can ever initiate a move.
    pub const fn is_movable(self) -> bool {
        !matches!(self, PieceType::Flag | PieceType::Bomb | PieceType::ChokePoint)
    }

    /// Returns true for the unowned terrain marker.
    pub const fn is_terrain(self) -> bool {
        matches!(self, PieceType::ChokePoint)
    }

    /// Dense index in `ALL_PIECE_TYPES` order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Marshal => "marshal",
            PieceType::General => "general",
            PieceType::Colonel => "colonel",
            PieceType::Major => "major",
            PieceType::Captain => "captain",
            PieceType::FirstLieutenant => "first lieutenant",
            PieceType::Lieutenant => "lieutenant",
            PieceType::Sergeant => "sergeant",
            PieceType::Miner => "miner",
            PieceType::Scout => "scout",
            PieceType::Spy => "spy",
            PieceType::Bomb => "bomb",
            PieceType::Flag => "flag",
            PieceType::ChokePoint => "choke point",
        }
    }
}

impl Ord for PieceType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for PieceType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board. Terrain has no owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub owner: Option<Color>,
}

impl Piece {
    /// Creates a piece owned by `owner`.
    pub const fn new(piece_type: PieceType, owner: Color) -> Self {
        Piece {
            piece_type,
            owner: Some(owner),
        }
    }

    /// Creates an unowned terrain marker.
    pub const fn terrain() -> Self {
        Piece {
            piece_type: PieceType::ChokePoint,
            owner: None,
        }
    }

    pub const fn is_terrain(self) -> bool {
        self.owner.is_none() || self.piece_type.is_terrain()
    }

    /// Returns true if this piece belongs to `color`.
    pub fn is_owned_by(self, color: Color) -> bool {
        self.owner == Some(color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Some(color) => write!(f, "{} {}", color, self.piece_type),
            None => write!(f, "{}", self.piece_type),
        }
    }
}

/// A piece paired with the cell it stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceLocation {
    pub piece: Piece,
    pub location: Location,
}

impl PieceLocation {
    pub const fn new(piece: Piece, location: Location) -> Self {
        PieceLocation { piece, location }
    }
}

/// A requested move: the claimed piece type and its source and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece: PieceType,
    pub from: Location,
    pub to: Location,
}

impl Move {
    pub const fn new(piece: PieceType, from: Location, to: Location) -> Self {
        Move { piece, from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)
    }
}

/// Game status reported after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Ok,
    RedWins,
    BlueWins,
    Draw,
}

impl MoveStatus {
    /// Returns the status declaring `color` the winner.
    pub const fn win_for(color: Color) -> MoveStatus {
        match color {
            Color::Red => MoveStatus::RedWins,
            Color::Blue => MoveStatus::BlueWins,
        }
    }

    /// Returns the winning side, if the status names one.
    pub const fn winner(self) -> Option<Color> {
        match self {
            MoveStatus::RedWins => Some(Color::Red),
            MoveStatus::BlueWins => Some(Color::Blue),
            MoveStatus::Ok | MoveStatus::Draw => None,
        }
    }

    /// Returns true if the game continues.
    pub const fn is_ok(self) -> bool {
        matches!(self, MoveStatus::Ok)
    }
}

/// The result of an accepted move.
///
/// `outcome` names the surviving piece and where it now stands. It is `None`
/// when both pieces were removed, after a resignation, and after a
/// movable-exhaustion draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub status: MoveStatus,
    pub outcome: Option<PieceLocation>,
}

impl MoveResult {
    pub const fn new(status: MoveStatus, outcome: Option<PieceLocation>) -> Self {
        MoveResult { status, outcome }
    }
}
