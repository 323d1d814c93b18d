//! Rule-set configuration.
//!
//! A `GameConfig` carries everything that distinguishes one rule set from
//! another: board geometry, the required roster, home-region checksums,
//! terrain, and which movement and combat exceptions apply. It is built once
//! and never mutated by a running game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Color, Location, PerColor, PieceType, ALL_COLORS};

/// Errors raised when a configuration is malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("board dimensions {width}x{height} are not positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("terrain cell {0} lies off the board")]
    TerrainOffBoard(Location),

    #[error("roster is empty")]
    EmptyRoster,

    #[error("home total {total} for {color} cannot be reached by {pieces} distinct cells")]
    HomeTotalsUnreachable { color: Color, total: i64, pieces: u32 },
}

/// How many pieces of one type each side must field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub piece: PieceType,
    pub count: u32,
}

impl RosterEntry {
    pub const fn new(piece: PieceType, count: u32) -> Self {
        RosterEntry { piece, count }
    }
}

/// Movement exceptions to the one-cell orthogonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementRules {
    /// Piece that may travel any distance along a clear straight line.
    #[serde(default)]
    pub long_range: Option<PieceType>,
    /// Piece that may attack exactly two cells away over an empty midpoint.
    #[serde(default)]
    pub assault: Option<PieceType>,
}

/// An immobile defender that destroys every attacker except `specialist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortification {
    pub fortified: PieceType,
    pub specialist: PieceType,
}

/// An attacker that beats `commander` when it initiates the attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upset {
    pub assassin: PieceType,
    pub commander: PieceType,
}

/// Combat exceptions evaluated before the plain rank comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatRules {
    #[serde(default)]
    pub fortification: Option<Fortification>,
    #[serde(default)]
    pub upset: Option<Upset>,
    /// Two types that remove each other whichever one attacks.
    #[serde(default)]
    pub twins: Option<[PieceType; 2]>,
}

impl CombatRules {
    /// Returns true if `a` and `b` are the configured twin pair, in either order.
    pub fn are_twins(&self, a: PieceType, b: PieceType) -> bool {
        match self.twins {
            Some([x, y]) => (a == x && b == y) || (a == y && b == x),
            None => false,
        }
    }
}

fn default_objective() -> PieceType {
    PieceType::Flag
}

/// Immutable description of one rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub name: String,
    pub width: i32,
    pub height: i32,
    /// Number of pieces each side must place.
    pub setup_size: u32,
    pub roster: Vec<RosterEntry>,
    /// Total absolute deviation from `roster` a setup may carry.
    #[serde(default)]
    pub substitution_budget: u32,
    /// Types whose count must match `roster` exactly even under a budget.
    #[serde(default)]
    pub exact_pieces: Vec<PieceType>,
    /// Required sum of `x + y * width + 1` over each side's setup.
    pub home_totals: PerColor<i64>,
    #[serde(default)]
    pub terrain: Vec<Location>,
    pub first_mover: Color,
    /// Piece whose capture (all copies) ends the game.
    #[serde(default = "default_objective")]
    pub objective: PieceType,
    #[serde(default)]
    pub movement: MovementRules,
    #[serde(default)]
    pub combat: CombatRules,
    #[serde(default)]
    pub repetition_rule: bool,
    /// Accepted moves after which an undecided game is drawn.
    #[serde(default)]
    pub move_limit: Option<u32>,
    #[serde(default)]
    pub allow_restart: bool,
    #[serde(default)]
    pub allow_resignation: bool,
}

impl GameConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(&cell) = self.terrain.iter().find(|&&cell| !self.in_bounds(cell)) {
            return Err(ConfigError::TerrainOffBoard(cell));
        }
        if self.setup_size == 0 || self.roster.iter().all(|e| e.count == 0) {
            return Err(ConfigError::EmptyRoster);
        }

        // The smallest and largest sums `setup_size` distinct cells can produce.
        let n = i64::from(self.setup_size);
        let cells = i64::from(self.width) * i64::from(self.height);
        for color in ALL_COLORS {
            let total = self.home_totals[color];
            let reachable = n <= cells && {
                let low = n * (n + 1) / 2;
                let high = n * (2 * cells - n + 1) / 2;
                (low..=high).contains(&total)
            };
            if !reachable {
                return Err(ConfigError::HomeTotalsUnreachable {
                    color,
                    total,
                    pieces: self.setup_size,
                });
            }
        }
        Ok(())
    }

    /// Returns true if `location` lies on the board.
    pub fn in_bounds(&self, location: Location) -> bool {
        (0..self.width).contains(&location.x) && (0..self.height).contains(&location.y)
    }

    /// Returns true if `location` is a terrain cell.
    pub fn is_terrain(&self, location: Location) -> bool {
        self.terrain.contains(&location)
    }

    /// Required count of `piece` per side.
    pub fn required(&self, piece: PieceType) -> u32 {
        self.roster
            .iter()
            .filter(|e| e.piece == piece)
            .map(|e| e.count)
            .sum()
    }
}
