//! The five built-in rule sets.
//!
//! Alpha through Epsilon grow from a two-piece toy on a 2x2 board up to the
//! full 10x10 game with scouts, bombs, a spy, and twin lieutenants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{
    CombatRules, Fortification, GameConfig, MovementRules, RosterEntry, Upset,
};
use crate::board::{Color, Location, PerColor, PieceType};

/// A built-in rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Alpha,
    Beta,
    Gamma,
    Delta,
    Epsilon,
}

/// All built-in rule sets, simplest first.
pub const ALL_VARIANTS: [Variant; 5] = [
    Variant::Alpha,
    Variant::Beta,
    Variant::Gamma,
    Variant::Delta,
    Variant::Epsilon,
];

/// Returned when a variant name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

impl Variant {
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Alpha => "alpha",
            Variant::Beta => "beta",
            Variant::Gamma => "gamma",
            Variant::Delta => "delta",
            Variant::Epsilon => "epsilon",
        }
    }

    /// Builds the configuration for this rule set.
    pub fn config(self) -> GameConfig {
        match self {
            Variant::Alpha => alpha(),
            Variant::Beta => beta(),
            Variant::Gamma => gamma(),
            Variant::Delta => delta(),
            Variant::Epsilon => epsilon(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ALL_VARIANTS
            .into_iter()
            .find(|v| v.name() == lower)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Sum of `x + y * width + 1` over every cell in rows `first..=last`.
fn rows_total(width: i32, first: i32, last: i32) -> i64 {
    let low = Location::new(0, first).position_weight(width);
    let high = Location::new(width - 1, last).position_weight(width);
    (low + high) * (high - low + 1) / 2
}

/// Red holds the bottom `rows` rows and Blue the top `rows` rows.
fn home_rows(width: i32, height: i32, rows: i32) -> PerColor<i64> {
    PerColor::new(
        rows_total(width, 0, rows - 1),
        rows_total(width, height - rows, height - 1),
    )
}

fn small_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new(PieceType::Flag, 1),
        RosterEntry::new(PieceType::Marshal, 1),
        RosterEntry::new(PieceType::Colonel, 2),
        RosterEntry::new(PieceType::Captain, 2),
        RosterEntry::new(PieceType::Lieutenant, 3),
        RosterEntry::new(PieceType::Sergeant, 3),
    ]
}

fn full_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new(PieceType::Marshal, 1),
        RosterEntry::new(PieceType::General, 1),
        RosterEntry::new(PieceType::Colonel, 2),
        RosterEntry::new(PieceType::Major, 3),
        RosterEntry::new(PieceType::Captain, 4),
        RosterEntry::new(PieceType::Lieutenant, 4),
        RosterEntry::new(PieceType::Sergeant, 4),
        RosterEntry::new(PieceType::Miner, 5),
        RosterEntry::new(PieceType::Scout, 8),
        RosterEntry::new(PieceType::Spy, 1),
        RosterEntry::new(PieceType::Bomb, 6),
        RosterEntry::new(PieceType::Flag, 1),
    ]
}

fn lakes() -> Vec<Location> {
    [(2, 4), (2, 5), (3, 4), (3, 5), (6, 4), (6, 5), (7, 4), (7, 5)]
        .into_iter()
        .map(|(x, y)| Location::new(x, y))
        .collect()
}

fn alpha() -> GameConfig {
    GameConfig {
        name: "alpha".to_string(),
        width: 2,
        height: 2,
        setup_size: 2,
        roster: vec![
            RosterEntry::new(PieceType::Flag, 1),
            RosterEntry::new(PieceType::Marshal, 1),
        ],
        substitution_budget: 0,
        exact_pieces: Vec::new(),
        home_totals: home_rows(2, 2, 1),
        terrain: Vec::new(),
        first_mover: Color::Red,
        objective: PieceType::Flag,
        movement: MovementRules::default(),
        combat: CombatRules::default(),
        repetition_rule: false,
        move_limit: None,
        allow_restart: true,
        allow_resignation: false,
    }
}

fn beta() -> GameConfig {
    GameConfig {
        name: "beta".to_string(),
        width: 6,
        height: 6,
        setup_size: 12,
        roster: small_roster(),
        home_totals: home_rows(6, 6, 2),
        move_limit: Some(12),
        ..alpha()
    }
}

fn gamma() -> GameConfig {
    GameConfig {
        name: "gamma".to_string(),
        terrain: [(2, 2), (2, 3), (3, 2), (3, 3)]
            .into_iter()
            .map(|(x, y)| Location::new(x, y))
            .collect(),
        repetition_rule: true,
        move_limit: None,
        allow_restart: false,
        ..beta()
    }
}

fn delta() -> GameConfig {
    GameConfig {
        name: "delta".to_string(),
        width: 10,
        height: 10,
        setup_size: 40,
        roster: full_roster(),
        home_totals: home_rows(10, 10, 4),
        terrain: lakes(),
        movement: MovementRules {
            long_range: Some(PieceType::Scout),
            assault: None,
        },
        combat: CombatRules {
            fortification: Some(Fortification {
                fortified: PieceType::Bomb,
                specialist: PieceType::Miner,
            }),
            upset: Some(Upset {
                assassin: PieceType::Spy,
                commander: PieceType::Marshal,
            }),
            twins: None,
        },
        ..gamma()
    }
}

fn epsilon() -> GameConfig {
    let base = delta();
    let roster = vec![
        RosterEntry::new(PieceType::Marshal, 1),
        RosterEntry::new(PieceType::General, 1),
        RosterEntry::new(PieceType::Colonel, 2),
        RosterEntry::new(PieceType::Major, 3),
        RosterEntry::new(PieceType::Captain, 4),
        RosterEntry::new(PieceType::FirstLieutenant, 2),
        RosterEntry::new(PieceType::Lieutenant, 2),
        RosterEntry::new(PieceType::Sergeant, 4),
        RosterEntry::new(PieceType::Miner, 5),
        RosterEntry::new(PieceType::Scout, 8),
        RosterEntry::new(PieceType::Spy, 1),
        RosterEntry::new(PieceType::Bomb, 6),
        RosterEntry::new(PieceType::Flag, 2),
    ];
    GameConfig {
        name: "epsilon".to_string(),
        roster,
        // One piece of the 41-piece roster is given up to field the second flag.
        substitution_budget: 1,
        exact_pieces: vec![PieceType::Flag],
        movement: MovementRules {
            assault: Some(PieceType::FirstLieutenant),
            ..base.movement
        },
        combat: CombatRules {
            twins: Some([PieceType::FirstLieutenant, PieceType::Lieutenant]),
            ..base.combat
        },
        allow_resignation: true,
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_validates() {
        for variant in ALL_VARIANTS {
            let config = variant.config();
            assert_eq!(config.name, variant.name());
            config
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", variant, e));
        }
    }

    #[test]
    fn home_totals_match_known_constants() {
        assert_eq!(Variant::Alpha.config().home_totals, PerColor::new(3, 7));
        assert_eq!(Variant::Beta.config().home_totals, PerColor::new(78, 366));
        assert_eq!(Variant::Gamma.config().home_totals, PerColor::new(78, 366));
        assert_eq!(Variant::Delta.config().home_totals, PerColor::new(820, 3220));
        assert_eq!(Variant::Epsilon.config().home_totals, PerColor::new(820, 3220));
    }

    #[test]
    fn roster_sizes() {
        let total = |v: Variant| v.config().roster.iter().map(|e| e.count).sum::<u32>();
        assert_eq!(total(Variant::Beta), 12);
        assert_eq!(total(Variant::Delta), 40);
        assert_eq!(total(Variant::Epsilon), 41);
        assert_eq!(Variant::Epsilon.config().setup_size, 40);
    }

    #[test]
    fn restart_policy() {
        assert!(Variant::Alpha.config().allow_restart);
        assert!(Variant::Beta.config().allow_restart);
        assert!(!Variant::Gamma.config().allow_restart);
        assert!(!Variant::Delta.config().allow_restart);
        assert!(!Variant::Epsilon.config().allow_restart);
    }

    #[test]
    fn epsilon_extends_delta() {
        let e = Variant::Epsilon.config();
        assert_eq!(e.movement.long_range, Some(PieceType::Scout));
        assert_eq!(e.movement.assault, Some(PieceType::FirstLieutenant));
        assert!(e.combat.upset.is_some());
        assert!(e.combat.fortification.is_some());
        assert!(e.allow_resignation);
        assert_eq!(e.terrain.len(), 8);
    }

    #[test]
    fn parse_variant_names() {
        assert_eq!("delta".parse::<Variant>(), Ok(Variant::Delta));
        assert_eq!(" Epsilon ".parse::<Variant>(), Ok(Variant::Epsilon));
        assert_eq!(
            "zeta".parse::<Variant>(),
            Err(UnknownVariant("zeta".to_string()))
        );
    }

    #[test]
    fn config_survives_json() {
        let config = Variant::Epsilon.config();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
