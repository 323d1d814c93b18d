//! Combat resolution.
//!
//! `resolve_battle` is a pure function of the two piece types, the rule set,
//! and the form of the attacking move. It walks the exception rules in a
//! fixed order and falls back to the rank comparison. `apply_battle` then
//! writes the outcome to the board.

use log::trace;

use crate::board::{Board, Location, Piece, PieceLocation, PieceType};
use crate::validate::MoveKind;
use crate::variant::GameConfig;

/// What happens to the two pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleOutcome {
    /// Both pieces leave the board.
    BothRemoved,
    /// The defender was an objective piece; the attacker takes its cell.
    ObjectiveCaptured,
    /// The defender is removed and the attacker takes its cell.
    AttackerWins,
    /// The attacker is removed and the defender stays where it is.
    AttackerRepelled,
    /// The attacker is removed and the defender advances into its origin.
    DefenderWins,
}

/// The rule that decided a battle, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleRule {
    EqualRank,
    Objective,
    Fortification,
    Upset,
    Twins,
    Assault,
    Rank,
}

/// A resolved battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Battle {
    pub outcome: BattleOutcome,
    pub rule: BattleRule,
}

impl Battle {
    const fn new(outcome: BattleOutcome, rule: BattleRule) -> Self {
        Battle { outcome, rule }
    }
}

/// Decides a battle between `attacker` and `defender`.
pub fn resolve_battle(
    config: &GameConfig,
    attacker: PieceType,
    defender: PieceType,
    kind: MoveKind,
) -> Battle {
    let battle = decide(config, attacker, defender, kind);
    trace!(
        "{} attacks {}: {:?} by {:?}",
        attacker,
        defender,
        battle.outcome,
        battle.rule
    );
    battle
}

fn decide(config: &GameConfig, attacker: PieceType, defender: PieceType, kind: MoveKind) -> Battle {
    use BattleOutcome::*;

    if attacker == defender {
        return Battle::new(BothRemoved, BattleRule::EqualRank);
    }
    if defender == config.objective {
        return Battle::new(ObjectiveCaptured, BattleRule::Objective);
    }
    if let Some(fort) = config.combat.fortification {
        if defender == fort.fortified {
            let outcome = if attacker == fort.specialist {
                AttackerWins
            } else {
                AttackerRepelled
            };
            return Battle::new(outcome, BattleRule::Fortification);
        }
    }
    if let Some(upset) = config.combat.upset {
        if attacker == upset.assassin && defender == upset.commander {
            return Battle::new(AttackerWins, BattleRule::Upset);
        }
    }
    if config.combat.are_twins(attacker, defender) {
        return Battle::new(BothRemoved, BattleRule::Twins);
    }

    let attacker_stronger = attacker.rank() > defender.rank();
    if kind == MoveKind::Assault {
        let outcome = if attacker_stronger {
            AttackerWins
        } else {
            AttackerRepelled
        };
        return Battle::new(outcome, BattleRule::Assault);
    }
    if attacker_stronger {
        Battle::new(AttackerWins, BattleRule::Rank)
    } else {
        Battle::new(DefenderWins, BattleRule::Rank)
    }
}

/// Board changes produced by one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleEffect {
    /// The surviving piece and where it now stands.
    pub survivor: Option<PieceLocation>,
    /// Pieces taken off the board: at most the attacker and the defender.
    pub removed: [Option<Piece>; 2],
}

impl BattleEffect {
    /// Iterates over the removed pieces.
    pub fn casualties(&self) -> impl Iterator<Item = Piece> + '_ {
        self.removed.iter().flatten().copied()
    }
}

/// Writes a battle outcome to the board.
///
/// `attacker` stands on `from` and `defender` on `to` when this is called.
pub fn apply_battle(
    board: &mut Board,
    battle: Battle,
    attacker: Piece,
    defender: Piece,
    from: Location,
    to: Location,
) -> BattleEffect {
    match battle.outcome {
        BattleOutcome::BothRemoved => {
            board.remove(from);
            board.remove(to);
            BattleEffect {
                survivor: None,
                removed: [Some(attacker), Some(defender)],
            }
        }
        BattleOutcome::ObjectiveCaptured | BattleOutcome::AttackerWins => {
            board.relocate(from, to);
            BattleEffect {
                survivor: Some(PieceLocation::new(attacker, to)),
                removed: [Some(defender), None],
            }
        }
        BattleOutcome::AttackerRepelled => {
            board.remove(from);
            BattleEffect {
                survivor: Some(PieceLocation::new(defender, to)),
                removed: [Some(attacker), None],
            }
        }
        BattleOutcome::DefenderWins => {
            board.remove(from);
            board.relocate(to, from);
            BattleEffect {
                survivor: Some(PieceLocation::new(defender, from)),
                removed: [Some(attacker), None],
            }
        }
    }
}
