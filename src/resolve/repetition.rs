//! Repetition tracking.
//!
//! One tracker per side remembers the piece that side last moved and the cell
//! it left. Moving that same piece straight back into that cell is a
//! recurrence. The first recurrence is tolerated and marks the side as
//! pending; a second consecutive recurrence loses the game. Any other move
//! clears the pending mark.

use crate::board::{Location, Piece};

/// Verdict for a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// The move does not repeat the side's last move.
    Fresh,
    /// First recurrence; allowed but remembered.
    Pending,
    /// Second consecutive recurrence; the side loses.
    Violation,
}

/// Per-side repetition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepetitionTracker {
    /// Piece moved last and the cell it moved out of.
    last: Option<(Piece, Location)>,
    pending: bool,
}

impl RepetitionTracker {
    /// Classifies a proposed move without recording it.
    pub fn check(&self, piece: Piece, to: Location) -> Repetition {
        match self.last {
            Some(last) if last == (piece, to) => {
                if self.pending {
                    Repetition::Violation
                } else {
                    Repetition::Pending
                }
            }
            _ => Repetition::Fresh,
        }
    }

    /// Records an accepted move with the verdict `check` gave it.
    pub fn record(&mut self, piece: Piece, from: Location, verdict: Repetition) {
        self.last = Some((piece, from));
        self.pending = verdict == Repetition::Pending;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
