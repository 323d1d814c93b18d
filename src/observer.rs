//! Game event observers.
//!
//! A game notifies every registered observer when it starts and after every
//! move request, whether the request succeeded or failed. Observers see the
//! events in registration order on the caller's thread.

use std::sync::mpsc::Sender;

use log::{info, warn};

use crate::board::{Move, MoveResult, PieceLocation};
use crate::engine::GameError;

/// Receives notifications from a running game.
pub trait GameObserver {
    /// Called on every successful `start_game` with both starting setups.
    fn game_started(&mut self, red: &[PieceLocation], blue: &[PieceLocation]);

    /// Called once per move request. `mv` is `None` for a resignation.
    fn move_happened(&mut self, mv: Option<Move>, outcome: Result<&MoveResult, &GameError>);
}

/// Handle returned by `Game::register`, used to unregister an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

/// An owned copy of an observer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started {
        red: Vec<PieceLocation>,
        blue: Vec<PieceLocation>,
    },
    Moved {
        mv: Option<Move>,
        outcome: Result<MoveResult, GameError>,
    },
}

/// Forwards events over a channel. Events sent after the receiver is dropped
/// are discarded.
impl GameObserver for Sender<GameEvent> {
    fn game_started(&mut self, red: &[PieceLocation], blue: &[PieceLocation]) {
        let _ = self.send(GameEvent::Started {
            red: red.to_vec(),
            blue: blue.to_vec(),
        });
    }

    fn move_happened(&mut self, mv: Option<Move>, outcome: Result<&MoveResult, &GameError>) {
        let _ = self.send(GameEvent::Moved {
            mv,
            outcome: outcome.copied().map_err(GameError::clone),
        });
    }
}

/// Reports events through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn game_started(&mut self, red: &[PieceLocation], blue: &[PieceLocation]) {
        info!(
            "game started: {} red pieces, {} blue pieces",
            red.len(),
            blue.len()
        );
    }

    fn move_happened(&mut self, mv: Option<Move>, outcome: Result<&MoveResult, &GameError>) {
        let what = match mv {
            Some(mv) => mv.to_string(),
            None => "resignation".to_string(),
        };
        match outcome {
            Ok(result) => match result.outcome {
                Some(pl) => info!("{}: {:?}, {} at {}", what, result.status, pl.piece, pl.location),
                None => info!("{}: {:?}", what, result.status),
            },
            Err(e) => warn!("{} rejected: {}", what, e),
        }
    }
}
