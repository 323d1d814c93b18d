//! Game state machine.
//!
//! A `Game` owns one board and its turn state. It moves from `NotStarted` to
//! `InProgress` on `start_game` and to `GameOver` as soon as a move or a
//! resignation produces a non-OK result. Every move request runs validation,
//! the repetition check, combat, and settlement to completion before it
//! returns, and a rejected request leaves the game untouched.

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::board::{
    Board, Color, Location, Move, MoveResult, MoveStatus, PerColor, Piece, PieceLocation,
    PieceType,
};
use crate::observer::{GameObserver, ObserverId};
use crate::resolve::{apply_battle, resolve_battle, settle, Repetition, RepetitionTracker};
use crate::validate::{build_board, build_position, validate_move, MoveError, SetupError};
use crate::variant::GameConfig;

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    GameOver,
}

/// Errors returned by the runtime commands of a `Game`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is already in progress")]
    AlreadyStarted,

    #[error("a finished game of this variant cannot be restarted")]
    RestartForbidden,

    #[error("this variant does not allow resignation")]
    ResignationNotAllowed,

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Mutable per-game bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TurnState {
    status: GameStatus,
    last_mover: Option<Color>,
    moves_made: u32,
    movable: PerColor<u32>,
    objectives: PerColor<u32>,
    repetition: PerColor<RepetitionTracker>,
}

impl TurnState {
    /// Counts movable and objective pieces on `board`.
    fn fresh(config: &GameConfig, board: &Board) -> Self {
        let objective = config.objective;
        let movable = |color| board.count(color, PieceType::is_movable);
        let objectives = |color| board.count(color, |pt| pt == objective);
        TurnState {
            status: GameStatus::NotStarted,
            last_mover: None,
            moves_made: 0,
            movable: PerColor::new(movable(Color::Red), movable(Color::Blue)),
            objectives: PerColor::new(objectives(Color::Red), objectives(Color::Blue)),
            repetition: PerColor::default(),
        }
    }

    /// Updates the counters for a piece that left the board.
    fn remove(&mut self, config: &GameConfig, piece: Piece) {
        let Some(owner) = piece.owner else {
            return;
        };
        if piece.piece_type.is_movable() {
            self.movable[owner] = self.movable[owner].saturating_sub(1);
        }
        if piece.piece_type == config.objective {
            self.objectives[owner] = self.objectives[owner].saturating_sub(1);
        }
    }
}

/// A single game between Red and Blue.
pub struct Game {
    config: GameConfig,
    /// Starting position, kept for restarts.
    initial: Board,
    board: Board,
    setups: PerColor<Vec<PieceLocation>>,
    turn: TurnState,
    observers: Vec<(ObserverId, Box<dyn GameObserver>)>,
    next_observer: u64,
}

impl Game {
    /// Validates both setups and creates a game that has not yet started.
    pub fn new(
        config: GameConfig,
        red: &[PieceLocation],
        blue: &[PieceLocation],
    ) -> Result<Self, SetupError> {
        let board = build_board(&config, red, blue)?;
        Ok(Self::assemble(
            config,
            board,
            PerColor::new(red.to_vec(), blue.to_vec()),
        ))
    }

    /// Like `new`, registering `observers` before returning.
    pub fn with_observers(
        config: GameConfig,
        red: &[PieceLocation],
        blue: &[PieceLocation],
        observers: Vec<Box<dyn GameObserver>>,
    ) -> Result<Self, SetupError> {
        let mut game = Self::new(config, red, blue)?;
        for observer in observers {
            game.register(observer);
        }
        Ok(game)
    }

    /// Creates a game from an arbitrary position.
    ///
    /// Only bounds and duplicate cells are checked; the roster and home
    /// regions are not. Terrain from `config` is stamped over the position.
    pub fn from_position(config: GameConfig, pieces: &[PieceLocation]) -> Result<Self, SetupError> {
        let board = build_position(&config, pieces)?;
        let side = |color| {
            board
                .pieces()
                .filter(|pl| pl.piece.is_owned_by(color))
                .collect::<Vec<_>>()
        };
        let setups = PerColor::new(side(Color::Red), side(Color::Blue));
        Ok(Self::assemble(config, board, setups))
    }

    fn assemble(config: GameConfig, board: Board, setups: PerColor<Vec<PieceLocation>>) -> Self {
        let turn = TurnState::fresh(&config, &board);
        Game {
            config,
            initial: board.clone(),
            board,
            setups,
            turn,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Registers an observer and returns a handle for removing it.
    pub fn register(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a previously registered observer. Returns false if unknown.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Starts the game, or restarts a finished one where the variant allows it.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        match self.turn.status {
            GameStatus::InProgress => return Err(GameError::AlreadyStarted),
            GameStatus::GameOver if !self.config.allow_restart => {
                return Err(GameError::RestartForbidden)
            }
            GameStatus::GameOver => {
                info!("{}: restarting finished game", self.config.name);
                self.board = self.initial.clone();
                self.turn = TurnState::fresh(&self.config, &self.board);
            }
            GameStatus::NotStarted => info!("{}: game started", self.config.name),
        }
        self.turn.status = GameStatus::InProgress;

        let (red, blue) = (&self.setups.red, &self.setups.blue);
        for (_, observer) in &mut self.observers {
            observer.game_started(red, blue);
        }
        Ok(())
    }

    /// Moves the piece of type `piece` from `from` to `to`.
    pub fn make_move(
        &mut self,
        piece: PieceType,
        from: Location,
        to: Location,
    ) -> Result<MoveResult, GameError> {
        let mv = Move::new(piece, from, to);
        let result = self.play(mv);
        match &result {
            Ok(r) => debug!("{}: {} -> {:?}", self.config.name, mv, r.status),
            Err(e) => debug!("{}: {} rejected: {}", self.config.name, mv, e),
        }
        self.notify(Some(mv), result.as_ref());
        result
    }

    /// The side that did not move last concedes.
    ///
    /// If nobody has moved yet, the first mover concedes. A game that has not
    /// started can be resigned; a finished one cannot.
    pub fn resign(&mut self) -> Result<MoveResult, GameError> {
        let result = self.concede();
        if let Err(ref e) = result {
            debug!("{}: resignation rejected: {}", self.config.name, e);
        }
        self.notify(None, result.as_ref());
        result
    }

    fn concede(&mut self) -> Result<MoveResult, GameError> {
        if !self.config.allow_resignation {
            return Err(GameError::ResignationNotAllowed);
        }
        if self.turn.status == GameStatus::GameOver {
            return Err(MoveError::GameOver.into());
        }
        let loser = match self.turn.last_mover {
            Some(last) => last.opponent(),
            None => self.config.first_mover,
        };
        let result = MoveResult::new(MoveStatus::win_for(loser.opponent()), None);
        self.finish(result);
        Ok(result)
    }

    fn play(&mut self, mv: Move) -> Result<MoveResult, GameError> {
        let checked = validate_move(
            &self.config,
            &self.board,
            self.turn.status,
            self.turn.last_mover,
            mv,
        )?;
        let mover = checked.mover;

        let verdict = if self.config.repetition_rule {
            self.turn.repetition[mover].check(checked.piece, mv.to)
        } else {
            Repetition::Fresh
        };
        match verdict {
            Repetition::Violation => {
                debug!("{}: {} repeated a move a third time", self.config.name, mover);
                let result = MoveResult::new(MoveStatus::win_for(mover.opponent()), None);
                self.finish(result);
                return Ok(result);
            }
            Repetition::Pending => debug!("{}: {} repetition pending", self.config.name, mover),
            Repetition::Fresh => {}
        }

        let provisional = match checked.defender {
            None => {
                self.board.relocate(mv.from, mv.to);
                MoveResult::new(
                    MoveStatus::Ok,
                    Some(PieceLocation::new(checked.piece, mv.to)),
                )
            }
            Some(defender) => {
                let battle = resolve_battle(
                    &self.config,
                    checked.piece.piece_type,
                    defender.piece_type,
                    checked.kind,
                );
                let effect = apply_battle(
                    &mut self.board,
                    battle,
                    checked.piece,
                    defender,
                    mv.from,
                    mv.to,
                );
                let mut status = MoveStatus::Ok;
                for casualty in effect.casualties() {
                    self.turn.remove(&self.config, casualty);
                    if let Some(owner) = casualty.owner {
                        if casualty.piece_type == self.config.objective
                            && self.turn.objectives[owner] == 0
                        {
                            status = MoveStatus::win_for(owner.opponent());
                        }
                    }
                }
                MoveResult::new(status, effect.survivor)
            }
        };

        if self.config.repetition_rule {
            self.turn.repetition[mover].record(checked.piece, mv.from, verdict);
        }
        self.turn.last_mover = Some(mover);
        self.turn.moves_made += 1;

        let result = settle(
            provisional,
            self.turn.movable,
            self.turn.moves_made,
            self.config.move_limit,
        );
        if !result.status.is_ok() {
            self.finish(result);
        }
        Ok(result)
    }

    fn finish(&mut self, result: MoveResult) {
        self.turn.status = GameStatus::GameOver;
        info!("{}: game over, {:?}", self.config.name, result.status);
    }

    fn notify(&mut self, mv: Option<Move>, outcome: Result<&MoveResult, &GameError>) {
        for (_, observer) in &mut self.observers {
            observer.move_happened(mv, outcome);
        }
    }

    /// Returns the piece at `location`, terrain included.
    pub fn piece_at(&self, location: Location) -> Option<Piece> {
        self.board.get(location)
    }

    pub fn status(&self) -> GameStatus {
        self.turn.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_mover(&self) -> Option<Color> {
        self.turn.last_mover
    }

    /// Number of moves accepted since the game (re)started.
    pub fn moves_made(&self) -> u32 {
        self.turn.moves_made
    }

    /// The side whose move it is, or `None` unless the game is in progress.
    pub fn side_to_move(&self) -> Option<Color> {
        if self.turn.status != GameStatus::InProgress {
            return None;
        }
        Some(match self.turn.last_mover {
            Some(last) => last.opponent(),
            None => self.config.first_mover,
        })
    }

    /// Pieces of `color` still able to move.
    pub fn movable_count(&self, color: Color) -> u32 {
        self.turn.movable[color]
    }

    /// Objective pieces `color` still has on the board.
    pub fn objectives_remaining(&self, color: Color) -> u32 {
        self.turn.objectives[color]
    }

    /// Returns true if `color` has shuttled a piece back once and would lose
    /// by doing so again.
    pub fn repetition_pending(&self, color: Color) -> bool {
        self.turn.repetition[color].is_pending()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("variant", &self.config.name)
            .field("status", &self.turn.status)
            .field("last_mover", &self.turn.last_mover)
            .field("moves_made", &self.turn.moves_made)
            .field("movable", &self.turn.movable)
            .field("objectives", &self.turn.objectives)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
