//! Game orchestration.
//!
//! [`GameState`] drives a full two-player game over a [`Board`]:
//! selection of a piece, highlighting of its legal destinations,
//! applying a confirmed move, the promotion interlude, and terminal
//! detection (checkmate or stalemate) after every ply.

use crate::attack::is_king_attacked;
use crate::board::{Board, BoardError, PieceId};
use crate::movegen::{available_moves, MoveList};
use chessgame_core::{Color, PieceKind, Tile};

/// What kind of input the game currently waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the mover to pick one of their pieces.
    SelectingSource,
    /// A piece is selected; waiting for a destination (or reselection).
    SelectingDestination,
    /// A pawn reached its promotion rank; waiting for a kind choice.
    AwaitingPromotion,
    /// The game has ended.
    GameOver,
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Checkmate: the named color wins.
    Winner(Color),
    /// No legal moves but the king is safe.
    Stalemate,
}

/// A complete two-player game.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Color,
    selected: Option<PieceId>,
    highlights: MoveList,
    outcome: Option<GameOutcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starts a game on the standard board, White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            turn: Color::White,
            selected: None,
            highlights: MoveList::new(),
            outcome: None,
        }
    }

    /// Starts a game from a custom position.
    ///
    /// Terminal conditions are evaluated immediately, so a position
    /// that is already checkmate or stalemate starts in
    /// [`GamePhase::GameOver`].
    pub fn from_board(board: Board, turn: Color) -> Result<Self, BoardError> {
        let mut game = GameState {
            board,
            turn,
            selected: None,
            highlights: MoveList::new(),
            outcome: None,
        };
        if game.board.promoted_piece().is_none() {
            game.evaluate_end()?;
        }
        Ok(game)
    }

    /// Returns the board for rendering and queries.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the currently selected piece, if any.
    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Returns the legal destinations of the selected piece, for
    /// highlighting.
    pub fn highlights(&self) -> &MoveList {
        &self.highlights
    }

    /// Returns the game outcome once the game has ended.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Returns the winner, or `None` while the game runs or on a draw.
    pub fn winner(&self) -> Option<Color> {
        match self.outcome {
            Some(GameOutcome::Winner(color)) => Some(color),
            _ => None,
        }
    }

    /// Returns true while moves can still be played.
    pub fn can_continue(&self) -> bool {
        self.outcome.is_none()
    }

    /// Returns the phase of the input state machine.
    pub fn phase(&self) -> GamePhase {
        if self.outcome.is_some() {
            GamePhase::GameOver
        } else if self.board.promoted_piece().is_some() {
            GamePhase::AwaitingPromotion
        } else if self.selected.is_some() {
            GamePhase::SelectingDestination
        } else {
            GamePhase::SelectingSource
        }
    }

    /// Handles a click on tile `(x, y)`.
    ///
    /// A click on a highlighted destination applies the move, clears the
    /// selection, flips the turn, and either suspends into the promotion
    /// phase or evaluates terminal conditions. Any other click selects a
    /// piece of the mover's color, or clears the selection.
    ///
    /// Clicks after the game has ended are ignored; clicks while a
    /// promotion is pending fail with [`BoardError::PromotionPending`].
    pub fn select(&mut self, x: i8, y: i8) -> Result<(), BoardError> {
        if self.outcome.is_some() {
            return Ok(());
        }
        if self.board.promoted_piece().is_some() {
            return Err(BoardError::PromotionPending);
        }
        let clicked = Tile::new(x, y).ok_or(BoardError::OutOfBounds { x, y })?;

        if let Some(id) = self.selected {
            if self.highlights.contains(clicked) {
                let from = self
                    .board
                    .piece(id)
                    .map(|piece| piece.pos)
                    .ok_or(BoardError::EmptySource(clicked))?;
                self.board
                    .move_piece(from.x() as i8, from.y() as i8, x, y)?;
                self.selected = None;
                self.highlights = MoveList::new();
                self.turn = self.turn.opposite();
                if self.board.promoted_piece().is_none() {
                    self.evaluate_end()?;
                }
                return Ok(());
            }
        }

        match self.board.occupant(clicked) {
            Some(id)
                if self
                    .board
                    .piece(id)
                    .is_some_and(|piece| piece.color == self.turn) =>
            {
                self.selected = Some(id);
                self.highlights = available_moves(&self.board, id);
            }
            _ => {
                self.selected = None;
                self.highlights = MoveList::new();
            }
        }
        Ok(())
    }

    /// Resolves the pending promotion, then runs the terminal evaluation
    /// that was deferred when the pawn reached its promotion rank.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> Result<(), BoardError> {
        self.board.promote(kind)?;
        self.evaluate_end()
    }

    /// Ends the game if the side to move has no legal move: checkmate if
    /// its king is attacked, stalemate otherwise.
    fn evaluate_end(&mut self) -> Result<(), BoardError> {
        let turn = self.turn;
        let any_move = self
            .board
            .pieces()
            .filter(|(_, piece)| piece.color == turn)
            .any(|(id, _)| !available_moves(&self.board, id).is_empty());
        if any_move {
            return Ok(());
        }

        self.outcome = Some(if is_king_attacked(&self.board, turn)? {
            GameOutcome::Winner(turn.opposite())
        } else {
            GameOutcome::Stalemate
        });
        Ok(())
    }
}
