//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - piece arena plus the 8x8 occupancy grid, with move
//!   application including castling, en passant, and promotion
//! - [`available_moves`] - legal destination tiles for one piece,
//!   including pin and check filtering
//! - [`is_tile_attacked`] / [`is_king_attacked`] - attack detection
//! - [`GameState`] - turn and selection orchestration with terminal
//!   detection (checkmate, stalemate)
//!
//! # Architecture
//!
//! The board owns every piece in an arena addressed by stable
//! [`PieceId`] handles; the grid stores optional handles and captured
//! pieces leave their slot empty for the rest of the game. Attack
//! detection is a pure query that can treat one handle as transparent,
//! which is how pins are detected without mutating shared state.
//!
//! # Example
//!
//! ```
//! use chessgame_rules::{available_moves, GameState};
//!
//! let mut game = GameState::new();
//! // Select White's king pawn, then advance it two ranks.
//! game.select(4, 6).unwrap();
//! game.select(4, 4).unwrap();
//! assert_eq!(game.turn(), chessgame_core::Color::Black);
//!
//! let knight = game.board().get_piece(1, 0).unwrap().unwrap();
//! assert_eq!(available_moves(game.board(), knight).len(), 2);
//! ```

mod attack;
mod board;
mod game;
mod movegen;

pub use attack::{is_king_attacked, is_tile_attacked};
pub use board::{Board, BoardError, Piece, PieceId};
pub use game::{GameOutcome, GamePhase, GameState};
pub use movegen::{available_moves, MoveList};
