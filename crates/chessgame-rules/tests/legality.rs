//! Integration tests for the rules engine: scripted games through the
//! orchestration layer and randomized legality playouts.

use chessgame_core::{Color, PieceKind, Tile};
use chessgame_rules::{
    available_moves, is_king_attacked, Board, GameOutcome, GamePhase, GameState,
};
use proptest::prelude::*;

/// Applies a scripted sequence of (source, destination) clicks.
fn play(game: &mut GameState, moves: &[((i8, i8), (i8, i8))]) {
    for &((x1, y1), (x2, y2)) in moves {
        game.select(x1, y1).unwrap();
        assert_eq!(
            game.phase(),
            GamePhase::SelectingDestination,
            "no piece selected at ({}, {})",
            x1,
            y1
        );
        game.select(x2, y2).unwrap();
    }
}

#[test]
fn twenty_opening_moves_for_white() {
    let game = GameState::new();
    let total: usize = game
        .board()
        .pieces()
        .filter(|(_, piece)| piece.color == Color::White)
        .map(|(id, _)| available_moves(game.board(), id).len())
        .sum();
    assert_eq!(total, 20);
}

#[test]
fn fools_mate() {
    let mut game = GameState::new();
    play(
        &mut game,
        &[
            ((5, 6), (5, 5)), // White f-pawn one step
            ((4, 1), (4, 3)), // Black e-pawn two steps
            ((6, 6), (6, 4)), // White g-pawn two steps
            ((3, 0), (7, 4)), // Black queen to the exposed diagonal
        ],
    );

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.outcome(), Some(GameOutcome::Winner(Color::Black)));
    assert!(is_king_attacked(game.board(), Color::White).unwrap());
}

#[test]
fn kingside_castle_through_the_orchestration_layer() {
    let mut game = GameState::new();
    play(
        &mut game,
        &[
            ((4, 6), (4, 4)), // White e-pawn
            ((4, 1), (4, 3)), // Black e-pawn
            ((6, 7), (5, 5)), // White king's knight out
            ((1, 0), (2, 2)), // Black queen's knight out
            ((5, 7), (2, 4)), // White king's bishop out
            ((6, 0), (5, 2)), // Black king's knight out
            ((4, 7), (7, 7)), // White castles onto the rook
        ],
    );

    let board = game.board();
    let king = board.occupant(Tile::at(6, 7)).expect("king landed");
    assert_eq!(board.piece(king).unwrap().kind, PieceKind::King);
    let rook = board.occupant(Tile::at(5, 7)).expect("rook landed");
    assert_eq!(board.piece(rook).unwrap().kind, PieceKind::Rook);
    assert!(game.can_continue());
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn en_passant_through_the_orchestration_layer() {
    let mut game = GameState::new();
    play(
        &mut game,
        &[
            ((4, 6), (4, 4)), // White e-pawn two steps
            ((3, 1), (3, 3)), // Black d-pawn two steps
            ((4, 4), (3, 3)), // White captures the d-pawn
            ((2, 1), (2, 3)), // Black c-pawn double-steps past it
            ((3, 3), (2, 2)), // White captures en passant
        ],
    );

    let board = game.board();
    let pawn = board.occupant(Tile::at(2, 2)).expect("capturer landed");
    assert_eq!(board.piece(pawn).unwrap().color, Color::White);
    // The passed pawn is gone from the tile it skipped back to.
    assert!(board.occupant(Tile::at(2, 3)).is_none());
    assert_eq!(board.pieces().count(), 30);
}

proptest! {
    /// Random playouts from the starting position: every applied move
    /// comes out of `available_moves`, so the mover's king must never be
    /// left attacked, kings are never captured, and the grid stays
    /// consistent with piece positions.
    #[test]
    fn random_playouts_respect_invariants(choices in proptest::collection::vec(any::<u16>(), 1..80)) {
        let mut board = Board::standard();
        let mut turn = Color::White;

        for choice in choices {
            let movers: Vec<_> = board
                .pieces()
                .filter(|(_, piece)| piece.color == turn)
                .map(|(id, _)| (id, available_moves(&board, id)))
                .filter(|(_, moves)| !moves.is_empty())
                .collect();
            if movers.is_empty() {
                break; // checkmate or stalemate
            }

            let (id, moves) = &movers[choice as usize % movers.len()];
            let to = moves.as_slice()[choice as usize % moves.len()];
            let from = board.piece(*id).unwrap().pos;
            board
                .move_piece(from.x() as i8, from.y() as i8, to.x() as i8, to.y() as i8)
                .unwrap();

            prop_assert!(!is_king_attacked(&board, turn).unwrap());
            prop_assert!(board.king(Color::White).is_some());
            prop_assert!(board.king(Color::Black).is_some());
            for (pid, piece) in board.pieces() {
                prop_assert_eq!(board.occupant(piece.pos), Some(pid));
            }

            if board.promoted_piece().is_some() {
                board.promote(PieceKind::Queen).unwrap();
            }
            turn = turn.opposite();
        }
    }
}
